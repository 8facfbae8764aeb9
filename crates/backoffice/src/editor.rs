//! Table editor: list, create, edit and delete rows of any table.
//!
//! Mirrors the database page of the admin dashboard. Each write is sent,
//! awaited, and followed by a reload of the selected table. A failed load
//! (other than an expired session) leaves a message in [`TableEditor::error`]
//! and swaps in [`TableData::placeholder`] so the editor stays usable.

use tracing::{debug, warn};

use crate::api::{AdminBackend, TableData};
use crate::error::{BackofficeError, Result};
use crate::record::{CoercedRecord, Coercer, InputHint, RawRecord, input_hint};

/// Editing session over one backend.
pub struct TableEditor<'a, B: AdminBackend + ?Sized> {
    backend: &'a B,
    coercer: Coercer,
    tables: Vec<String>,
    selected: Option<String>,
    data: Option<TableData>,
    error: Option<String>,
}

impl<'a, B: AdminBackend + ?Sized> TableEditor<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            coercer: Coercer::new(),
            tables: Vec::new(),
            selected: None,
            data: None,
            error: None,
        }
    }

    /// Use a custom coercer (e.g. one that reparses timestamps on update).
    pub fn with_coercer(mut self, coercer: Coercer) -> Self {
        self.coercer = coercer;
        self
    }

    /// Fetch the table list; selects and loads the first table if none is selected.
    pub fn load_tables(&mut self) -> Result<&[String]> {
        self.tables = self.backend.tables()?;
        debug!(count = self.tables.len(), "loaded table list");

        if self.selected.is_none() {
            if let Some(first) = self.tables.first().cloned() {
                self.select(&first)?;
            }
        }
        Ok(&self.tables)
    }

    /// Switch to `table` and load its data.
    pub fn select(&mut self, table: &str) -> Result<()> {
        self.selected = Some(table.to_string());
        self.reload()
    }

    /// Reload the selected table.
    ///
    /// Only [`BackofficeError::Unauthorized`] is returned as an error; any
    /// other failure is recorded and replaced by the placeholder dataset.
    pub fn reload(&mut self) -> Result<()> {
        let Some(table) = self.selected.clone() else {
            return Ok(());
        };

        match self.backend.table_data(&table) {
            Ok(data) => {
                debug!(table = %table, rows = data.rows.len(), "loaded table");
                self.data = Some(data);
                self.error = None;
                Ok(())
            }
            Err(BackofficeError::Unauthorized) => Err(BackofficeError::Unauthorized),
            Err(e) => {
                warn!(table = %table, error = %e, "table load failed; showing placeholder");
                self.error = Some(format!(
                    "Failed to load data for {} table. Please try again or select a different table.",
                    table
                ));
                self.data = Some(TableData::placeholder());
                Ok(())
            }
        }
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Data of the selected table, once loaded.
    pub fn data(&self) -> Option<&TableData> {
        self.data.as_ref()
    }

    /// Message from the last failed load, cleared by a successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Writable columns of the selected table with their input hints.
    pub fn form_fields(&self) -> Vec<(String, InputHint)> {
        self.data
            .iter()
            .flat_map(|data| data.columns.iter())
            .map(|column| (column.clone(), input_hint(column)))
            .filter(|(_, hint)| !hint.read_only)
            .collect()
    }

    /// Edit form for row `id`, prefilled from the loaded data.
    pub fn edit_form(&self, id: i64) -> Result<RawRecord> {
        self.data
            .as_ref()
            .and_then(|data| data.row(id))
            .map(RawRecord::from_row)
            .ok_or_else(|| self.row_not_found(id))
    }

    /// Coerce `raw` for creation, submit it, and reload.
    ///
    /// Only the fields present in `raw` are sent; columns the operator never
    /// filled in are left to the server's defaults. Use [`form_fields`] to
    /// prompt for values.
    ///
    /// [`form_fields`]: TableEditor::form_fields
    pub fn create(&mut self, raw: &RawRecord) -> Result<CoercedRecord> {
        let table = self.require_selected()?;
        let record = self.coercer.create(raw);
        self.backend.create_record(&table, &record)?;
        self.reload()?;
        Ok(record)
    }

    /// Coerce `raw` for update of row `id`, submit it, and reload.
    pub fn update(&mut self, id: i64, raw: &RawRecord) -> Result<CoercedRecord> {
        let table = self.require_selected()?;
        let record = self.coercer.update(raw);
        self.backend.update_record(&table, id, &record)?;
        self.reload()?;
        Ok(record)
    }

    /// Delete row `id` and reload.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let table = self.require_selected()?;
        self.backend.delete_record(&table, id)?;
        self.reload()
    }

    fn require_selected(&self) -> Result<String> {
        self.selected
            .clone()
            .ok_or_else(|| BackofficeError::NotFound("no table selected".to_string()))
    }

    fn row_not_found(&self, id: i64) -> BackofficeError {
        BackofficeError::NotFound(format!(
            "row {} in table '{}'",
            id,
            self.selected.as_deref().unwrap_or("?")
        ))
    }
}
