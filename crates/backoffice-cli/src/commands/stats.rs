//! Stats command - dashboard snapshot.

use chrono::Utc;
use colored::Colorize;

use backoffice::{Dashboard, OrderStatus, Period, format_currency, last_login_label, month_label};

use super::Context;

pub fn run(
    ctx: &Context,
    period: Period,
    limit: usize,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = ctx.backend()?;
    let dashboard = Dashboard::fetch(backend.as_ref(), period, limit)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Dashboard".cyan().bold(),
        format!("(as of {})", Utc::now().format("%Y-%m-%d %H:%M UTC")).dimmed()
    );
    println!();

    let stats = &dashboard.stats;
    println!("{}", "Totals:".yellow().bold());
    println!("  Users:          {}", stats.total_users.to_string().white().bold());
    println!("  Active users:   {}", stats.active_users);
    println!("  Orders:         {}", stats.total_orders.to_string().white().bold());
    println!("  Revenue:        {}", format_currency(stats.total_revenue).green());
    println!("  Avg order:      {}", format_currency(stats.average_order_value));
    println!();

    let current = &dashboard.period_stats;
    println!("{}", format!("{}:", dashboard.period.label()).yellow().bold());
    println!("  Revenue:        {}", format_currency(current.revenue).green());
    println!("  Orders:         {}", current.order_count);
    println!("  Avg order:      {}", format_currency(current.average_order_value));
    println!();

    if !dashboard.monthly_performance.is_empty() {
        println!("{}", "Monthly performance:".yellow().bold());
        for month in &dashboard.monthly_performance {
            println!(
                "  {:<16} {:>12}  {} orders",
                month_label(month),
                format_currency(month.revenue),
                month.order_count
            );
        }
        println!();
    }

    if !dashboard.popular_products.is_empty() {
        println!("{}", "Popular products:".yellow().bold());
        for product in &dashboard.popular_products {
            println!(
                "  {:<24} {:>5} orders {:>12}",
                product.name,
                product.order_count,
                format_currency(product.total_revenue)
            );
        }
        println!();
    }

    if !dashboard.recent_orders.is_empty() {
        println!("{}", "Recent orders:".yellow().bold());
        for order in &dashboard.recent_orders {
            let status = OrderStatus::parse(&order.status);
            let status_text = match status {
                OrderStatus::Completed => status.to_string().green(),
                OrderStatus::Pending => status.to_string().yellow(),
                OrderStatus::Processing => status.to_string().blue(),
                OrderStatus::Cancelled => status.to_string().red(),
                OrderStatus::Other(_) => status.to_string().normal(),
            };
            println!(
                "  #{:<6} {:<20} {:>12}  {}  {}",
                order.id,
                order.user.name,
                format_currency(order.total_amount),
                status_text,
                order.created_at.format("%Y-%m-%d")
            );
        }
        println!();
    }

    if !dashboard.recent_users.is_empty() {
        println!("{}", "Recent users:".yellow().bold());
        for user in &dashboard.recent_users {
            println!(
                "  #{:<6} {:<20} {:<16} last login {}",
                user.id,
                user.name,
                user.phone_number.as_deref().unwrap_or("-"),
                last_login_label(user.last_login_at)
            );
        }
    }

    Ok(())
}
