// Terminal UI utilities

use colored::Colorize;

pub fn print_header(title: &str) {
    println!();
    println!(
        "{}",
        "╔════════════════════════════════════════════════════════════╗".bright_blue()
    );
    println!("{}", format!("║  {:<58}║", title).bright_blue());
    println!(
        "{}",
        "╚════════════════════════════════════════════════════════════╝".bright_blue()
    );
    println!();
}

pub fn print_rule() {
    println!("{}", "─".repeat(60).dimmed());
}

pub fn print_step(message: &str) {
    println!();
    println!("{}", message.bold());
}

pub fn print_success(message: &str) {
    println!("{}", format!("✅ {}", message).bright_green().bold());
}

pub fn print_check(message: &str) {
    println!("   {} {}", "✅".bright_green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{}", format!("❌ {}", message).bright_red().bold());
}

pub fn print_warning(message: &str) {
    println!("{}", format!("⚠️  {}", message).bright_yellow());
}

/// Prints a `label: value` line indented under the current section
pub fn print_field(label: &str, value: &str) {
    println!("   {}: {}", label.dimmed(), value);
}
