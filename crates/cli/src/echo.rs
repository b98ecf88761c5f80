//! Styled progress output on stderr.

use owo_colors::OwoColorize;

use crate::VERSION;

pub fn print_banner() {
    eprintln!("\n{} {} {}", "Gist".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Summarize news articles into length-bounded digests\n".dimmed());
}

pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

pub fn print_detail(label: &str, value: &str) {
    eprintln!("  {} {}", label.dimmed(), value.bright_white());
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}
