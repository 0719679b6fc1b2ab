//! Styled terminal output helpers

use console::Style;

/// Print a bold section header
pub fn header(message: &str) {
    println!("\n{}", Style::new().bold().apply_to(message));
}

/// Print a green success line
pub fn success(message: &str) {
    println!("  {} {}", Style::new().green().apply_to("✓"), message);
}

/// Print a dim informational note
pub fn note(message: &str) {
    println!("  {} {}", Style::new().dim().apply_to("·"), Style::new().dim().apply_to(message));
}

/// Print a red failure line to stderr
pub fn failure(message: &str) {
    eprintln!("  {} {}", Style::new().red().bold().apply_to("✗"), message);
}

/// Print a plain line (used for next-step guidance blocks)
pub fn plain(message: &str) {
    println!("{message}");
}
