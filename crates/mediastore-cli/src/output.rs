//! JSON output formatting for CLI commands.

use serde::Serialize;

/// Print an item as pretty JSON.
pub fn print_json<T: Serialize>(item: &T) {
    let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
    println!("{}", json);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}
