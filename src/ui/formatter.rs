//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here are pure (no I/O side effects beyond printing) and testable.

use crate::engine::VersionRegistry;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Render the resolved versions, one section per phase.
///
/// # Examples
/// ```ignore
/// [release]
///   groupId:core  1.0
/// ```
pub fn format_registry(registry: &VersionRegistry) -> String {
    let mut out = String::new();
    for phase in registry.phases() {
        let entries: Vec<_> = registry.phase_entries(phase).collect();
        let width = entries
            .iter()
            .map(|(id, _)| id.to_string().len())
            .max()
            .unwrap_or(0);

        out.push_str(&format!("[{}]\n", phase));
        for (id, version) in entries {
            out.push_str(&format!("  {:<width$}  {}\n", id.to_string(), version, width = width));
        }
    }
    out
}

/// Display the resolved versions, or a notice when nothing was resolved.
pub fn display_registry(registry: &VersionRegistry) {
    if registry.is_empty() {
        display_status("No versions were resolved");
        return;
    }
    println!("\n{}", style("Resolved versions:").bold());
    print!("{}", format_registry(registry));
}
