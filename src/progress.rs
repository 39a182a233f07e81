//! Progress reporting utilities.

use colored::Colorize;

/// Reports a task.
pub fn task(name: &str) {
   println!("{}", name.bold());
}

/// Reports a non-fatal problem to the error channel.
pub fn warning(message: &str) {
   eprintln!("{} {}", "warning:".yellow().bold(), message);
}
