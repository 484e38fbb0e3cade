//! Record Collection Manager Library
//!
//! This library provides functionality for managing a personal record
//! collection: flat catalog records persisted to a JSON file, cover art
//! fetched from the iTunes Search API, and both a CLI and a small web
//! interface on top.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local web interface
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `covers` - Cover-art lookup and download
//! - `management` - Catalog persistence and record update reconciliation
//! - `server` - Local HTTP server for the web interface
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use vinylcli::{config, management::CatalogManager};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await;
//!     let catalog = CatalogManager::load(config::collection_file()).await;
//!     println!("{} records", catalog.len());
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod covers;
pub mod management;
pub mod server;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Checked {} records", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Added '{}' by {}", album, artist);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination; recoverable conditions go
/// through `warning!` instead.
///
/// # Example
///
/// ```
/// error!("Failed to save collection: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues that don't require program termination. Cover-art
/// failures in particular are always warnings, never errors.
///
/// # Example
///
/// ```
/// warning!("No cover art found for '{}'", album);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
