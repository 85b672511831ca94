//! Output formatting for analysis results

pub mod console;
pub mod formatter;

pub use console::ConsoleFormatter;
pub use formatter::OutputFormatter;
