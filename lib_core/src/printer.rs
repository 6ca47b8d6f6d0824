#[cfg(any(test, feature = "test-util"))]
use std::sync::{Arc, Mutex};

use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrintLevel {
    Debug,
    Info,
    Warn,
    Error,
    Success,
}

#[derive(Debug, Clone, Default)]
pub struct Printer {
    #[cfg(any(test, feature = "test-util"))]
    recorded: Option<Arc<Mutex<Vec<(PrintLevel, String)>>>>,
}

impl Printer {
    pub fn new() -> Self {
        Printer::default()
    }

    /// A printer that keeps every line it prints, for inspection through
    /// [`Printer::recorded`]. Test aid, behind the `test-util` feature.
    #[cfg(any(test, feature = "test-util"))]
    pub fn recording() -> Self {
        Printer {
            recorded: Some(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn recorded(&self) -> Vec<(PrintLevel, String)> {
        self.recorded
            .as_ref()
            .and_then(|lines| lines.lock().ok().map(|lines| lines.clone()))
            .unwrap_or_default()
    }

    pub fn print(&self, level: PrintLevel, message: &str) {
        #[cfg(any(test, feature = "test-util"))]
        if let Some(lines) = &self.recorded {
            if let Ok(mut lines) = lines.lock() {
                lines.push((level, message.to_string()));
            }
        }
        match level {
            PrintLevel::Debug => println!("{}", message.dimmed()),
            PrintLevel::Info => println!("{}", message.normal()),
            PrintLevel::Warn => println!("{}", message.yellow()),
            PrintLevel::Error => eprintln!("{}", message.red()),
            PrintLevel::Success => println!("{}", message.green()),
        }
    }

    pub fn debug(&self, message: &str) {
        self.print(PrintLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.print(PrintLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.print(PrintLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.print(PrintLevel::Error, message);
    }

    pub fn success(&self, message: &str) {
        self.print(PrintLevel::Success, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_printer_keeps_lines_in_order() {
        let printer = Printer::recording();
        printer.info("one");
        printer.clone().warn("two");
        assert_eq!(
            printer.recorded(),
            vec![
                (PrintLevel::Info, "one".to_string()),
                (PrintLevel::Warn, "two".to_string()),
            ]
        );
    }

    #[test]
    fn plain_printer_records_nothing() {
        let printer = Printer::new();
        printer.info("ignored");
        assert!(printer.recorded().is_empty());
    }
}
