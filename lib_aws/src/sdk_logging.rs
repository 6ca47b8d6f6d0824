use std::fmt::{self, Write as _};

use lib_core::Printer;
use strum::IntoEnumIterator as _;
use strum_macros::EnumIter;
use tracing::{
    field::{Field, Visit},
    level_filters::LevelFilter,
    Event, Level, Subscriber,
};
use tracing_subscriber::{
    filter::{Filtered, Targets},
    layer::Context,
    registry::LookupSpan,
    Layer,
};

/// SDK crates whose warnings always reach the printer.
const SDK_TARGETS: &[&str] = &["aws_config", "aws_sdk", "aws_smithy", "aws_runtime"];

/// Parts of the SDK debug output switched on together by `debug_api_calls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum SdkDebugFlag {
    EventStreamBody,
    HttpBody,
    RequestRetries,
    RequestErrors,
}

impl SdkDebugFlag {
    fn directive(self) -> (&'static str, LevelFilter) {
        match self {
            SdkDebugFlag::EventStreamBody => ("aws_smithy_eventstream", LevelFilter::TRACE),
            SdkDebugFlag::HttpBody => ("aws_smithy_runtime::client::http", LevelFilter::TRACE),
            SdkDebugFlag::RequestRetries => {
                ("aws_smithy_runtime::client::retries", LevelFilter::DEBUG)
            }
            SdkDebugFlag::RequestErrors => {
                ("aws_smithy_runtime::client::orchestrator", LevelFilter::DEBUG)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SdkLogLevel {
    /// Warnings and errors only.
    #[default]
    Quiet,
    /// Every [`SdkDebugFlag`].
    Debug,
}

impl SdkLogLevel {
    pub fn from_debug_api_calls(debug_api_calls: bool) -> Self {
        if debug_api_calls {
            SdkLogLevel::Debug
        } else {
            SdkLogLevel::Quiet
        }
    }

    pub fn flags(self) -> Vec<SdkDebugFlag> {
        match self {
            SdkLogLevel::Quiet => Vec::new(),
            SdkLogLevel::Debug => SdkDebugFlag::iter().collect(),
        }
    }

    pub fn targets(self) -> Targets {
        let base = SDK_TARGETS
            .iter()
            .fold(Targets::new(), |targets, target| {
                targets.with_target(*target, LevelFilter::WARN)
            });
        base.with_targets(self.flags().into_iter().map(SdkDebugFlag::directive))
    }
}

/// Forwards SDK `tracing` events to a [`Printer`].
#[derive(Debug, Clone)]
pub struct SdkLogLayer {
    printer: Printer,
}

impl SdkLogLayer {
    pub fn new(printer: Printer) -> Self {
        SdkLogLayer { printer }
    }

    /// The layer restricted to SDK targets at `level`.
    pub fn filtered<S>(self, level: SdkLogLevel) -> Filtered<Self, Targets, S>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        self.with_filter(level.targets())
    }
}

impl<S: Subscriber> Layer<S> for SdkLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        let line = format!("[{}] {}", metadata.target(), visitor.into_line());
        match *metadata.level() {
            Level::ERROR => self.printer.error(&line),
            Level::WARN => self.printer.warn(&line),
            Level::INFO => self.printer.info(&line),
            _ => self.printer.debug(&line),
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl EventVisitor {
    fn into_line(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use lib_core::PrintLevel;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    fn capture(level: SdkLogLevel, emit: impl FnOnce()) -> Vec<(PrintLevel, String)> {
        let printer = Printer::recording();
        let subscriber =
            tracing_subscriber::registry().with(SdkLogLayer::new(printer.clone()).filtered(level));
        tracing::subscriber::with_default(subscriber, emit);
        printer.recorded()
    }

    #[test]
    fn debug_bundle_is_all_or_nothing() {
        assert!(SdkLogLevel::Quiet.flags().is_empty());
        assert_eq!(
            SdkLogLevel::Debug.flags(),
            vec![
                SdkDebugFlag::EventStreamBody,
                SdkDebugFlag::HttpBody,
                SdkDebugFlag::RequestRetries,
                SdkDebugFlag::RequestErrors,
            ]
        );
    }

    #[test]
    fn debug_bundle_enables_retry_logging() {
        let target = "aws_smithy_runtime::client::retries::strategy::standard";
        assert!(!SdkLogLevel::Quiet.targets().would_enable(target, &Level::DEBUG));
        assert!(SdkLogLevel::Debug.targets().would_enable(target, &Level::DEBUG));
        assert!(SdkLogLevel::Quiet.targets().would_enable(target, &Level::WARN));
    }

    #[test]
    fn non_sdk_targets_are_never_forwarded() {
        assert!(!SdkLogLevel::Debug
            .targets()
            .would_enable("hyper::proto::h1", &Level::ERROR));
    }

    #[test]
    fn sdk_events_reach_the_printer() {
        let lines = capture(SdkLogLevel::Debug, || {
            tracing::debug!(
                target: "aws_smithy_runtime::client::retries::strategy::standard",
                attempt = 2,
                "retrying request"
            );
            tracing::debug!(target: "unrelated_crate", "dropped");
        });
        assert_eq!(
            lines,
            vec![(
                PrintLevel::Debug,
                "[aws_smithy_runtime::client::retries::strategy::standard] retrying request attempt=2"
                    .to_string()
            )]
        );
    }

    #[test]
    fn quiet_level_forwards_only_warnings() {
        let lines = capture(SdkLogLevel::Quiet, || {
            tracing::debug!(target: "aws_config::profile", "loading profile");
            tracing::warn!(target: "aws_config::profile", "profile file is empty");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, PrintLevel::Warn);
    }
}
