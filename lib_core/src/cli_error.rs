use std::fmt;

use colored::Colorize;

pub trait CliErrorTrait: std::fmt::Debug + Send + Sync + 'static {
    /// Name of the concrete error type, as declared with `define_cli_error!`.
    fn name(&self) -> &'static str;
    fn details(&self) -> CliErrorDetails<'_>;
}

pub type CliError = Box<dyn CliErrorTrait>;

#[derive(Debug)]
pub enum CliErrorDetails<'a> {
    Custom {
        context: &'a String,
        message: &'a String,
        debug: Option<&'a String>,
    },
}

impl CliErrorDetails<'_> {
    pub fn message(&self) -> &str {
        match self {
            CliErrorDetails::Custom { message, .. } => message,
        }
    }

    pub fn debug(&self) -> Option<&str> {
        match self {
            CliErrorDetails::Custom { debug, .. } => debug.map(|d| d.as_str()),
        }
    }
}

impl fmt::Display for dyn CliErrorTrait {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.details() {
            CliErrorDetails::Custom { message, debug, .. } => match debug {
                Some(debug) => write!(f, "{}\n{}", message.bold(), debug),
                None => write!(f, "{}", message.bold()),
            },
        }
    }
}

impl std::error::Error for dyn CliErrorTrait {}

// Definining custom CLI errors.
// --------------------------------------------------

#[macro_export]
macro_rules! define_cli_error {
    ($name:ident, $msg:expr) => {
        define_cli_error!($name, $msg, {});
    };
    ($name:ident, $msg:expr, { $($arg:ident : $argtype:ty),* $(,)? }) => {
        #[derive(Debug)]
        pub struct $name {
            context: String,
            message: String,
            debug: Option<String>,
        }

        impl $name {
            #[allow(dead_code)]
            #[track_caller]
            pub fn new($($arg: $argtype),*) -> $crate::CliError {
                Box::new($name {
                    context: std::backtrace::Backtrace::force_capture().to_string(),
                    message: format!($msg, $($arg = $arg),*),
                    debug: None,
                })
            }

            #[allow(dead_code)]
            #[track_caller]
            pub fn with_debug<D>(
                $($arg: $argtype,)*
                debug: &D,
            ) -> $crate::CliError where D: std::fmt::Debug {
                Box::new($name {
                    context: std::backtrace::Backtrace::force_capture().to_string(),
                    message: format!($msg, $($arg = $arg),*),
                    debug: Some(format!("{:?}", debug)),
                })
            }
        }

        impl $crate::CliErrorTrait for $name {
            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn details(&self) -> $crate::CliErrorDetails<'_> {
                $crate::CliErrorDetails::Custom {
                    context: &self.context,
                    message: &self.message,
                    debug: self.debug.as_ref(),
                }
            }
        }
    };
}

// Standard errors.
// --------------------------------------------------

define_cli_error!(IOError, "IO error.");
