//! Logging setup shared by RP binaries.

mod setup;

pub use setup::{init, LogError, LogGuard};

/// Logs an error together with the chain of its sources on a single line.
#[macro_export]
macro_rules! log_full_error {
    ($err:ident) => {
        use std::error::Error;

        let mut error_message = format!("{}", $err);
        let mut error: &dyn Error = &$err;
        while let Some(source) = error.source() {
            error = source;
            error_message.push_str(&format!(": {}", error));
        }
        ::tracing::error!("{}", error_message);
    };
}
