//! Alert logging channels.
//!
//! Every alert is routed to exactly one of four channels by its severity. The
//! mapping lives in [`LogChannel::for_level`]; severities the client does not
//! recognize land on the success channel.

use std::fmt;

use crate::alerts::AlertLevel;

/// Receives alert text, one method per channel.
///
/// Implement this to send alerts somewhere other than `tracing`:
///
/// ```rust
/// use traffic_ops::AlertLogger;
///
/// #[derive(Debug)]
/// struct Stderr;
///
/// impl AlertLogger for Stderr {
///     fn error(&self, text: &str) { eprintln!("ERROR: {text}"); }
///     fn warn(&self, text: &str) { eprintln!("WARN: {text}"); }
///     fn info(&self, text: &str) { eprintln!("INFO: {text}"); }
///     fn success(&self, text: &str) { eprintln!("OK: {text}"); }
/// }
/// ```
pub trait AlertLogger: fmt::Debug + Send + Sync {
    /// Logs an error-level alert.
    fn error(&self, text: &str);
    /// Logs a warning-level alert.
    fn warn(&self, text: &str);
    /// Logs an info-level alert.
    fn info(&self, text: &str);
    /// Logs a success-level alert.
    fn success(&self, text: &str);
}

/// The logger channel an alert is dispatched to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogChannel {
    /// [`AlertLogger::error`]
    Error,
    /// [`AlertLogger::warn`]
    Warn,
    /// [`AlertLogger::info`]
    Info,
    /// [`AlertLogger::success`]
    Success,
}

impl LogChannel {
    /// Selects the channel for a severity.
    ///
    /// Unrecognized severities map to [`LogChannel::Success`].
    #[must_use]
    pub fn for_level(level: &AlertLevel) -> Self {
        match level {
            AlertLevel::Error => Self::Error,
            AlertLevel::Warning => Self::Warn,
            AlertLevel::Info => Self::Info,
            AlertLevel::Success | AlertLevel::Other(_) => Self::Success,
        }
    }

    /// Sends `text` to this channel of `logger`.
    pub fn dispatch(self, logger: &dyn AlertLogger, text: &str) {
        match self {
            Self::Error => logger.error(text),
            Self::Warn => logger.warn(text),
            Self::Info => logger.info(text),
            Self::Success => logger.success(text),
        }
    }
}

/// The logger used when alert logging is on and none was injected.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl AlertLogger for TracingLogger {
    fn error(&self, text: &str) {
        tracing::error!(target: "traffic_ops::alerts", "{text}");
    }

    fn warn(&self, text: &str) {
        tracing::warn!(target: "traffic_ops::alerts", "{text}");
    }

    fn info(&self, text: &str) {
        tracing::info!(target: "traffic_ops::alerts", "{text}");
    }

    fn success(&self, text: &str) {
        tracing::info!(target: "traffic_ops::alerts", severity = "success", "{text}");
    }
}

/// Records every call so tests can assert on channel routing.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLogger {
    calls: std::sync::Mutex<Vec<(LogChannel, String)>>,
}

#[cfg(test)]
impl RecordingLogger {
    pub(crate) fn calls(&self) -> Vec<(LogChannel, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, channel: LogChannel, text: &str) {
        self.calls.lock().unwrap().push((channel, text.to_string()));
    }
}

#[cfg(test)]
impl AlertLogger for RecordingLogger {
    fn error(&self, text: &str) {
        self.record(LogChannel::Error, text);
    }

    fn warn(&self, text: &str) {
        self.record(LogChannel::Warn, text);
    }

    fn info(&self, text: &str) {
        self.record(LogChannel::Info, text);
    }

    fn success(&self, text: &str) {
        self.record(LogChannel::Success, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_mapping_for_known_levels() {
        assert_eq!(LogChannel::for_level(&AlertLevel::Error), LogChannel::Error);
        assert_eq!(LogChannel::for_level(&AlertLevel::Warning), LogChannel::Warn);
        assert_eq!(LogChannel::for_level(&AlertLevel::Info), LogChannel::Info);
        assert_eq!(
            LogChannel::for_level(&AlertLevel::Success),
            LogChannel::Success
        );
    }

    #[test]
    fn test_unknown_level_falls_back_to_success_channel() {
        let level = AlertLevel::Other("critical".to_string());
        assert_eq!(LogChannel::for_level(&level), LogChannel::Success);
    }

    #[test]
    fn test_dispatch_calls_matching_method() {
        let logger = RecordingLogger::default();
        LogChannel::Warn.dispatch(&logger, "careful");
        LogChannel::Success.dispatch(&logger, "done");

        assert_eq!(
            logger.calls(),
            vec![
                (LogChannel::Warn, "careful".to_string()),
                (LogChannel::Success, "done".to_string()),
            ]
        );
    }

    #[test]
    fn test_tracing_logger_accepts_all_channels() {
        let logger = TracingLogger;
        logger.error("e");
        logger.warn("w");
        logger.info("i");
        logger.success("s");
    }
}
