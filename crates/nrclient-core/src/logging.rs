//! Per-configuration structured logger.
//!
//! A [`Logger`] owns its own `tracing` dispatcher, so its threshold and output
//! format are independent of whatever subscriber the host process installed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

use crate::error::ConfigError;

/// Severity threshold, from most to least severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Panic,
    Fatal,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Panic,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Panic => "panic",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// The logger only emits error and below, so panic and fatal thresholds
    /// let nothing through.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Panic | Self::Fatal => LevelFilter::OFF,
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownLogLevel(s.to_owned()))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, <Self as TryFrom<String>>::Error> {
        s.parse()
    }
}

#[derive(Default)]
struct FieldCollector {
    message: String,
    fields: Vec<(&'static str, Value)>,
}

impl FieldCollector {
    fn push(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, Value::from(format!("{value:?}")));
    }
}

/// Writes each event with the logger's default fields as top-level keys,
/// either as one JSON object per line or as `key=value` pairs.
struct EventFormat {
    default_fields: BTreeMap<String, String>,
    json: bool,
}

impl EventFormat {
    fn write_json(
        &self,
        writer: &mut Writer<'_>,
        timestamp: String,
        event: &Event<'_>,
        collected: FieldCollector,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut object = serde_json::Map::new();
        object.insert("timestamp".into(), Value::from(timestamp));
        object.insert("level".into(), Value::from(meta.level().to_string()));
        object.insert("target".into(), Value::from(meta.target()));
        object.insert("message".into(), Value::from(collected.message));
        for (key, value) in &self.default_fields {
            object.insert(key.clone(), Value::from(value.as_str()));
        }
        for (key, value) in collected.fields {
            object.insert(key.to_owned(), value);
        }
        writeln!(writer, "{}", Value::Object(object))
    }

    fn write_plain(
        &self,
        writer: &mut Writer<'_>,
        timestamp: &str,
        event: &Event<'_>,
        collected: FieldCollector,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{timestamp} {:>5} {}: {}",
            meta.level(),
            meta.target(),
            collected.message
        )?;
        for (key, value) in &self.default_fields {
            write!(writer, " {key}={value}")?;
        }
        for (key, value) in collected.fields {
            match value {
                Value::String(s) => write!(writer, " {key}={s}")?,
                other => write!(writer, " {key}={other}")?,
            }
        }
        writeln!(writer)
    }
}

impl<S, N> FormatEvent<S, N> for EventFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut collected = FieldCollector::default();
        event.record(&mut collected);

        let mut timestamp = String::new();
        SystemTime.format_time(&mut Writer::new(&mut timestamp))?;

        if self.json {
            self.write_json(&mut writer, timestamp, event, collected)
        } else {
            self.write_plain(&mut writer, &timestamp, event, collected)
        }
    }
}

/// Builder for [`Logger`]. Output goes to stderr unless a writer is given.
#[derive(Default)]
pub struct LoggerBuilder {
    default_fields: BTreeMap<String, String>,
    json: bool,
    level: LogLevel,
    writer: Option<BoxMakeWriter>,
}

impl LoggerBuilder {
    /// Fields written as top-level keys on every event from the logger.
    #[must_use]
    pub fn default_fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.default_fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    #[must_use]
    pub fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        let writer = self
            .writer
            .unwrap_or_else(|| BoxMakeWriter::new(std::io::stderr));
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.level.level_filter())
            .with_writer(writer)
            .with_ansi(false)
            .event_format(EventFormat {
                default_fields: self.default_fields.clone(),
                json: self.json,
            })
            .finish();

        Logger {
            default_fields: self.default_fields,
            json: self.json,
            level: self.level,
            dispatch: Dispatch::new(subscriber),
        }
    }
}

/// Structured logger with default fields, a severity threshold and an
/// optional JSON format.
pub struct Logger {
    default_fields: BTreeMap<String, String>,
    json: bool,
    level: LogLevel,
    dispatch: Dispatch,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("default_fields", &self.default_fields)
            .field("json", &self.json)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.json
    }

    #[must_use]
    pub fn default_fields(&self) -> &BTreeMap<String, String> {
        &self.default_fields
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.scoped(|| tracing::error!("{message}"));
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.scoped(|| tracing::warn!("{message}"));
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.scoped(|| tracing::info!("{message}"));
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.scoped(|| tracing::debug!("{message}"));
    }

    pub fn trace(&self, message: impl fmt::Display) {
        self.scoped(|| tracing::trace!("{message}"));
    }

    fn scoped(&self, emit: impl FnOnce()) {
        tracing::dispatcher::with_default(&self.dispatch, emit);
    }
}
