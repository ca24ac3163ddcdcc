//! Logging setup on top of tracing-subscriber
//!
//! Everything goes to stderr. The `github` format renders events as CI
//! workflow commands so errors and warnings show up as annotations.

use clap::ValueEnum;
use std::fmt;
use std::io::{self, IsTerminal};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
    /// `::error::` / `::warning::` workflow commands
    Github,
}

/// Install the global subscriber. Filter comes from `RUST_LOG`, default `info`.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(io::stderr().is_terminal())
                    .with_target(false),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr),
            )
            .init(),
        LogFormat::Github => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(GithubFormat)
                    .with_writer(io::stderr),
            )
            .init(),
    }
}

/// Workflow command formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubFormat;

impl GithubFormat {
    fn command(level: &Level) -> Option<&'static str> {
        match *level {
            Level::ERROR => Some("error"),
            Level::WARN => Some("warning"),
            Level::INFO => None,
            _ => Some("debug"),
        }
    }
}

impl<S, N> FormatEvent<S, N> for GithubFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut message), event)?;

        match Self::command(event.metadata().level()) {
            Some(command) => writeln!(writer, "::{}::{}", command, escape_data(&message)),
            None => writeln!(writer, "{}", escape_plain(&message)),
        }
    }
}

/// Escape a workflow command payload so it stays on one line
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Keep a plain line from being read as a workflow command.
///
/// Line breaks are escaped so no part of the message starts a line, and a
/// message that itself starts with `::` has its first colon encoded.
pub fn escape_plain(message: &str) -> String {
    let line = message.replace('\r', "%0D").replace('\n', "%0A");
    match line.strip_prefix(':') {
        Some(rest) if rest.starts_with(':') => format!("%3A{rest}"),
        _ => line,
    }
}
