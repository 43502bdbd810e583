// Development formatters: colored event lines with redacted field values

use crate::redactor::PiiRedactor;
use colored::*;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Colored single-line event formatter
pub struct ColoredFormatter;

impl ColoredFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for ColoredFormatter
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
        let metadata = event.metadata();

        write!(
            writer,
            "{} ",
            chrono::Utc::now().format("%H:%M:%S%.3f").to_string().bright_black()
        )?;

        let level_str = match *metadata.level() {
            Level::TRACE => "TRACE".bright_purple(),
            Level::DEBUG => "DEBUG".bright_blue(),
            Level::INFO => " INFO".bright_green(),
            Level::WARN => " WARN".bright_yellow(),
            Level::ERROR => "ERROR".bright_red(),
        };
        write!(writer, "[{}] ", level_str)?;

        if let Some(target) = metadata.target().split("::").last() {
            write!(writer, "{:<15} ", target.bright_cyan())?;
        }

        ctx.format_fields(writer.by_ref(), event)?;

        if metadata.level() >= &Level::DEBUG {
            if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
                let file_short = file.rsplit('/').next().unwrap_or(file);
                write!(writer, " {}", format!("({}:{})", file_short, line).bright_black())?;
            }
        }

        writeln!(writer)
    }
}

/// Field formatter that runs every recorded value through a [`PiiRedactor`]
pub struct RedactedFields {
    redactor: Option<Arc<PiiRedactor>>,
}

impl RedactedFields {
    pub fn new(redactor: Option<Arc<PiiRedactor>>) -> Self {
        Self { redactor }
    }
}

impl<'writer> FormatFields<'writer> for RedactedFields {
    fn format_fields<R: RecordFields>(&self, writer: Writer<'writer>, fields: R) -> fmt::Result {
        let mut visitor = RedactingVisitor {
            writer,
            redactor: self.redactor.as_deref(),
            is_first: true,
            result: Ok(()),
        };
        fields.record(&mut visitor);
        visitor.result
    }
}

struct RedactingVisitor<'w, 'r> {
    writer: Writer<'w>,
    redactor: Option<&'r PiiRedactor>,
    is_first: bool,
    result: fmt::Result,
}

impl RedactingVisitor<'_, '_> {
    fn write_field(&mut self, field: &Field, value: &str) {
        if self.result.is_err() {
            return;
        }

        let value = match self.redactor {
            Some(redactor) => redactor.redact(value),
            None => value.to_string(),
        };
        let separator = if self.is_first { "" } else { " " };

        self.result = if field.name() == "message" {
            write!(self.writer, "{}{}", separator, value.white().bold())
        } else {
            write!(
                self.writer,
                "{}{}={}",
                separator,
                field.name().bright_yellow(),
                value.bright_white()
            )
        };
        self.is_first = false;
    }
}

impl Visit for RedactingVisitor<'_, '_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        self.write_field(field, &rendered);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.write_field(field, value);
    }
}
