//! Formatter module for custom log formatting

pub mod filters;
pub mod levels;
pub mod styling;

use chrono::Local;
use console::style;
use std::fmt::{self as std_fmt, Debug};
use tracing::Level;
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};

use crate::utils::logging::text_utils;
use filters::should_show_message;
use levels::determine_processing_level;
use styling::{format_level, get_tree_prefix, style_message};

const LINE_WIDTH: usize = 140;

pub struct CleanFormatter {
    show_timestamps: bool,
    use_color: bool,
}

impl CleanFormatter {
    pub fn new(show_timestamps: bool, use_color: bool) -> Self {
        Self {
            show_timestamps,
            use_color,
        }
    }

    fn format_message(&self, message: &str, metadata_level: &Level) -> String {
        let level = determine_processing_level(message);
        let prefix = get_tree_prefix(level);

        let level_indicator = format_level(metadata_level, self.use_color);
        let level_indicator_width = if level_indicator.is_empty() {
            0
        } else {
            console::measure_text_width(&level_indicator) + 1
        };

        // "[HH:MM:SS] " and the tree prefix
        let timestamp_width = if self.show_timestamps { 11 } else { 0 };
        let prefix_width = 2;
        let available_width = LINE_WIDTH
            .saturating_sub(timestamp_width + prefix_width + level_indicator_width + 4);

        // Wrap before styling so ANSI codes do not count toward the width.
        let wrapped = text_utils::wrap_text(message, available_width);
        let level_prefix = if level_indicator.is_empty() {
            String::new()
        } else {
            format!("{} ", level_indicator)
        };

        let mut lines = wrapped.lines();
        let first = lines.next().unwrap_or_default();
        let mut output = format!(
            "{} {}{}",
            prefix,
            level_prefix,
            style_message(first, level, self.use_color)
        );

        let continuation_indent =
            " ".repeat(timestamp_width + prefix_width + level_indicator_width);
        for line in lines {
            output.push('\n');
            output.push_str(&continuation_indent);
            output.push_str(&style_message(line, level, self.use_color));
        }

        output
    }
}

impl<S, N> FormatEvent<S, N> for CleanFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std_fmt::Result {
        let metadata = event.metadata();
        let message = {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            visitor.message
        };

        if !should_show_message(&message) {
            return Ok(());
        }

        let mut output = String::new();

        if self.show_timestamps {
            let now = Local::now().format("%H:%M:%S").to_string();
            let timestamp = if self.use_color {
                style(now).dim().to_string()
            } else {
                now
            };
            output.push_str(&format!("[{}] ", timestamp));
        }

        output.push_str(&self.format_message(&message, metadata.level()));

        writeln!(writer, "{}", output)
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value).trim_matches('"').to_string();
        }
    }
}
