//! Assembling a [`TestLogger`]: handler, writer, prefix, terminator.

use std::sync::Arc;

use testlog_config::{Target, TestLogConfig};
use testlog_core::{CaptureBuffer, Handler, Level, StructuredLogger, TerminalHandler, TestStderr};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter, TestWriter};

use crate::logger::TestLogger;
use crate::terminate::Terminator;

/// Builder for [`TestLogger`]. Defaults match [`TestLogConfig::default`].
#[derive(Debug)]
pub struct TestLoggerBuilder {
    level: Level,
    prefix: String,
    target: Target,
    writer: Option<BoxMakeWriter>,
    ansi: bool,
    source: bool,
    terminator: Terminator,
}

impl Default for TestLoggerBuilder {
    fn default() -> Self {
        Self::from_config(&TestLogConfig::default())
    }
}

impl TestLoggerBuilder {
    pub fn from_config(config: &TestLogConfig) -> Self {
        Self {
            level: config.level,
            prefix: config.prefix.clone(),
            target: config.target,
            writer: None,
            ansi: config.ansi,
            source: config.source,
            terminator: Terminator::default(),
        }
    }

    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Writes to `writer` instead of the configured target.
    #[must_use]
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    /// Writes into `buffer`, for asserting on output.
    #[must_use]
    pub fn capture(self, buffer: &CaptureBuffer) -> Self {
        self.writer(buffer.clone())
    }

    #[must_use]
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Annotate lines with the call site (on by default).
    #[must_use]
    pub fn source(mut self, source: bool) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn build(self) -> TestLogger {
        let writer = self.writer.unwrap_or_else(|| target_writer(self.target));
        let handler: Arc<dyn Handler> = if self.source {
            Arc::new(TerminalHandler::with_source(writer, self.level, self.ansi))
        } else {
            Arc::new(TerminalHandler::new(writer, self.level, self.ansi))
        };

        tracing::debug!(
            level = %self.level,
            prefix = %self.prefix,
            target = ?self.target,
            "test logger attached"
        );

        TestLogger::wrap(
            Box::new(StructuredLogger::from_handler(handler)),
            &self.prefix,
            self.terminator,
        )
    }
}

fn target_writer(target: Target) -> BoxMakeWriter {
    match target {
        Target::Stderr => BoxMakeWriter::new(TestStderr),
        Target::Test => BoxMakeWriter::new(TestWriter::default),
    }
}
