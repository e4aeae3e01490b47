//! ## testlog-core::handler
//! **Rendering records through `tracing-subscriber`**
//!
//! [`TerminalHandler`] owns a formatting subscriber wrapped in a
//! [`Dispatch`] that is only ever entered with
//! [`tracing::dispatcher::with_default`]. Each handler therefore has its own
//! writer and level filter, independent of whatever global subscriber the
//! test binary installed.

use std::fmt;

use tracing::Dispatch;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::level::Level;
use crate::record::Record;

/// Renders and emits records.
pub trait Handler: Send + Sync + fmt::Debug {
    /// Whether a record at `level` would be emitted.
    fn enabled(&self, level: Level) -> bool;

    fn handle(&self, record: &Record<'_>);
}

const TARGET: &str = "testlog";

/// Field present only on critical events. Writers use it to tell a
/// critical line apart from an error line, since both are `ERROR`.
pub const CRIT_FIELD: &str = "crit";

/// Terminal-style handler: one line per record, no timestamps.
pub struct TerminalHandler {
    level: Level,
    source: bool,
    dispatch: Dispatch,
}

impl TerminalHandler {
    /// Handler without source-location annotation.
    pub fn new(writer: BoxMakeWriter, level: Level, ansi: bool) -> Self {
        Self::build(writer, level, ansi, false)
    }

    /// Handler that annotates every record with its call site.
    pub fn with_source(writer: BoxMakeWriter, level: Level, ansi: bool) -> Self {
        Self::build(writer, level, ansi, true)
    }

    fn build(writer: BoxMakeWriter, level: Level, ansi: bool, source: bool) -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_max_level(level.as_level_filter())
            .with_ansi(ansi)
            .with_target(false)
            .without_time()
            .finish();

        Self {
            level,
            source,
            dispatch: Dispatch::new(subscriber),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn source(&self) -> bool {
        self.source
    }
}

impl fmt::Debug for TerminalHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalHandler")
            .field("level", &self.level)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl Handler for TerminalHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record<'_>) {
        if !self.enabled(record.level) {
            return;
        }
        let caller = record
            .caller
            .filter(|_| self.source)
            .map(tracing::field::display);

        tracing::dispatcher::with_default(&self.dispatch, || match record.level {
            Level::Trace => {
                tracing::event!(target: TARGET, tracing::Level::TRACE, caller, "{}", record)
            }
            Level::Debug => {
                tracing::event!(target: TARGET, tracing::Level::DEBUG, caller, "{}", record)
            }
            Level::Info => {
                tracing::event!(target: TARGET, tracing::Level::INFO, caller, "{}", record)
            }
            Level::Warn => {
                tracing::event!(target: TARGET, tracing::Level::WARN, caller, "{}", record)
            }
            Level::Error => {
                tracing::event!(target: TARGET, tracing::Level::ERROR, caller, "{}", record)
            }
            Level::Crit => tracing::event!(
                target: TARGET,
                tracing::Level::ERROR,
                caller,
                crit = true,
                "{}",
                record
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Attrs;
    use crate::writer::CaptureBuffer;
    use parking_lot::Mutex;
    use std::io;
    use std::panic::Location;
    use std::sync::Arc;
    use tracing_subscriber::fmt::MakeWriter;

    /// Records, per event, whether the writer was asked for a critical line.
    #[derive(Clone, Default)]
    struct MarkerLog(Arc<Mutex<Vec<bool>>>);

    impl<'a> MakeWriter<'a> for MarkerLog {
        type Writer = io::Sink;

        fn make_writer(&'a self) -> Self::Writer {
            io::sink()
        }

        fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
            self.0.lock().push(meta.fields().field(CRIT_FIELD).is_some());
            io::sink()
        }
    }

    fn handler(level: Level, source: bool) -> (TerminalHandler, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        let writer = BoxMakeWriter::new(buffer.clone());
        let handler = if source {
            TerminalHandler::with_source(writer, level, false)
        } else {
            TerminalHandler::new(writer, level, false)
        };
        (handler, buffer)
    }

    #[test]
    fn emits_records_at_or_above_minimum() {
        let (handler, buffer) = handler(Level::Info, false);
        handler.handle(&Record::new(Level::Info, "peer connected", Attrs::from_ctx(&[&"id", &7])));
        handler.handle(&Record::new(Level::Debug, "heartbeat", Attrs::new()));

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("peer connected id=7"));
    }

    #[test]
    fn crit_minimum_suppresses_error() {
        let (handler, buffer) = handler(Level::Crit, false);
        assert!(!handler.enabled(Level::Error));
        handler.handle(&Record::new(Level::Error, "disk full", Attrs::new()));
        assert!(buffer.is_empty());

        handler.handle(&Record::new(Level::Crit, "state corrupted", Attrs::new()));
        let out = buffer.contents();
        assert!(out.contains("state corrupted"));
        assert!(out.contains("crit=true"));
    }

    #[test]
    fn annotates_call_site_when_source_enabled() {
        let caller = Location::caller();
        let (with_source, annotated) = handler(Level::Trace, true);
        with_source.handle(&Record::new(Level::Trace, "tick", Attrs::new()).with_caller(caller));
        assert!(annotated.contents().contains(&format!("caller={caller}")));

        let (plain, bare) = handler(Level::Trace, false);
        plain.handle(&Record::new(Level::Trace, "tick", Attrs::new()).with_caller(caller));
        assert!(!bare.contents().contains("caller="));
    }

    #[test]
    fn writers_can_tell_crit_from_error() {
        let markers = MarkerLog::default();
        let handler =
            TerminalHandler::new(BoxMakeWriter::new(markers.clone()), Level::Info, false);
        handler.handle(&Record::new(Level::Error, "disk full", Attrs::new()));
        handler.handle(&Record::new(Level::Crit, "state corrupted", Attrs::new()));
        assert_eq!(*markers.0.lock(), vec![false, true]);
    }

    #[test]
    fn reports_its_configuration() {
        let (annotated, _) = handler(Level::Warn, true);
        assert_eq!(annotated.level(), Level::Warn);
        assert!(annotated.source());
        let (plain, _) = handler(Level::Debug, false);
        assert!(!plain.source());
    }

    #[test]
    fn handlers_do_not_share_output() {
        let (first, first_out) = handler(Level::Info, false);
        let (_second, second_out) = handler(Level::Info, false);
        first.handle(&Record::new(Level::Warn, "only here", Attrs::new()));
        assert!(first_out.contents().contains("only here"));
        assert!(second_out.is_empty());
    }
}
