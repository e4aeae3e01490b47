//! The logger capability surface and the plain structured logger.
//!
//! [`Logger`] is what test code holds: leveled writes, context derivation
//! and access to the handler. [`StructuredLogger`] is the straightforward
//! implementation, a handler plus the context bound so far.

use std::fmt::Display;
use std::panic::Location;
use std::sync::Arc;

use crate::handler::Handler;
use crate::level::Level;
use crate::record::{Attrs, Record};

/// Alternating key/value context, e.g. `&[&"id", &7]`.
pub type Ctx<'a> = &'a [&'a dyn Display];

/// Leveled, context-carrying logger.
///
/// Write methods are meant to be `#[track_caller]` in implementations so
/// that the recorded call site is the caller's, not the logger's.
pub trait Logger: Send + Sync {
    /// Returns a logger with `ctx` bound to every record it writes.
    fn with(&self, ctx: Ctx<'_>) -> Box<dyn Logger>;

    /// Same as [`Logger::with`].
    #[allow(clippy::new_ret_no_self)]
    fn new(&self, ctx: Ctx<'_>) -> Box<dyn Logger> {
        self.with(ctx)
    }

    fn log(&self, level: Level, msg: &str, ctx: Ctx<'_>);

    fn trace(&self, msg: &str, ctx: Ctx<'_>);
    fn debug(&self, msg: &str, ctx: Ctx<'_>);
    fn info(&self, msg: &str, ctx: Ctx<'_>);
    fn warn(&self, msg: &str, ctx: Ctx<'_>);
    fn error(&self, msg: &str, ctx: Ctx<'_>);
    fn crit(&self, msg: &str, ctx: Ctx<'_>);

    /// Writes a record attributed to the caller of this method.
    #[track_caller]
    fn write(&self, level: Level, msg: &str, ctx: Ctx<'_>) {
        self.write_at(level, msg, ctx, Location::caller())
    }

    /// Writes a record attributed to `caller`.
    fn write_at(&self, level: Level, msg: &str, ctx: Ctx<'_>, caller: &'static Location<'static>);

    fn enabled(&self, level: Level) -> bool;

    fn handler(&self) -> Arc<dyn Handler>;
}

/// A handler plus bound context.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    handler: Arc<dyn Handler>,
    attrs: Attrs,
}

impl StructuredLogger {
    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            attrs: Attrs::new(),
        }
    }

    /// Context bound to this logger.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Derives a logger of the concrete type.
    pub fn derive(&self, ctx: Ctx<'_>) -> StructuredLogger {
        StructuredLogger {
            handler: Arc::clone(&self.handler),
            attrs: self.attrs.chain(Attrs::from_ctx(ctx)),
        }
    }
}

impl Logger for StructuredLogger {
    fn with(&self, ctx: Ctx<'_>) -> Box<dyn Logger> {
        Box::new(self.derive(ctx))
    }

    #[track_caller]
    fn log(&self, level: Level, msg: &str, ctx: Ctx<'_>) {
        self.write(level, msg, ctx)
    }

    #[track_caller]
    fn trace(&self, msg: &str, ctx: Ctx<'_>) {
        self.write(Level::Trace, msg, ctx)
    }

    #[track_caller]
    fn debug(&self, msg: &str, ctx: Ctx<'_>) {
        self.write(Level::Debug, msg, ctx)
    }

    #[track_caller]
    fn info(&self, msg: &str, ctx: Ctx<'_>) {
        self.write(Level::Info, msg, ctx)
    }

    #[track_caller]
    fn warn(&self, msg: &str, ctx: Ctx<'_>) {
        self.write(Level::Warn, msg, ctx)
    }

    #[track_caller]
    fn error(&self, msg: &str, ctx: Ctx<'_>) {
        self.write(Level::Error, msg, ctx)
    }

    /// Writes at `Crit`. Unlike the test facade this does not terminate.
    #[track_caller]
    fn crit(&self, msg: &str, ctx: Ctx<'_>) {
        self.write(Level::Crit, msg, ctx)
    }

    fn write_at(&self, level: Level, msg: &str, ctx: Ctx<'_>, caller: &'static Location<'static>) {
        if !self.handler.enabled(level) {
            return;
        }
        let attrs = self.attrs.chain(Attrs::from_ctx(ctx));
        self.handler
            .handle(&Record::new(level, msg, attrs).with_caller(caller));
    }

    fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    fn handler(&self) -> Arc<dyn Handler> {
        Arc::clone(&self.handler)
    }
}
