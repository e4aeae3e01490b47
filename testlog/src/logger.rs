//! ## testlog::logger
//! **Serialized, prefixing facade over a structured logger**
//!
//! Every leveled write takes the write lock, prefixes the message and hands
//! the record to the delegate. Loggers derived with [`Logger::with`] keep
//! the same lock, prefix and terminator, so writes through any handle of one
//! family never interleave.
//!
//! [`Logger::log`] is the exception: it prefixes and forwards without taking
//! the lock. Concurrent `log` calls may interleave with guarded writes.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use parking_lot::Mutex;
use testlog_core::{Ctx, Handler, Level, Logger};

use crate::builder::TestLoggerBuilder;
use crate::terminate::{Terminator, CRIT_EXIT_CODE};

/// Lock shared by a logger and everything derived from it.
pub type WriteLock = Arc<Mutex<()>>;

pub struct TestLogger {
    delegate: Box<dyn Logger>,
    lock: WriteLock,
    prefix: Arc<str>,
    terminate: Terminator,
}

impl TestLogger {
    pub fn builder() -> TestLoggerBuilder {
        TestLoggerBuilder::default()
    }

    /// Wraps `delegate` with a fresh lock.
    pub fn wrap(delegate: Box<dyn Logger>, prefix: &str, terminate: Terminator) -> Self {
        Self {
            delegate,
            lock: WriteLock::default(),
            prefix: Arc::from(prefix),
            terminate,
        }
    }

    /// Derives a logger of the concrete type, bound to `ctx`.
    pub fn derive(&self, ctx: Ctx<'_>) -> TestLogger {
        TestLogger {
            delegate: self.delegate.with(ctx),
            lock: Arc::clone(&self.lock),
            prefix: Arc::clone(&self.prefix),
            terminate: self.terminate.clone(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether both loggers serialize on the same lock.
    pub fn shares_lock_with(&self, other: &TestLogger) -> bool {
        Arc::ptr_eq(&self.lock, &other.lock)
    }

    fn prefixed<'m>(&self, msg: &'m str) -> Cow<'m, str> {
        if self.prefix.is_empty() {
            Cow::Borrowed(msg)
        } else {
            Cow::Owned(format!("{} {}", self.prefix, msg))
        }
    }

    #[track_caller]
    fn guarded_write(&self, level: Level, msg: &str, ctx: Ctx<'_>) {
        let _guard = self.lock.lock();
        self.write(level, msg, ctx);
    }

    #[cfg(test)]
    pub(crate) fn write_lock(&self) -> WriteLock {
        Arc::clone(&self.lock)
    }
}

impl fmt::Debug for TestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestLogger")
            .field("prefix", &self.prefix)
            .field("handler", &self.delegate.handler())
            .finish_non_exhaustive()
    }
}

impl Logger for TestLogger {
    fn with(&self, ctx: Ctx<'_>) -> Box<dyn Logger> {
        Box::new(self.derive(ctx))
    }

    /// Unguarded: does not take the write lock.
    #[track_caller]
    fn log(&self, level: Level, msg: &str, ctx: Ctx<'_>) {
        self.write(level, msg, ctx);
    }

    #[track_caller]
    fn trace(&self, msg: &str, ctx: Ctx<'_>) {
        self.guarded_write(Level::Trace, msg, ctx);
    }

    #[track_caller]
    fn debug(&self, msg: &str, ctx: Ctx<'_>) {
        self.guarded_write(Level::Debug, msg, ctx);
    }

    #[track_caller]
    fn info(&self, msg: &str, ctx: Ctx<'_>) {
        self.guarded_write(Level::Info, msg, ctx);
    }

    #[track_caller]
    fn warn(&self, msg: &str, ctx: Ctx<'_>) {
        self.guarded_write(Level::Warn, msg, ctx);
    }

    #[track_caller]
    fn error(&self, msg: &str, ctx: Ctx<'_>) {
        self.guarded_write(Level::Error, msg, ctx);
    }

    /// Writes at `Crit`, then terminates while still holding the lock.
    #[track_caller]
    fn crit(&self, msg: &str, ctx: Ctx<'_>) {
        let _guard = self.lock.lock();
        self.write(Level::Crit, msg, ctx);
        tracing::debug!(code = CRIT_EXIT_CODE, "critical record written, terminating");
        self.terminate.terminate(CRIT_EXIT_CODE);
    }

    fn write_at(&self, level: Level, msg: &str, ctx: Ctx<'_>, caller: &'static Location<'static>) {
        let msg = self.prefixed(msg);
        self.delegate.write_at(level, &msg, ctx, caller);
    }

    /// Always true; the handler applies the minimum level.
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn handler(&self) -> Arc<dyn Handler> {
        self.delegate.handler()
    }
}
