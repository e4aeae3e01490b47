//! # testlog
//!
//! Loggers for unit tests. Output goes through `eprint!`, so libtest keeps
//! each test's lines with that test's result instead of spilling them onto
//! the terminal, and a minimum level plus an optional prefix keep it
//! readable.
//!
//! ```no_run
//! use testlog::{Level, Logger};
//!
//! let log = testlog::logger(Level::Info, Some("[sync]"));
//! log.info("peer connected", &[&"id", &7]);
//! log.debug("heartbeat", &[]); // below the minimum, not rendered
//!
//! let pool = log.with(&[&"module", &"txpool"]);
//! pool.warn("pool full", &[]);
//! ```
//!
//! `crit` writes the record and then exits the process with status 1. Use
//! [`TestLoggerBuilder::terminator`] to observe it without dying.

mod builder;
mod logger;
mod terminate;

pub use builder::TestLoggerBuilder;
pub use logger::{TestLogger, WriteLock};
pub use terminate::{Terminator, CRIT_EXIT_CODE};

pub use testlog_config::{ConfigError, Target, TestLogConfig};
pub use testlog_core::{
    Attr, Attrs, CaptureBuffer, Ctx, Handler, Level, Logger, Record, StructuredLogger,
    TerminalHandler, TestStderr,
};

pub mod prelude {
    pub use crate::{Level, Logger, TestLogger, TestLoggerBuilder};
}

/// Logger rendering to stderr at `level` and above, with call sites.
///
/// `prefix`, when present and non-empty, is put in front of every message.
pub fn logger(level: Level, prefix: Option<&str>) -> TestLogger {
    TestLogger::builder()
        .level(level)
        .prefix(prefix.unwrap_or_default())
        .build()
}

/// Logger configured from `testlog.yaml` and `TESTLOG_*` variables.
pub fn from_env() -> Result<TestLogger, ConfigError> {
    let config = TestLogConfig::load()?;
    Ok(TestLoggerBuilder::from_config(&config).build())
}
