//! # testlog-core
//!
//! Structured logging layer the test facade delegates to.
//! Records carry a [`Level`], a message and key/value [`Attrs`]; a
//! [`Handler`] renders them. The terminal handler sits on top of
//! `tracing-subscriber`'s formatter, scoped to its own dispatcher so that
//! nothing here touches the global subscriber.
//!
//! ### Key Submodules:
//! - `level`: ordered severities and their mapping onto `tracing`
//! - `record`: context pairing and logfmt-style rendering
//! - `handler`: the `Handler` seam and `TerminalHandler`
//! - `logger`: the `Logger` capability surface and `StructuredLogger`
//! - `writer`: sinks that play well with libtest output capture

pub mod handler;
pub mod level;
pub mod logger;
pub mod record;
pub mod writer;

pub mod prelude {
    pub use crate::handler::*;
    pub use crate::level::*;
    pub use crate::logger::*;
    pub use crate::record::*;
    pub use crate::writer::*;
}

pub use handler::{Handler, TerminalHandler, CRIT_FIELD};
pub use level::{Level, ParseLevelError};
pub use logger::{Ctx, Logger, StructuredLogger};
pub use record::{Attr, Attrs, Record};
pub use writer::{CaptureBuffer, TestStderr, TestStderrWriter};
