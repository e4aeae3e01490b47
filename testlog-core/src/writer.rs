//! Output sinks for handlers.
//!
//! libtest only captures what goes through the `print!`/`eprint!` macros,
//! not raw writes to the standard streams. [`TestStderr`] goes through
//! `eprint!` so each test's log lines are shown with that test's result.
//! Critical records are the exception: the process exits right after them,
//! before libtest would replay the capture, so they go to stderr directly.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;

use crate::handler::CRIT_FIELD;

/// Stderr sink that cooperates with libtest output capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestStderr;

/// Writer handed out by [`TestStderr`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TestStderrWriter {
    bypass_capture: bool,
}

impl TestStderrWriter {
    /// Whether output skips libtest capture and goes straight to stderr.
    pub fn bypasses_capture(&self) -> bool {
        self.bypass_capture
    }
}

impl io::Write for TestStderrWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.bypass_capture {
            let mut stderr = io::stderr().lock();
            stderr.write_all(buf)?;
            stderr.flush()?;
        } else {
            eprint!("{}", String::from_utf8_lossy(buf));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.bypass_capture {
            io::stderr().flush()?;
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for TestStderr {
    type Writer = TestStderrWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TestStderrWriter::default()
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        TestStderrWriter {
            bypass_capture: meta.fields().field(CRIT_FIELD).is_some(),
        }
    }
}

/// Shared in-memory sink for asserting on rendered output.
///
/// Clones write to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl io::Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureBuffer {
    type Writer = CaptureBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
