//! What a critical write does after the line is out.

use std::fmt;
use std::sync::Arc;

/// Exit status used after a critical write.
pub const CRIT_EXIT_CODE: i32 = 1;

/// Termination strategy invoked by [`TestLogger::crit`](crate::TestLogger).
///
/// Defaults to exiting the process. Tests that need to exercise the fatal
/// path in-process swap in a closure that records the call instead.
#[derive(Clone)]
pub struct Terminator(Arc<dyn Fn(i32) + Send + Sync>);

impl Terminator {
    pub fn new<F>(terminate: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        Self(Arc::new(terminate))
    }

    pub fn process_exit() -> Self {
        Self::new(|code| std::process::exit(code))
    }

    pub fn terminate(&self, code: i32) {
        (self.0)(code)
    }
}

impl Default for Terminator {
    fn default() -> Self {
        Self::process_exit()
    }
}

impl fmt::Debug for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Terminator")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn injected_strategy_receives_the_code() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let terminator = Terminator::new(move |code| recorder.lock().push(code));

        terminator.clone().terminate(CRIT_EXIT_CODE);
        assert_eq!(*seen.lock(), vec![1]);
    }
}
