use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use std::sync::atomic::{AtomicBool, Ordering};

/// Ambient services of a running search: progress reporting and an
/// external cancellation flag, both optional.
#[derive(Clone, Copy, Default)]
pub struct SearchContext<'a> {
    reporter: Option<&'a ProgressReporter<'a>>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> SearchContext<'a> {
    pub fn new(reporter: &'a ProgressReporter<'a>) -> Self {
        Self {
            reporter: Some(reporter),
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(reporter) = self.reporter {
            reporter.report(event);
        }
    }

    #[inline]
    pub fn check_cancelled(&self) -> Result<(), EngineError> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(EngineError::Cancelled),
            _ => Ok(()),
        }
    }
}
