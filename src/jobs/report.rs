use tracing::{error, info, warn};

/// Sink for per-item outcomes. Orchestrators report every success, failure
/// and warning here instead of printing.
pub trait Reporter {
    fn success(&mut self, message: &str);
    fn failure(&mut self, message: &str);
    fn warning(&mut self, message: &str);
}

/// Prints outcomes for a person at a terminal. With `mirror` set, every
/// outcome is also logged; use it when the log goes to a file, otherwise
/// the terminal shows everything twice.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    mirror: bool,
}

impl ConsoleReporter {
    pub fn new(mirror: bool) -> Self {
        Self { mirror }
    }
}

impl Reporter for ConsoleReporter {
    fn success(&mut self, message: &str) {
        println!("✓ {message}");
        if self.mirror {
            info!("{message}");
        }
    }

    fn failure(&mut self, message: &str) {
        eprintln!("✗ {message}");
        if self.mirror {
            error!("{message}");
        }
    }

    fn warning(&mut self, message: &str) {
        eprintln!("! {message}");
        if self.mirror {
            warn!("{message}");
        }
    }
}

/// Running success/failure counts for a batch. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub successful: u32,
    pub failed: u32,
}

impl BatchResult {
    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> u32 {
        self.successful + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
