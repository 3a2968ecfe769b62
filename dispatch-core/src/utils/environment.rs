use std::sync::Arc;

/// A logger type which is called with messages about irregular or noteworthy events.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps track of the environment specific settings which are not part of the algorithm's configuration.
#[derive(Clone)]
pub struct Environment {
    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates a new instance of `Environment` with the given logger.
    pub fn new(logger: InfoLogger) -> Self {
        Self { logger }
    }

    /// Creates a new instance of `Environment` which discards all messages.
    pub fn silent() -> Self {
        Self { logger: Arc::new(|_| {}) }
    }

    /// Passes a message to the logger.
    pub fn log(&self, message: &str) {
        (self.logger)(message)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self { logger: Arc::new(|msg| println!("{msg}")) }
    }
}
