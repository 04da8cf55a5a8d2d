/// Sink for the engine's progress messages.
///
/// The engine only calls it when [`BatchConfig::verbose`](super::BatchConfig::verbose)
/// is set. Loggers are shared with every group in flight, so they must be
/// `Send + Sync`.
pub trait BatchLogger: Send + Sync {
    fn log(&self, message: &str);
}

/// Discards every message. The default logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl BatchLogger for NoopLogger {
    fn log(&self, _message: &str) {}
}

/// Forwards messages to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLogger;

impl BatchLogger for LogLogger {
    fn log(&self, message: &str) {
        log::info!(target: "sqsbulk::batch", "{message}");
    }
}

impl<F> BatchLogger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}
