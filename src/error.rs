use flexi_logger::FlexiLoggerError;

/// Failures that can stop the application before or while the window runs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The log specification was invalid or the log file could not be opened.
    #[error("failed to start logger: {0}")]
    Logger(#[from] FlexiLoggerError),
    /// The windowing or rendering backend gave up.
    #[error("gui terminated: {0}")]
    Gui(#[from] iced::Error),
}
