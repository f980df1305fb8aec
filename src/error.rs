use thiserror::Error;

/// Setup, configuration and reporting failures. Mismatches found while checking
/// are never errors, they are counted by the scoreboards.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("predictor depth must be positive, got {0}")]
    InvalidDepth(usize),
    #[error("cannot shrink predictor to depth {depth}: {occupancy} words are pending")]
    DepthBelowOccupancy { depth: usize, occupancy: usize },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("could not write report: {0}")]
    Report(String),
    #[error("mailbox receiver is gone")]
    MailboxClosed,
    #[error("channel {0} is delivering and cannot be rewired")]
    ChannelBusy(String),
}
