use thiserror::Error;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("failed to encode or decode message: {0}")]
    Serialization(#[from] bincode::Error),
    #[error("socket task did not finish: {0}")]
    Join(#[from] tokio::task::JoinError),
    /// Nothing pulled the message before the send timeout ran out
    #[error("no consumer took the message")]
    NoConsumer,
    #[error(transparent)]
    Nng(#[from] nng::Error),
}

impl IpcError {
    pub(crate) fn from_send(err: nng::Error) -> Self {
        match err {
            nng::Error::TimedOut => Self::NoConsumer,
            other => Self::Nng(other),
        }
    }
}
