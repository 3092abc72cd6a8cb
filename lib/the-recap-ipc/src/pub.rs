use crate::error::IpcError;
use nng::options::{Options, SendTimeout};
use nng::Socket;
use serde::Serialize;
use std::time::Duration;
use std::{marker::PhantomData, sync::Arc};
use tracing::debug;

/// How long a summary waits for a consumer before it is given up on.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Pushes summaries to whichever consumer is listening on the url. The
/// consumer may start after the publisher; until it does, each publish waits
/// up to the send timeout and then fails with [`IpcError::NoConsumer`].
#[derive(Debug)]
pub struct IpcPublisher<T: Serialize> {
    socket: Arc<Socket>,
    _data_type: PhantomData<T>,
}

impl<T: Serialize + Send + Sync> IpcPublisher<T> {
    pub fn new(url: &str) -> Result<Self, IpcError> {
        Self::with_send_timeout(url, DEFAULT_SEND_TIMEOUT)
    }

    pub fn with_send_timeout(url: &str, timeout: Duration) -> Result<Self, IpcError> {
        let socket = Socket::new(nng::Protocol::Push0)?;
        socket.set_opt::<SendTimeout>(Some(timeout))?;
        socket.dial_async(url)?;
        debug!("Publishing to {url} (send timeout {timeout:?})");
        Ok(Self {
            socket: Arc::new(socket),
            _data_type: PhantomData,
        })
    }

    pub async fn publish(&self, data: T) -> Result<(), IpcError> {
        let bytes = bincode::serialize(&data)?;
        let len = bytes.len();
        let socket = self.socket.clone();
        tokio::task::spawn_blocking(move || socket.send(&bytes[..]).map_err(|(_, err)| err))
            .await?
            .map_err(IpcError::from_send)?;
        debug!("Published {len} byte message");
        Ok(())
    }
}
