use crate::error::IpcError;
use nng::Socket;
use serde::de::DeserializeOwned;
use std::{marker::PhantomData, sync::Arc};
use tracing::debug;

/// The consuming end. It owns the address, so it can be started before or
/// after the publisher.
#[derive(Debug)]
pub struct IpcSubscriber<T: DeserializeOwned> {
    socket: Arc<Socket>,
    _data_type: PhantomData<T>,
}

impl<T: DeserializeOwned + Send + Sync> IpcSubscriber<T> {
    pub fn new(url: &str) -> Result<Self, IpcError> {
        let socket = Arc::new(Socket::new(nng::Protocol::Pull0)?);
        socket.listen(url)?;
        debug!("Listening for summaries on {url}");
        Ok(Self {
            socket,
            _data_type: PhantomData,
        })
    }

    /// Wait for the next message.
    pub async fn recv(&self) -> Result<T, IpcError> {
        let socket = self.socket.clone();
        let message = tokio::task::spawn_blocking(move || socket.recv()).await??;
        Ok(bincode::deserialize(&message)?)
    }
}
