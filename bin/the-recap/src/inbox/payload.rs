use super::{clutch_path, Publish};
use anyhow::Context as _;
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use the_recap_evaluation::clutch::ClutchStats;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::{Mutex, Notify};
use tracing::{debug, error, warn};

/// A decoded end-of-match document and whatever the live monitor recorded
/// for the same game.
#[derive(Debug)]
pub struct InboxPayload {
    pub path: PathBuf,
    pub game_id: Option<String>,
    pub payload: Value,
    pub clutch: BTreeMap<String, ClutchStats>,
}

/// Requester for reading end-of-match payload files queued by the inbox
/// poller.
#[derive(Debug, Default)]
pub struct PayloadRequester {
    queue: Mutex<VecDeque<PathBuf>>,
    queued: Notify,
}

impl PayloadRequester {
    pub fn new() -> Self {
        Self::default()
    }

    async fn read(&self, path: &Path) -> anyhow::Result<InboxPayload> {
        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let payload: Value = serde_json::from_slice(&contents)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;

        Ok(InboxPayload {
            path: path.to_path_buf(),
            game_id: the_recap_telemetry::game_id(&payload),
            payload,
            clutch: read_clutch(&clutch_path(path)).await,
        })
    }
}

/// A missing or unreadable sidecar just means no clutch stats.
async fn read_clutch(path: &Path) -> BTreeMap<String, ClutchStats> {
    let contents = match tokio::fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            warn!("Ignoring clutch stats at {}: {e}", path.display());
            return BTreeMap::new();
        }
    };
    serde_json::from_slice(&contents).unwrap_or_else(|e| {
        warn!("Ignoring malformed clutch stats at {}: {e}", path.display());
        BTreeMap::new()
    })
}

impl Publish for PayloadRequester {
    type Input = PathBuf;
    type Output = InboxPayload;

    /// Push a payload file to the queue to be read.
    async fn push(&self, data: Self::Input) {
        let mut lock = self.queue.lock().await;
        lock.push_back(data);
        drop(lock);
        self.queued.notify_one();
    }

    /// Loop the queue, reading and decoding each payload file.
    ///
    /// Decoded payloads are pushed to the provided publishing channel.
    #[tracing::instrument(skip(self, publishing_channel))]
    async fn start(&self, publishing_channel: UnboundedSender<Self::Output>) {
        loop {
            let next = self.queue.lock().await.pop_front();
            let Some(path) = next else {
                self.queued.notified().await;
                continue;
            };

            match self.read(&path).await {
                Ok(payload) => {
                    debug!(
                        "Read payload {} (game {:?})",
                        path.display(),
                        payload.game_id
                    );
                    if publishing_channel.send(payload).is_err() {
                        error!("Payload channel closed, stopping requester");
                        return;
                    }
                }
                Err(e) => error!("Skipping payload: {e:?}"),
            }
        }
    }
}
