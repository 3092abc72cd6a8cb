use anyhow::Context as _;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

pub mod payload;

const PAYLOAD_EXTENSION: &str = "json";
const CLUTCH_SUFFIX: &str = ".clutch.json";

pub trait Publish {
    type Input;
    type Output;

    async fn push(&self, data: Self::Input);
    async fn start(&self, publishing_channel: UnboundedSender<Self::Output>);
}

/// End-of-match payloads are `*.json` files. Clutch sidecars share the
/// extension but are not payloads.
pub fn is_payload(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    path.extension().is_some_and(|ext| ext == PAYLOAD_EXTENSION) && !name.ends_with(CLUTCH_SUFFIX)
}

/// `game.json` keeps its clutch stats in `game.clutch.json`.
pub fn clutch_path(payload: &Path) -> PathBuf {
    payload.with_extension(&CLUTCH_SUFFIX[1..])
}

/// Payload files currently in `dir`, sorted by name.
pub async fn list_payloads(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read inbox {}", dir.display()))?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_payload(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

/// Remembers the payload files already queued and what they looked like at
/// the time. A file that is rewritten, e.g. one caught mid-write, is queued
/// again. Files that leave the inbox are forgotten.
#[derive(Debug, Default)]
pub struct InboxTracker {
    queued: HashMap<PathBuf, FileStamp>,
}

impl InboxTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload files in `dir` that are new or changed since the last scan.
    pub async fn scan(&mut self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut present = HashMap::new();
        let mut changed = Vec::new();
        for path in list_payloads(dir).await? {
            let metadata = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!("{} disappeared during scan: {e}", path.display());
                    continue;
                }
            };
            let stamp = FileStamp {
                len: metadata.len(),
                modified: metadata.modified().ok(),
            };
            if self.queued.get(&path) != Some(&stamp) {
                changed.push(path.clone());
            }
            present.insert(path, stamp);
        }
        self.queued = present;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_names() {
        assert!(is_payload(Path::new("inbox/4242.json")));
        assert!(!is_payload(Path::new("inbox/4242.clutch.json")));
        assert!(!is_payload(Path::new("inbox/4242.json.tmp")));
        assert!(!is_payload(Path::new("inbox/notes")));
    }

    #[test]
    fn sidecar_next_to_payload() {
        assert_eq!(
            clutch_path(Path::new("inbox/4242.json")),
            PathBuf::from("inbox/4242.clutch.json")
        );
    }

    #[tokio::test]
    async fn tracker_requeues_rewritten_files() {
        let dir = std::env::temp_dir().join(format!("recap-tracker-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let game = dir.join("77.json");
        std::fs::write(&game, r#"{ "gameId": 77, "partic"#).unwrap();
        std::fs::write(dir.join("77.clutch.json"), "{}").unwrap();

        let mut tracker = InboxTracker::new();
        assert_eq!(tracker.scan(&dir).await.unwrap(), vec![game.clone()]);
        assert!(tracker.scan(&dir).await.unwrap().is_empty());

        std::fs::write(&game, r#"{ "gameId": 77, "participants": [] }"#).unwrap();
        assert_eq!(tracker.scan(&dir).await.unwrap(), vec![game.clone()]);
        assert!(tracker.scan(&dir).await.unwrap().is_empty());

        std::fs::remove_file(&game).unwrap();
        assert!(tracker.scan(&dir).await.unwrap().is_empty());
        assert!(tracker.queued.is_empty());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
