use anyhow::Context as _;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use the_recap_evaluation::MatchEvaluator;
use tokio::fs::read_to_string;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name of the player whose perspective summaries take
    pub my_summoner_name: String,
    /// Directory polled for end-of-match payload documents
    pub inbox_path: PathBuf,
    pub poll_interval_secs: u64,
    /// Minimum gap between two processed end-of-match events
    pub eog_cooldown_secs: i64,
    /// Publish summaries here instead of printing them
    pub ipc_path: Option<String>,
    pub evaluator: MatchEvaluator,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            my_summoner_name: String::new(),
            inbox_path: PathBuf::from("inbox"),
            poll_interval_secs: 3,
            eog_cooldown_secs: 30,
            ipc_path: None,
            evaluator: MatchEvaluator::default(),
        }
    }
}

impl Config {
    pub async fn load(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path).await?,
            None => Default::default(),
        };

        config.my_summoner_name = std::env::var("MY_SUMMONER_NAME")
            .ok()
            .unwrap_or(config.my_summoner_name);
        config.inbox_path = std::env::var("INBOX_PATH")
            .map(PathBuf::from)
            .ok()
            .unwrap_or(config.inbox_path);
        config.poll_interval_secs = env_number("POLL_INTERVAL_SECS")?
            .unwrap_or(config.poll_interval_secs);
        config.eog_cooldown_secs =
            env_number("EOG_COOLDOWN_SECS")?.unwrap_or(config.eog_cooldown_secs);
        config.ipc_path = std::env::var("IPC_PATH").ok().or(config.ipc_path);

        Ok(config)
    }

    async fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Ok(toml::from_str(&contents)?)
    }
}

fn env_number<T: FromStr>(key: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::var(key)
        .ok()
        .map(|value| value.parse())
        .transpose()
        .with_context(|| format!("{key} should be numeric"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_file() {
        let config: Config = toml::from_str(
            r#"
            my_summoner_name = "Faker#KR1"
            inbox_path = "/var/lib/recap/inbox"
            poll_interval_secs = 5
            ipc_path = "ipc:///tmp/recap.ipc"

            [evaluator.afk_thresholds]
            min_game_minutes = 12.0
            max_gold_earned = 3500
            "#,
        )
        .unwrap();

        assert_eq!(config.my_summoner_name, "Faker#KR1");
        assert_eq!(config.inbox_path, PathBuf::from("/var/lib/recap/inbox"));
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.eog_cooldown_secs, 30);
        assert_eq!(config.ipc_path.as_deref(), Some("ipc:///tmp/recap.ipc"));

        let thresholds = config.evaluator.afk_thresholds();
        assert_eq!(thresholds.min_game_minutes, 12.0);
        assert_eq!(thresholds.max_gold_earned, 3500);
        assert_eq!(thresholds.max_damage_to_champions, 1500);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.inbox_path, PathBuf::from("inbox"));
        assert_eq!(config.poll_interval_secs, 3);
        assert_eq!(config.ipc_path, None);
        assert_eq!(config.evaluator.afk_thresholds().min_game_minutes, 10.0);
    }
}
