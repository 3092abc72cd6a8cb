use anyhow::Context as _;
use chrono::TimeDelta;
use config::Config;
use handler::end_of_game::{EndOfGameHandler, SummarySink};
use handler::gate::EndOfGameGate;
use inbox::payload::{InboxPayload, PayloadRequester};
use inbox::{InboxTracker, Publish};
use std::sync::Arc;
use std::time::Duration;
use the_recap_ipc::r#pub::IpcPublisher;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod handler;
mod inbox;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine, everything can come from the environment
    dotenvy::dotenv().ok();
    setup_tracing_subscriber();

    info!("Loading configuration");
    let config = Config::load(std::env::args().nth(1)).await?;
    if config.my_summoner_name.is_empty() {
        warn!("MY_SUMMONER_NAME is not set, summaries will have no team perspective");
    }

    info!("Setting up channels");
    let (payload_tx, payload_rx) = unbounded_channel::<InboxPayload>();

    info!("Starting Requester task");
    let payload_requester = Arc::new(PayloadRequester::new());
    tokio::task::spawn({
        let payload_requester = payload_requester.clone();
        async move {
            payload_requester.start(payload_tx).await;
        }
    });

    info!("Starting Handler task");
    let sink = match &config.ipc_path {
        Some(path) => SummarySink::Ipc(
            IpcPublisher::new(path).context("Failed to set up summary publisher")?,
        ),
        None => SummarySink::Stdout,
    };
    let cooldown = TimeDelta::try_seconds(config.eog_cooldown_secs)
        .context("EOG_COOLDOWN_SECS is out of range")?;
    let gate = EndOfGameGate::new(cooldown);
    let end_of_game_handler = EndOfGameHandler::new(
        payload_rx,
        config.evaluator.clone(),
        config.my_summoner_name.clone(),
        gate,
        sink,
    );
    tokio::task::spawn(end_of_game_handler.start());

    info!("Watching {}", config.inbox_path.display());
    let mut tracker = InboxTracker::new();
    loop {
        match tracker.scan(&config.inbox_path).await {
            Ok(paths) => {
                for path in paths {
                    debug!("Queueing {}", path.display());
                    payload_requester.push(path).await;
                }
            }
            Err(e) => warn!("Inbox scan failed: {e:?}"),
        }

        debug!("Sleeping {}s...", config.poll_interval_secs);
        tokio::time::sleep(Duration::from_secs(config.poll_interval_secs)).await;
    }
}

fn setup_tracing_subscriber() {
    let layer = fmt::layer()
        .pretty()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_thread_ids(false)
        .with_target(false);
    tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::from_default_env())
        .init();
}
