use super::gate::{Admission, EndOfGameGate};
use crate::inbox::payload::InboxPayload;
use chrono::Utc;
use the_recap_evaluation::clutch::integrate_clutch_stats;
use the_recap_evaluation::{MatchEvaluator, MatchSummary};
use the_recap_ipc::{r#pub::IpcPublisher, MatchSummaryNotice};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

/// Where finished summaries go.
#[derive(Debug)]
pub enum SummarySink {
    Ipc(IpcPublisher<MatchSummaryNotice>),
    Stdout,
}

impl SummarySink {
    async fn deliver(&self, game_id: Option<String>, summary: &MatchSummary) -> anyhow::Result<()> {
        match self {
            Self::Ipc(publisher) => {
                let notice = MatchSummaryNotice {
                    game_id,
                    summary_json: serde_json::to_string(summary)?,
                };
                debug!("Publishing summary for game {:?}", notice.game_id);
                publisher.publish(notice).await?;
            }
            Self::Stdout => println!("{}", serde_json::to_string_pretty(summary)?),
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct EndOfGameHandler {
    rx_channel: UnboundedReceiver<InboxPayload>,
    evaluator: MatchEvaluator,
    viewer: String,
    gate: EndOfGameGate,
    sink: SummarySink,
}

impl EndOfGameHandler {
    pub fn new(
        rx_channel: UnboundedReceiver<InboxPayload>,
        evaluator: MatchEvaluator,
        viewer: String,
        gate: EndOfGameGate,
        sink: SummarySink,
    ) -> Self {
        Self {
            rx_channel,
            evaluator,
            viewer,
            gate,
            sink,
        }
    }

    /// Iterate on receiving payloads from [`Self::rx_channel`], summarizing and
    /// delivering each admitted one.
    #[tracing::instrument(skip(self))]
    pub async fn start(mut self) {
        while let Some(data) = self.rx_channel.recv().await {
            let path = data.path.clone();
            match self.run(data).await {
                Ok(true) => info!("Summarized {}", path.display()),
                Ok(false) => debug!("Nothing delivered for {}", path.display()),
                Err(e) => error!("End of game handler error for {}: {e:?}", path.display()),
            }
        }
        warn!("Payload channel closed, stopping end of game handler");
    }

    /// Returns whether a summary was delivered.
    async fn run(&mut self, data: InboxPayload) -> anyhow::Result<bool> {
        match self.gate.admit(data.game_id.as_deref(), Utc::now()) {
            Admission::Accept => {}
            skipped => {
                info!("Skipping game {:?}: {skipped:?}", data.game_id);
                return Ok(false);
            }
        }

        let Some(mut summary) = self.evaluator.evaluate(&data.payload, &self.viewer)? else {
            return Ok(false);
        };
        if !data.clutch.is_empty() {
            integrate_clutch_stats(&mut summary, &data.clutch);
        }
        debug!(
            "Game {:?}: comeback {}, stomp {}, highlight {:?}",
            data.game_id,
            summary.indicators.is_comeback,
            summary.indicators.was_stomp,
            summary.teamwork_highlight
        );

        self.sink.deliver(data.game_id, &summary).await?;
        Ok(true)
    }
}
