use chrono::{DateTime, TimeDelta, Utc};
use circular_queue::CircularQueue;

/// Number of recent game ids remembered for deduplication.
const RECENT_GAMES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accept,
    /// This game id was already processed
    Duplicate,
    /// No game id and too soon after the previous end-of-match event
    CoolingDown,
}

/// Makes sure a single end-of-match transition is only summarized once.
pub struct EndOfGameGate {
    recent: CircularQueue<String>,
    cooldown: TimeDelta,
    last_processed: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for EndOfGameGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndOfGameGate")
            .field("recent", &self.recent.iter().collect::<Vec<_>>())
            .field("cooldown", &self.cooldown)
            .field("last_processed", &self.last_processed)
            .finish()
    }
}

impl EndOfGameGate {
    pub fn new(cooldown: TimeDelta) -> Self {
        Self {
            recent: CircularQueue::with_capacity(RECENT_GAMES),
            cooldown,
            last_processed: None,
        }
    }

    /// Decide whether an event seen at `now` should be processed, recording
    /// it when accepted. A game id is accepted once; the cooldown only
    /// debounces events that carry no id.
    pub fn admit(&mut self, game_id: Option<&str>, now: DateTime<Utc>) -> Admission {
        match game_id {
            Some(id) if self.recent.iter().any(|recent| recent == id) => {
                return Admission::Duplicate;
            }
            Some(_) => {}
            None => {
                if let Some(last) = self.last_processed {
                    if now - last < self.cooldown {
                        return Admission::CoolingDown;
                    }
                }
            }
        }

        if let Some(id) = game_id {
            self.recent.push(id.to_string());
        }
        self.last_processed = Some(now);
        Admission::Accept
    }
}
