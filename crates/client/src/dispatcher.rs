//! Inbound protocol state machine.
//!
//! ```text
//! awaiting-init-ack --QUESTION--> playing --QUESTION/TIMER_SYNC/FEEDBACK--> playing
//!        |                           |
//!        +--------GAME_OVER----------+-----> game-over (terminal)
//! ```

use letterwheel_shared::{
    format_timer, CircleGeometry, Feedback, GameOverStats, GameSnapshot, Language, ProtocolError,
    ServerMessage,
};

use crate::render::{QuestionView, Renderer};
use crate::store::{GameSnapshotStore, StoreEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingInitAck,
    Playing,
    GameOver,
}

/// Result of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A QUESTION was applied and the whole game surface refreshed.
    Refreshed,
    /// Only the timer display changed.
    TimerUpdated,
    /// FEEDBACK: accepted, nothing to show until the following QUESTION.
    Acknowledged,
    /// GAME_OVER: the session reached its terminal state.
    Finished,
    /// The message was not processed in the current phase.
    Ignored,
}

pub struct ProtocolDispatcher<R> {
    phase: Phase,
    store: GameSnapshotStore,
    renderer: R,
    final_stats: Option<GameOverStats>,
}

impl<R: Renderer> ProtocolDispatcher<R> {
    pub fn new(language: Language, geometry: CircleGeometry, renderer: R) -> Self {
        Self {
            phase: Phase::AwaitingInitAck,
            store: GameSnapshotStore::new(language, geometry),
            renderer,
            final_stats: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &GameSnapshotStore {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn final_stats(&self) -> Option<&GameOverStats> {
        self.final_stats.as_ref()
    }

    /// Decode and handle one raw text frame.
    pub fn handle_frame(&mut self, frame: &str) -> Result<Outcome, ProtocolError> {
        if self.phase == Phase::GameOver {
            return Ok(Outcome::Ignored);
        }
        let message = ServerMessage::decode(frame)?;
        self.handle(message)
    }

    pub fn handle(&mut self, message: ServerMessage) -> Result<Outcome, ProtocolError> {
        match (self.phase, message) {
            (Phase::GameOver, message) => {
                crate::log_debug!("Ignoring {} after game over", message.kind());
                Ok(Outcome::Ignored)
            }
            (_, ServerMessage::GameOver(stats)) => {
                self.finish(stats);
                Ok(Outcome::Finished)
            }
            (_, ServerMessage::Question(snapshot)) => self.apply_question(snapshot),
            (Phase::Playing, ServerMessage::TimerSync(sync)) => {
                self.store.sync_timer(sync.time_remaining);
                self.renderer.render_timer(&format_timer(sync.time_remaining));
                Ok(Outcome::TimerUpdated)
            }
            (Phase::Playing, ServerMessage::Feedback(feedback)) => {
                log_feedback(&feedback);
                Ok(Outcome::Acknowledged)
            }
            (phase, ServerMessage::TimerSync(_) | ServerMessage::Feedback(_)) => {
                crate::log_debug!("Ignoring message in phase {:?}", phase);
                Ok(Outcome::Ignored)
            }
            (_, ServerMessage::Unknown { kind, payload }) => {
                if kind == letterwheel_shared::TYPE_ERROR {
                    crate::log_warn!("Server reported an error: {:?}", payload);
                } else {
                    crate::log_debug!("Ignoring unknown message kind {}", kind);
                }
                Ok(Outcome::Ignored)
            }
        }
    }

    fn apply_question(&mut self, snapshot: GameSnapshot) -> Result<Outcome, ProtocolError> {
        let effect = self.store.apply(snapshot)?;
        self.phase = Phase::Playing;

        let (Some(snapshot), Some(alphabet)) = (self.store.snapshot(), self.store.alphabet())
        else {
            return Ok(Outcome::Ignored);
        };

        if effect == StoreEffect::Initialized {
            crate::log_info!("Laid out {} letters", alphabet.len());
            self.renderer.render_circle(alphabet);
        }

        let view = QuestionView::project(snapshot, alphabet, format_timer(snapshot.time_remaining));
        self.renderer.render_question(&view);
        Ok(Outcome::Refreshed)
    }

    fn finish(&mut self, stats: GameOverStats) {
        crate::log_info!(
            "Game over: {} correct, {} wrong, {} passed",
            stats.correct_count,
            stats.wrong_count,
            stats.passed_count
        );
        self.phase = Phase::GameOver;
        self.renderer.render_game_over(&stats);
        self.final_stats = Some(stats);
    }
}

fn log_feedback(feedback: &Feedback) {
    crate::log_debug!(
        "Feedback for {:?}: status {:?}, correct {:?}",
        feedback.letter,
        feedback.status,
        feedback.correct
    );
}
