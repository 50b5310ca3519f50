//! Rendering capability driven by the protocol dispatcher.
//!
//! Implementations own the actual UI surface. The dispatcher only decides
//! what to show; it never touches a UI toolkit directly.

use letterwheel_shared::{letter_node_class, GameOverStats, GameSnapshot, LetterStatus};

use crate::store::Alphabet;

/// One letter node of the circle as it should look now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterNodeView {
    pub key: String,
    pub status: LetterStatus,
    pub active: bool,
    /// Full class list, e.g. `letter-node green active`.
    pub class: String,
}

/// Everything a QUESTION refresh puts on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub letter: String,
    pub question: String,
    pub timer: String,
    /// One entry per laid-out letter, in alphabet order.
    pub nodes: Vec<LetterNodeView>,
}

impl QuestionView {
    /// Project `snapshot` onto the frozen `alphabet`. Letters the alphabet
    /// does not contain have no node and are skipped.
    pub fn project(snapshot: &GameSnapshot, alphabet: &Alphabet, timer: String) -> Self {
        let nodes = alphabet
            .letters()
            .map(|key| {
                let status = snapshot.status_of(key);
                let active = snapshot.is_current(key);
                LetterNodeView {
                    key: key.to_string(),
                    status,
                    active,
                    class: letter_node_class(status, active),
                }
            })
            .collect();

        Self {
            letter: snapshot.current_letter.clone(),
            question: snapshot.question.clone(),
            timer,
            nodes,
        }
    }
}

pub trait Renderer {
    /// Build the letter circle. Called once per session.
    fn render_circle(&mut self, alphabet: &Alphabet);

    /// Show a new question: current letter, question text, timer and letter
    /// colours. Also clears the answer input and gives it focus.
    fn render_question(&mut self, view: &QuestionView);

    /// Update only the timer display.
    fn render_timer(&mut self, timer: &str);

    /// Hide the play surface and show the final statistics.
    fn render_game_over(&mut self, stats: &GameOverStats);
}
