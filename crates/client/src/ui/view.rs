//! Reactive game state. The dispatcher renders into these signals and the
//! screens read them.

use dioxus::prelude::*;
use letterwheel_shared::{GameOverStats, PlacedLetter};

use crate::render::{QuestionView, Renderer};
use crate::store::Alphabet;

#[derive(Clone, Copy, PartialEq)]
pub struct GameView {
    /// Side of the square the circle is drawn in, in px.
    pub size: f64,
    pub placed: Signal<Vec<PlacedLetter>>,
    pub question: Signal<Option<QuestionView>>,
    pub timer: Signal<String>,
    pub stats: Signal<Option<GameOverStats>>,
    /// Bumped on every question so the answer box clears and refocuses.
    pub question_seq: Signal<u64>,
}

impl GameView {
    /// Must be called from inside a component scope.
    pub fn new(size: f64) -> Self {
        Self {
            size,
            placed: Signal::new(Vec::new()),
            question: Signal::new(None),
            timer: Signal::new(String::new()),
            stats: Signal::new(None),
            question_seq: Signal::new(0),
        }
    }

    /// Class list for the letter at `index` of the circle.
    pub fn node_class(&self, index: usize) -> String {
        self.question
            .read()
            .as_ref()
            .and_then(|q| q.nodes.get(index))
            .map(|node| node.class.clone())
            .unwrap_or_else(|| "letter-node".to_string())
    }
}

impl Renderer for GameView {
    fn render_circle(&mut self, alphabet: &Alphabet) {
        self.placed.set(alphabet.placed().to_vec());
    }

    fn render_question(&mut self, view: &QuestionView) {
        self.timer.set(view.timer.clone());
        self.question.set(Some(view.clone()));
        *self.question_seq.write() += 1;
    }

    fn render_timer(&mut self, timer: &str) {
        self.timer.set(timer.to_string());
    }

    fn render_game_over(&mut self, stats: &GameOverStats) {
        self.stats.set(Some(*stats));
    }
}
