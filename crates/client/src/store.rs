//! Game snapshot store.
//!
//! Holds the latest authoritative snapshot and the alphabet laid out from the
//! first one. The alphabet is frozen for the rest of the session: later
//! snapshots only change statuses and content, never the circle.

use letterwheel_shared::{
    layout, CircleGeometry, GameSnapshot, Language, PlacedLetter, ProtocolError,
};

/// Alphabet frozen from the first snapshot of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Alphabet {
    placed: Vec<PlacedLetter>,
}

impl Alphabet {
    pub fn letters(&self) -> impl Iterator<Item = &str> {
        self.placed.iter().map(|p| p.key.as_str())
    }

    pub fn placed(&self) -> &[PlacedLetter] {
        &self.placed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

/// What applying a snapshot changed.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEffect {
    /// First snapshot of the session: the circle was laid out.
    Initialized,
    /// The snapshot replaced the previous one.
    Updated,
}

pub struct GameSnapshotStore {
    language: Language,
    geometry: CircleGeometry,
    alphabet: Option<Alphabet>,
    snapshot: Option<GameSnapshot>,
}

impl GameSnapshotStore {
    pub fn new(language: Language, geometry: CircleGeometry) -> Self {
        Self {
            language,
            geometry,
            alphabet: None,
            snapshot: None,
        }
    }

    pub fn alphabet(&self) -> Option<&Alphabet> {
        self.alphabet.as_ref()
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    /// Replace the stored snapshot, laying out the alphabet on first use.
    ///
    /// Validation and layout happen before any mutation, so a rejected
    /// snapshot leaves the store exactly as it was.
    pub fn apply(&mut self, snapshot: GameSnapshot) -> Result<StoreEffect, ProtocolError> {
        if !snapshot.letters_state.contains_key(&snapshot.current_letter) {
            return Err(ProtocolError::UnknownCurrentLetter {
                letter: snapshot.current_letter,
            });
        }

        let effect = if self.alphabet.is_none() {
            let placed = layout(
                snapshot.letters_state.keys().cloned(),
                self.language,
                self.geometry,
            )?;
            self.alphabet = Some(Alphabet { placed });
            StoreEffect::Initialized
        } else {
            StoreEffect::Updated
        };

        self.snapshot = Some(snapshot);
        Ok(effect)
    }

    /// Update only the remaining time. Returns `false` when there is no
    /// snapshot to update yet.
    pub fn sync_timer(&mut self, time_remaining: u32) -> bool {
        match self.snapshot.as_mut() {
            Some(snapshot) => {
                snapshot.time_remaining = time_remaining;
                true
            }
            None => false,
        }
    }
}
