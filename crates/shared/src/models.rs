//! Game data model as seen by the client.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Language the session is played in. Chosen once before connecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Tr];

    /// Language tag as used on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }

    /// Human-readable name for the language picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Türkçe",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "tr" => Ok(Language::Tr),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// Outcome recorded for a letter. `Unset` means no status class is applied.
///
/// The authority sends colour names (`green`, `red`, `yellow`) and an empty
/// string or `null` for letters not answered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LetterStatus {
    #[default]
    Unset,
    Correct,
    Wrong,
    Passed,
}

impl LetterStatus {
    /// Name used on the wire, which doubles as the node's CSS class.
    pub fn wire_name(&self) -> &'static str {
        match self {
            LetterStatus::Unset => "",
            LetterStatus::Correct => "green",
            LetterStatus::Wrong => "red",
            LetterStatus::Passed => "yellow",
        }
    }

    /// CSS class for the status, if any.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            LetterStatus::Unset => None,
            other => Some(other.wire_name()),
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "" => Some(LetterStatus::Unset),
            "green" | "correct" => Some(LetterStatus::Correct),
            "red" | "wrong" => Some(LetterStatus::Wrong),
            "yellow" | "passed" => Some(LetterStatus::Passed),
            _ => None,
        }
    }
}

impl Serialize for LetterStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for LetterStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(LetterStatus::Unset),
            Some(value) => LetterStatus::from_wire(&value).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown letter status {:?}", value))
            }),
        }
    }
}

/// Status per letter key. Ordered map so iteration is deterministic.
pub type LettersState = BTreeMap<String, LetterStatus>;

/// The complete authoritative game state as of the last QUESTION.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Letter the current question belongs to.
    #[serde(rename = "letter")]
    pub current_letter: String,
    pub question: String,
    /// Position of the question in the authority's list, when sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub letters_state: LettersState,
    pub time_remaining: u32,
}

impl GameSnapshot {
    pub fn status_of(&self, letter: &str) -> LetterStatus {
        self.letters_state.get(letter).copied().unwrap_or_default()
    }

    pub fn is_current(&self, letter: &str) -> bool {
        self.current_letter == letter
    }
}

/// Final counts shown on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverStats {
    pub correct_count: u32,
    pub wrong_count: u32,
    pub passed_count: u32,
}

/// Class list for a letter node: base class, status class, then `active`.
pub fn letter_node_class(status: LetterStatus, active: bool) -> String {
    let mut class = String::from("letter-node");
    if let Some(status_class) = status.css_class() {
        class.push(' ');
        class.push_str(status_class);
    }
    if active {
        class.push_str(" active");
    }
    class
}
