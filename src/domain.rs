//! Domain models used by the backend: word entries, puzzle sources, and the
//! stored puzzle itself.

use serde::{Deserialize, Serialize};

use crate::crossword::Crossword;

/// One `(word, clue)` pair as fed to the grid builder. Words are free-form
/// text here; the builder uppercases them and does nothing else.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordEntry {
  pub word: String,
  pub clue: String,
}

/// Where did the word list behind a puzzle come from?
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleSource {
  LocalBank,   // from user-provided TOML bank
  Generated,   // generated via OpenAI
  Seed,  // built-in word lists (last resort)
}

/// A finished puzzle kept in-memory so the client can re-fetch it by id
/// (e.g. for the answer-key view). Immutable once stored.
#[derive(Clone, Debug, Serialize)]
pub struct Puzzle {
  pub id: String,
  pub topic: String,
  pub language: String,   // free-form tag (e.g. "en", "ru")
  pub source: PuzzleSource,
  pub origin: &'static str,   // selection-policy tag, e.g. "openai_generated"
  pub crossword: Crossword,
}
