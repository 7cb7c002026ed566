//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - assembling a word list (state policy) and building the grid
//!   - storing the finished puzzle for later retrieval
//!   - topic listing

use tracing::{info, instrument};
use uuid::Uuid;

use crate::crossword;
use crate::domain::Puzzle;
use crate::state::AppState;

/// Generate a puzzle for a topic, store it, and return it.
///
/// Words that find no feasible spot are left out by the builder; the only
/// visible symptom is a clue list shorter than the word list, which is the
/// expected best-effort behavior and not reported per word.
#[instrument(level = "info", skip(state), fields(%topic, %language, count))]
pub async fn generate_puzzle(state: &AppState, topic: &str, language: &str, count: usize) -> Puzzle {
  let (words, source, origin) = state.choose_words(topic, language, count).await;
  let crossword = crossword::build(&words);
  info!(
    target: "puzzle",
    %topic,
    %origin,
    words = words.len(),
    placed_clues = crossword.clues.len(),
    "Crossword built"
  );

  let puzzle = Puzzle {
    id: Uuid::new_v4().to_string(),
    topic: topic.to_string(),
    language: language.to_string(),
    source,
    origin,
    crossword,
  };
  state.insert_puzzle(puzzle.clone()).await;
  puzzle
}

/// Fetch a previously generated puzzle (e.g. for the answer-key view).
#[instrument(level = "info", skip(state), fields(%id))]
pub async fn fetch_puzzle(state: &AppState, id: &str) -> Option<Puzzle> {
  state.get_puzzle(id).await
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn generated_puzzle_is_stored_and_refetchable() {
    let mut state = AppState::new();
    state.openai = None;
    let p = generate_puzzle(&state, "space", "en", 8).await;
    assert!(!p.crossword.clues.is_empty());

    let again = fetch_puzzle(&state, &p.id).await.expect("stored");
    assert_eq!(again.crossword, p.crossword);
    assert!(fetch_puzzle(&state, "no-such-id").await.is_none());
  }
}
