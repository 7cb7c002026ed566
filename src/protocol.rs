//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::crossword::{Clue, Direction, Grid};
use crate::domain::{Puzzle, PuzzleSource};

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct CrosswordIn {
    pub topic: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// DTO for puzzle delivery. The grid is the filled answer grid; the client
/// derives the empty puzzle view by blanking letters. Clues arrive already
/// split by direction because that is how the two clue columns render.
#[derive(Debug, Serialize)]
pub struct PuzzleOut {
    pub id: String,
    pub topic: String,
    pub language: String,
    pub source: PuzzleSource,
    pub origin: &'static str,
    pub grid: Grid,
    #[serde(rename = "gridSize")]
    pub grid_size: usize,
    #[serde(rename = "cluesAcross")]
    pub clues_across: Vec<Clue>,
    #[serde(rename = "cluesDown")]
    pub clues_down: Vec<Clue>,
}

/// Convert the internal `Puzzle` to the public DTO, splitting clues by
/// direction while preserving their number order.
pub fn to_out(p: &Puzzle) -> PuzzleOut {
    let (clues_across, clues_down): (Vec<Clue>, Vec<Clue>) = p
        .crossword
        .clues
        .iter()
        .cloned()
        .partition(|c| c.direction == Direction::Across);

    PuzzleOut {
        id: p.id.clone(),
        topic: p.topic.clone(),
        language: p.language.clone(),
        source: p.source,
        origin: p.origin,
        grid: p.crossword.grid.clone(),
        grid_size: p.crossword.grid_size,
        clues_across,
        clues_down,
    }
}

#[derive(Serialize)]
pub struct TopicsOut {
    pub topics: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::build;
    use crate::domain::WordEntry;

    #[test]
    fn to_out_splits_clues_by_direction_keeping_number_order() {
        let words = [
            WordEntry { word: "мама".into(), clue: "a".into() },
            WordEntry { word: "рама".into(), clue: "b".into() },
        ];
        let p = Puzzle {
            id: "p1".into(),
            topic: "семья".into(),
            language: "ru".into(),
            source: PuzzleSource::Seed,
            origin: "seed",
            crossword: build(&words),
        };
        let out = to_out(&p);
        assert_eq!(out.clues_across.len(), 1);
        assert_eq!(out.clues_down.len(), 1);
        assert!(out.clues_across.iter().all(|c| c.direction == Direction::Across));
        assert!(out
            .clues_down
            .windows(2)
            .all(|w| w[0].number <= w[1].number));
        assert_eq!(out.grid_size, p.crossword.grid_size);
    }
}
