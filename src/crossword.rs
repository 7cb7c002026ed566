//! Crossword grid construction.
//!
//! Greedy first-fit placement on a fixed 15x15 working area: the longest
//! word is seeded across the center, and every later word tries to cross an
//! already-placed word at the first matching letter. Words that cannot cross
//! anything are dropped without a trace; the caller only sees a shorter clue
//! list. The search order (placed words in placement order, then letters of
//! the placed word left-to-right, then letters of the candidate
//! left-to-right) is part of the observable contract: changing it changes
//! which words land where.
//!
//! Pure and synchronous. Randomness, if any, belongs to whoever picks the
//! word list (see `state::choose_words`), never in here.

use serde::Serialize;

use crate::domain::WordEntry;

/// Side length of the working area. The builder never grows the grid; words
/// that do not fit are dropped.
pub const GRID_SIZE: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    fn perpendicular(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

/// One occupied square: its letter, and the clue number if one or more
/// words start here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cell {
    pub letter: char,
    pub number: Option<u32>,
}

/// Row-major rows of the square grid; `None` squares are blanks.
pub type Grid = Vec<Vec<Option<Cell>>>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Clue {
    pub number: u32,
    pub word: String,
    pub clue: String,
    pub direction: Direction,
}

/// Finished build output: the filled answer grid plus the numbered clues.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Crossword {
    pub grid: Grid,
    pub grid_size: usize,
    pub clues: Vec<Clue>,
}

#[derive(Clone, Debug)]
struct PlacedWord {
    letters: Vec<char>,
    clue: String,
    row: usize,
    col: usize,
    direction: Direction,
}

impl PlacedWord {
    fn word(&self) -> String {
        self.letters.iter().collect()
    }

    /// Grid coordinate of letter index `i`.
    fn letter_pos(&self, i: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + i),
            Direction::Down => (self.row + i, self.col),
        }
    }
}

/// Build a crossword from `(word, clue)` pairs.
///
/// Words are uppercased (nothing else is sanitized) and placed longest
/// first; a word that finds no feasible spot is silently left out. The
/// result is deterministic for a given input list.
pub fn build(words: &[WordEntry]) -> Crossword {
    let mut candidates: Vec<(Vec<char>, &str)> = words
        .iter()
        .map(|w| {
            let letters: Vec<char> = w.word.chars().flat_map(char::to_uppercase).collect();
            (letters, w.clue.as_str())
        })
        .collect();
    // Stable: equal lengths keep their input order.
    candidates.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut letters_grid: Vec<Vec<Option<char>>> = vec![vec![None; GRID_SIZE]; GRID_SIZE];
    let mut placed: Vec<PlacedWord> = Vec::new();

    for (i, (letters, clue)) in candidates.into_iter().enumerate() {
        if letters.is_empty() {
            continue;
        }

        let slot = if i == 0 {
            // Seed: longest word across, centered. An oversize word fails
            // the bounds check and is dropped like any other; no retry.
            let row = (GRID_SIZE / 2) as isize;
            let col = (GRID_SIZE as isize - letters.len() as isize).div_euclid(2);
            if can_place(&letters_grid, &letters, row, col, Direction::Across) {
                Some((row as usize, col as usize, Direction::Across))
            } else {
                None
            }
        } else {
            find_intersection(&letters_grid, &placed, &letters)
        };

        let Some((row, col, direction)) = slot else {
            continue;
        };

        for (k, &ch) in letters.iter().enumerate() {
            let (r, c) = match direction {
                Direction::Across => (row, col + k),
                Direction::Down => (row + k, col),
            };
            // Crossing cells already hold the same letter.
            if letters_grid[r][c].is_none() {
                letters_grid[r][c] = Some(ch);
            }
        }
        placed.push(PlacedWord {
            letters,
            clue: clue.to_string(),
            row,
            col,
            direction,
        });
    }

    number_and_collect(&letters_grid, &placed)
}

/// First feasible crossing of `letters` with any placed word, or `None`.
/// Scan order is fixed: placed words in placement order, their letters
/// left-to-right, then the candidate's letters left-to-right.
fn find_intersection(
    grid: &[Vec<Option<char>>],
    placed: &[PlacedWord],
    letters: &[char],
) -> Option<(usize, usize, Direction)> {
    for p in placed {
        for j in 0..p.letters.len() {
            let (pr, pc) = p.letter_pos(j);
            for (k, &ch) in letters.iter().enumerate() {
                if ch != p.letters[j] {
                    continue;
                }
                let direction = p.direction.perpendicular();
                let (row, col) = match direction {
                    Direction::Across => (pr as isize, pc as isize - k as isize),
                    Direction::Down => (pr as isize - k as isize, pc as isize),
                };
                if can_place(grid, letters, row, col, direction) {
                    return Some((row as usize, col as usize, direction));
                }
            }
        }
    }
    None
}

/// A candidate placement is feasible when the whole word lies inside the
/// grid and every already-occupied cell along its span holds the same
/// letter. Placements never overwrite.
fn can_place(
    grid: &[Vec<Option<char>>],
    letters: &[char],
    row: isize,
    col: isize,
    direction: Direction,
) -> bool {
    if row < 0 || col < 0 {
        return false;
    }
    let (row, col) = (row as usize, col as usize);
    let len = letters.len();
    let in_bounds = match direction {
        Direction::Across => row < GRID_SIZE && col + len <= GRID_SIZE,
        Direction::Down => col < GRID_SIZE && row + len <= GRID_SIZE,
    };
    if !in_bounds {
        return false;
    }
    for (k, &ch) in letters.iter().enumerate() {
        let (r, c) = match direction {
            Direction::Across => (row, col + k),
            Direction::Down => (row + k, col),
        };
        if let Some(existing) = grid[r][c] {
            if existing != ch {
                return false;
            }
        }
    }
    true
}

/// Numbering pass: scan the grid row-major and give each cell that starts
/// one or more placed words the next sequential number, emitting one clue
/// per starting word (across before down at a shared start cell).
fn number_and_collect(grid: &[Vec<Option<char>>], placed: &[PlacedWord]) -> Crossword {
    let mut out: Grid = grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|&cell| cell.map(|letter| Cell { letter, number: None }))
                .collect()
        })
        .collect();

    let mut clues: Vec<Clue> = Vec::new();
    let mut number = 0u32;
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let across = placed
                .iter()
                .filter(|p| p.row == row && p.col == col && p.direction == Direction::Across);
            let down = placed
                .iter()
                .filter(|p| p.row == row && p.col == col && p.direction == Direction::Down);
            let starters: Vec<&PlacedWord> = across.chain(down).collect();
            if starters.is_empty() {
                continue;
            }
            number += 1;
            if let Some(cell) = out[row][col].as_mut() {
                cell.number = Some(number);
            }
            for p in starters {
                clues.push(Clue {
                    number,
                    word: p.word(),
                    clue: p.clue.clone(),
                    direction: p.direction,
                });
            }
        }
    }

    Crossword {
        grid: out,
        grid_size: GRID_SIZE,
        clues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, clue: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            clue: clue.to_string(),
        }
    }

    fn occupied_cells(cw: &Crossword) -> usize {
        cw.grid.iter().flatten().filter(|c| c.is_some()).count()
    }

    fn letter_at(cw: &Crossword, row: usize, col: usize) -> Option<char> {
        cw.grid[row][col].as_ref().map(|c| c.letter)
    }

    #[test]
    fn single_word_is_centered_across() {
        let cw = build(&[entry("тест", "проверка")]);
        assert_eq!(cw.grid_size, GRID_SIZE);
        assert_eq!(cw.clues.len(), 1);
        assert_eq!(cw.clues[0].number, 1);
        assert_eq!(cw.clues[0].word, "ТЕСТ");
        assert_eq!(cw.clues[0].direction, Direction::Across);
        // row 7, col (15 - 4) / 2 = 5
        assert_eq!(letter_at(&cw, 7, 5), Some('Т'));
        assert_eq!(letter_at(&cw, 7, 6), Some('Е'));
        assert_eq!(letter_at(&cw, 7, 7), Some('С'));
        assert_eq!(letter_at(&cw, 7, 8), Some('Т'));
        assert_eq!(cw.grid[7][5].as_ref().unwrap().number, Some(1));
        assert_eq!(occupied_cells(&cw), 4);
    }

    #[test]
    fn disjoint_word_is_dropped_silently() {
        // КОСМОС and ЛУНА share no letters, so only the seed survives.
        let cw = build(&[entry("космос", "всё сущее"), entry("луна", "спутник Земли")]);
        assert_eq!(cw.clues.len(), 1);
        assert_eq!(cw.clues[0].word, "КОСМОС");
        assert_eq!(occupied_cells(&cw), 6);
    }

    #[test]
    fn second_word_crosses_at_shared_letter() {
        let cw = build(&[entry("мама", "родитель"), entry("рама", "часть окна")]);
        assert_eq!(cw.clues.len(), 2);

        let down = cw
            .clues
            .iter()
            .find(|c| c.direction == Direction::Down)
            .expect("РАМА placed down");
        assert_eq!(down.word, "РАМА");

        // МАМА across at (7, 5..=8); РАМА crosses its first М: the match is
        // РАМА's letter index 2, so the down word starts at (5, 5).
        assert_eq!(letter_at(&cw, 5, 5), Some('Р'));
        assert_eq!(letter_at(&cw, 6, 5), Some('А'));
        assert_eq!(letter_at(&cw, 7, 5), Some('М'));
        assert_eq!(letter_at(&cw, 8, 5), Some('А'));
        // Exactly one shared cell: 4 + 4 - 1.
        assert_eq!(occupied_cells(&cw), 7);
    }

    #[test]
    fn empty_input_yields_empty_grid() {
        let cw = build(&[]);
        assert!(cw.clues.is_empty());
        assert_eq!(occupied_cells(&cw), 0);
        assert_eq!(cw.grid.len(), GRID_SIZE);
        assert!(cw.grid.iter().all(|row| row.len() == GRID_SIZE));
    }

    #[test]
    fn oversize_seed_word_is_dropped_without_retry() {
        // 16 letters cannot fit in a 15-wide row. The seed is dropped and
        // the rest have no anchor, so nothing is placed.
        let cw = build(&[
            entry("электрокардиограф", "прибор"),
            entry("сердце", "орган"),
        ]);
        assert!(cw.clues.is_empty());
        assert_eq!(occupied_cells(&cw), 0);
    }

    #[test]
    fn longest_word_seeds_regardless_of_input_order() {
        let cw = build(&[entry("кот", "животное"), entry("молоко", "напиток")]);
        let first = &cw.clues[0];
        // МОЛОКО is the seed; КОТ crosses it.
        assert!(cw.clues.iter().any(|c| c.word == "МОЛОКО"));
        assert!(cw.clues.iter().any(|c| c.word == "КОТ"));
        assert_eq!(first.number, 1);
    }

    #[test]
    fn length_ties_keep_input_order() {
        // Both four letters; МАМА stays first and becomes the seed.
        let cw = build(&[entry("мама", "a"), entry("рама", "b")]);
        let across = cw
            .clues
            .iter()
            .find(|c| c.direction == Direction::Across)
            .unwrap();
        assert_eq!(across.word, "МАМА");
    }

    #[test]
    fn containment_and_no_overwrite_hold_for_a_larger_list() {
        let words = [
            entry("teacher", "runs the class"),
            entry("pencil", "writing tool"),
            entry("school", "where lessons happen"),
            entry("chalk", "for the blackboard"),
            entry("desk", "student furniture"),
            entry("quiz", "short test"),
            entry("map", "shows the world"),
        ];
        let cw = build(&words);
        assert!(!cw.clues.is_empty());

        // P1: the grid never grows past its declared bounds.
        assert_eq!(cw.grid.len(), GRID_SIZE);
        assert!(cw.grid.iter().all(|row| row.len() == GRID_SIZE));

        // P2: every clue's word reads back verbatim from the grid, so no
        // placement overwrote another word's letters.
        for clue in &cw.clues {
            let (row, col) = start_of(&cw, clue);
            for (k, expected) in clue.word.chars().enumerate() {
                let (r, c) = match clue.direction {
                    Direction::Across => (row, col + k),
                    Direction::Down => (row + k, col),
                };
                assert_eq!(letter_at(&cw, r, c), Some(expected), "{}[{}]", clue.word, k);
            }
        }
    }

    #[test]
    fn numbering_is_sequential_in_row_major_order() {
        let words = [
            entry("school", "a"),
            entry("chalk", "b"),
            entry("cat", "c"),
            entry("hat", "d"),
        ];
        let cw = build(&words);

        let mut numbers = Vec::new();
        for row in &cw.grid {
            for cell in row.iter().flatten() {
                if let Some(n) = cell.number {
                    numbers.push(n);
                }
            }
        }
        // P3: strictly increasing from 1 with no gaps, in scan order.
        let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
        assert_eq!(numbers, expected);
        // Every clue number refers to a numbered cell.
        for clue in &cw.clues {
            assert!(numbers.contains(&clue.number));
        }
    }

    #[test]
    fn numbered_cells_are_exactly_word_starts() {
        let cw = build(&[entry("мама", "a"), entry("рама", "b")]);
        let starts: Vec<(usize, usize)> = cw
            .clues
            .iter()
            .map(|c| start_of(&cw, c))
            .collect();
        for (r, row) in cw.grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(cell) = cell {
                    assert_eq!(cell.number.is_some(), starts.contains(&(r, c)));
                }
            }
        }
    }

    #[test]
    fn shared_start_cell_numbers_once_across_before_down() {
        // AB seeds across at (7, 6); AC crosses the seed's leading A with
        // its own letter index 0, so both words start at the same cell.
        // That cell carries a single number, with the across clue first.
        let cw = build(&[entry("ab", "a"), entry("ac", "b")]);
        assert_eq!(cw.clues.len(), 2);
        assert_eq!(cw.clues[0].number, cw.clues[1].number);
        assert_eq!(cw.clues[0].number, 1);
        assert_eq!(cw.clues[0].word, "AB");
        assert_eq!(cw.clues[0].direction, Direction::Across);
        assert_eq!(cw.clues[1].word, "AC");
        assert_eq!(cw.clues[1].direction, Direction::Down);
        // One numbered cell for both starts.
        assert_eq!(cw.grid[7][6].as_ref().unwrap().number, Some(1));
        let numbered = cw
            .grid
            .iter()
            .flatten()
            .flatten()
            .filter(|c| c.number.is_some())
            .count();
        assert_eq!(numbered, 1);
    }

    #[test]
    fn output_is_deterministic() {
        let words = [
            entry("memory", "matching game"),
            entry("round", "one pass of play"),
            entry("score", "points so far"),
            entry("team", "plays together"),
        ];
        // P4: bit-identical output for identical input.
        assert_eq!(build(&words), build(&words));
    }

    #[test]
    fn uppercase_normalization_allows_mixed_case_input() {
        let cw = build(&[entry("Mama", "a"), entry("raMA", "b")]);
        assert_eq!(cw.clues.len(), 2);
        assert!(cw.clues.iter().all(|c| c.word.chars().all(|ch| ch.is_uppercase())));
    }

    /// Start cell of a clue, recovered from its number on the grid.
    fn start_of(cw: &Crossword, clue: &Clue) -> (usize, usize) {
        for (r, row) in cw.grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(cell) = cell {
                    if cell.number == Some(clue.number) {
                        return (r, c);
                    }
                }
            }
        }
        panic!("clue {} has no numbered start cell", clue.number);
    }
}
