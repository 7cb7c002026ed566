//! Seed data: built-in topic word lists and the absolute-last-resort
//! fallback list. These guarantee the app produces a puzzle even without
//! external config or OpenAI.

use crate::domain::WordEntry;

pub struct SeedBank {
  pub topic: &'static str,
  pub language: &'static str,
  pub words: &'static [(&'static str, &'static str)],
}

/// Built-in topic banks. Small and hand-curated; words within a bank share
/// plenty of letters so the grid builder can actually cross them.
pub const SEED_BANKS: &[SeedBank] = &[
  SeedBank {
    topic: "space",
    language: "en",
    words: &[
      ("planet", "A large body orbiting a star"),
      ("star", "It shines in the night sky"),
      ("rocket", "It launches astronauts into orbit"),
      ("orbit", "The path a moon takes around its planet"),
      ("comet", "An icy visitor with a glowing tail"),
      ("moon", "Earth has exactly one"),
      ("saturn", "The planet famous for its rings"),
      ("crater", "A bowl-shaped dent left by an impact"),
      ("galaxy", "The Milky Way is one"),
      ("eclipse", "When one body hides another"),
      ("mars", "The red planet"),
      ("astronaut", "A person who works in space"),
    ],
  },
  SeedBank {
    topic: "animals",
    language: "en",
    words: &[
      ("elephant", "The largest land animal"),
      ("tiger", "A striped big cat"),
      ("rabbit", "It hops and loves carrots"),
      ("penguin", "A bird that swims but cannot fly"),
      ("turtle", "It carries its home on its back"),
      ("lion", "The king of the savanna"),
      ("horse", "People ride it"),
      ("sheep", "It gives us wool"),
      ("dolphin", "A clever sea mammal"),
      ("eagle", "A bird with very sharp eyes"),
      ("goat", "It climbs and eats almost anything"),
      ("camel", "The ship of the desert"),
    ],
  },
];

/// Materialize a seed bank as owned entries.
pub fn bank_entries(bank: &SeedBank) -> Vec<WordEntry> {
  bank
    .words
    .iter()
    .map(|(word, clue)| WordEntry { word: (*word).into(), clue: (*clue).into() })
    .collect()
}

/// Absolute last resort: if no bank matches and OpenAI is unavailable, we
/// still hand the grid builder something that crosses well.
pub fn hard_fallback_words() -> Vec<WordEntry> {
  vec![
    WordEntry { word: "teacher".into(), clue: "The person who runs the class".into() },
    WordEntry { word: "school".into(), clue: "Where lessons happen".into() },
    WordEntry { word: "pencil".into(), clue: "You write with it and can erase after".into() },
    WordEntry { word: "chalk".into(), clue: "For writing on the blackboard".into() },
    WordEntry { word: "desk".into(), clue: "A student sits at it".into() },
    WordEntry { word: "recess".into(), clue: "The break between lessons".into() },
  ]
}
