//! Application state: in-memory puzzle store, topic banks, prompts, and the
//! optional OpenAI client.
//!
//! This module owns:
//!   - the puzzle store (by id)
//!   - merged topic banks (user TOML config first, then built-in seeds)
//!   - the prompts struct (from TOML or defaults)
//!   - the word-selection policy
//!
//! Word selection prefers OpenAI generation when available, then a
//! topic-matching bank, then any built-in seed bank. Randomness lives here
//! (bank sampling); the grid builder itself is deterministic.

use std::{collections::HashMap, sync::Arc};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::config::{load_service_config_from_env, Prompts};
use crate::domain::{Puzzle, PuzzleSource, WordEntry};
use crate::openai::OpenAI;
use crate::seeds::{bank_entries, hard_fallback_words, SEED_BANKS};

/// One selectable word list with its provenance.
#[derive(Clone, Debug)]
pub struct TopicBank {
    pub name: String,
    pub language: String,
    pub words: Vec<WordEntry>,
    pub source: PuzzleSource,
}

#[derive(Clone)]
pub struct AppState {
    pub by_id: Arc<RwLock<HashMap<String, Puzzle>>>,
    pub banks: Vec<TopicBank>,
    pub openai: Option<OpenAI>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, merge banks, init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        // Load TOML config if provided (prompts + optional topic banks).
        let cfg_opt = load_service_config_from_env();
        let prompts = cfg_opt
            .as_ref()
            .map(|c| c.prompts.clone())
            .unwrap_or_default();

        let mut banks: Vec<TopicBank> = Vec::new();

        // Config banks go first so they win topic-name lookups.
        if let Some(cfg) = &cfg_opt {
            for tc in &cfg.topics {
                if tc.words.is_empty() {
                    error!(target: "puzzle", topic = %tc.name, "Skipping bank topic: no words.");
                    continue;
                }
                banks.push(TopicBank {
                    name: tc.name.clone(),
                    language: tc.language.clone().unwrap_or_else(|| "en".into()),
                    words: tc.words.clone(),
                    source: PuzzleSource::LocalBank,
                });
            }
        }

        for sb in SEED_BANKS {
            banks.push(TopicBank {
                name: sb.topic.to_string(),
                language: sb.language.to_string(),
                words: bank_entries(sb),
                source: PuzzleSource::Seed,
            });
        }

        // Inventory summary by source.
        let (local, seed): (Vec<_>, Vec<_>) = banks
            .iter()
            .partition(|b| b.source == PuzzleSource::LocalBank);
        info!(target: "puzzle", local_bank = local.len(), seed = seed.len(), "Startup topic bank inventory");

        // Build optional OpenAI client (if API key present).
        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "classplay_backend", base_url = %oa.base_url, model = %oa.model, "OpenAI enabled.");
        } else {
            info!(target: "classplay_backend", "OpenAI disabled (no OPENAI_API_KEY). Using bank/seed word lists.");
        }

        Self {
            by_id: Arc::new(RwLock::new(HashMap::new())),
            banks,
            openai,
            prompts,
        }
    }

    /// Insert a finished puzzle into the store.
    #[instrument(level = "debug", skip(self, p), fields(id = %p.id))]
    pub async fn insert_puzzle(&self, p: Puzzle) {
        let mut by_id = self.by_id.write().await;
        by_id.insert(p.id.clone(), p);
    }

    /// Read-only access to a puzzle by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_puzzle(&self, id: &str) -> Option<Puzzle> {
        let by_id = self.by_id.read().await;
        by_id.get(id).cloned()
    }

    /// Topic names the service can answer for without OpenAI.
    pub fn topics(&self) -> Vec<String> {
        self.banks.iter().map(|b| b.name.clone()).collect()
    }

    /// Word-selection policy:
    /// 1. OpenAI generation when the client is configured.
    /// 2. A bank whose name matches the topic (config banks first).
    /// 3. Any built-in seed bank.
    /// 4. The hard fallback list.
    /// Returns the list, its provenance, and an origin tag for logs/API.
    #[instrument(level = "info", skip(self), fields(%topic, %language, count))]
    pub async fn choose_words(
        &self,
        topic: &str,
        language: &str,
        count: usize,
    ) -> (Vec<WordEntry>, PuzzleSource, &'static str) {
        if let Some(oa) = &self.openai {
            match oa.generate_words(&self.prompts, topic, language, count).await {
                Ok(words) => {
                    info!(target: "puzzle", %topic, n = words.len(), source = "openai_generated", "Generated fresh word list");
                    return (words, PuzzleSource::Generated, "openai_generated");
                }
                Err(e) => {
                    error!(target: "puzzle", %topic, error = %e, "OpenAI generation failed; falling back to banks");
                }
            }
        }

        if let Some(bank) = self
            .banks
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(topic))
        {
            let origin = match bank.source {
                PuzzleSource::LocalBank => "local_bank",
                _ => "seed",
            };
            warn!(target: "puzzle", %topic, bank = %bank.name, %origin, "Serving bank word list");
            return (sample(&bank.words, count), bank.source, origin);
        }

        // Unknown topic: fall back to the first built-in seed bank so the
        // teacher still gets a working puzzle.
        if let Some(bank) = self.banks.iter().find(|b| b.source == PuzzleSource::Seed) {
            warn!(target: "puzzle", %topic, bank = %bank.name, source = "seed", "Unknown topic; serving seed bank");
            return (sample(&bank.words, count), PuzzleSource::Seed, "seed");
        }

        warn!(target: "puzzle", %topic, source = "hard_fallback", "Serving hard fallback word list");
        (hard_fallback_words(), PuzzleSource::Seed, "hard_fallback")
    }
}

/// Sample up to `count` entries uniformly without replacement.
fn sample(words: &[WordEntry], count: usize) -> Vec<WordEntry> {
    let mut rng = rand::thread_rng();
    let mut picked: Vec<WordEntry> = words.to_vec();
    picked.shuffle(&mut rng);
    picked.truncate(count);
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_without_openai() -> AppState {
        let mut s = AppState::new();
        s.openai = None;
        s
    }

    #[tokio::test]
    async fn known_topic_serves_its_seed_bank() {
        let state = state_without_openai();
        let (words, source, origin) = state.choose_words("space", "en", 5).await;
        assert_eq!(words.len(), 5);
        assert_eq!(source, PuzzleSource::Seed);
        assert_eq!(origin, "seed");
    }

    #[tokio::test]
    async fn unknown_topic_falls_back_to_a_seed_bank() {
        let state = state_without_openai();
        let (words, source, _) = state.choose_words("quantum chromodynamics", "en", 8).await;
        assert!(!words.is_empty());
        assert_eq!(source, PuzzleSource::Seed);
    }

    #[tokio::test]
    async fn count_caps_the_sample() {
        let state = state_without_openai();
        let (words, _, _) = state.choose_words("animals", "en", 3).await;
        assert_eq!(words.len(), 3);
        let (all, _, _) = state.choose_words("animals", "en", 100).await;
        assert_eq!(all.len(), 12);
    }

    #[test]
    fn sample_never_repeats_entries() {
        let words = hard_fallback_words();
        let picked = sample(&words, words.len());
        let mut seen: Vec<&str> = picked.iter().map(|w| w.word.as_str()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), words.len());
    }
}
