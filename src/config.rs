//! Loading service configuration (prompts + optional topic word banks)
//! from TOML.
//!
//! See `ServiceConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{info, error};

use crate::domain::WordEntry;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ServiceConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub topics: Vec<TopicCfg>,
}

/// Topic bank entry accepted in TOML configuration. Teachers can ship their
/// own curated word lists per class topic.
#[derive(Clone, Debug, Deserialize)]
pub struct TopicCfg {
  pub name: String,
  #[serde(default)] pub language: Option<String>,
  #[serde(default)] pub words: Vec<WordEntry>,
}

/// Prompts used by the OpenAI client. Defaults are sensible for classroom
/// crossword content. Override them in TOML to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub crossword_system: String,
  pub crossword_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      crossword_system: "You are a crossword content generator for school teachers. Respond ONLY with strict JSON.".into(),
      crossword_user_template: "Generate {count} crossword entries about '{topic}' in language '{language}'. Return JSON with a field \"words\": an array of objects {\"word\": string, \"clue\": string}. Each word must be a single word (letters only, no spaces or hyphens); each clue must be one short, child-friendly sentence that does not contain the word itself.".into(),
    }
  }
}

/// Attempt to load `ServiceConfig` from CLASSPLAY_CONFIG_PATH. On any
/// parsing/IO error, returns None and the caller falls back to defaults.
pub fn load_service_config_from_env() -> Option<ServiceConfig> {
  let path = std::env::var("CLASSPLAY_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<ServiceConfig>(&s) {
      Ok(cfg) => {
        info!(target: "classplay_backend", %path, "Loaded service config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "classplay_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "classplay_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
