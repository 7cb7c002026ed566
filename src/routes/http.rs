//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters plus basic result info.

use std::sync::Arc;
use axum::{extract::{Path, State}, http::StatusCode, Json, response::{IntoResponse, Response}};
use tracing::{info, instrument};

use crate::logic::{fetch_puzzle, generate_puzzle};
use crate::protocol::*;
use crate::state::AppState;

const DEFAULT_COUNT: usize = 10;
const MAX_COUNT: usize = 20;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic))]
pub async fn http_post_crossword(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CrosswordIn>,
) -> impl IntoResponse {
  let language = body.language.unwrap_or_else(|| "en".into());
  let count = body.count.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT);
  let puzzle = generate_puzzle(&state, &body.topic, &language, count).await;
  info!(
    target: "puzzle",
    id = %puzzle.id,
    topic = %puzzle.topic,
    origin = %puzzle.origin,
    clues = puzzle.crossword.clues.len(),
    "HTTP crossword served"
  );
  Json(to_out(&puzzle))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_crossword(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Response {
  match fetch_puzzle(&state, &id).await {
    Some(puzzle) => {
      info!(target: "puzzle", %id, "HTTP stored crossword served");
      Json(to_out(&puzzle)).into_response()
    }
    None => (
      StatusCode::NOT_FOUND,
      Json(ErrorOut { error: format!("Unknown puzzle id: {}", id) }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(TopicsOut { topics: state.topics() })
}
