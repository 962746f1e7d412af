mod config;
mod store;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use connect4::{
    get_ai_move, load_or_default, parse_history, Difficulty, GameError, GameMode, GameState,
    PlayerStats, StatsStore,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::store::JsonFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ServerConfig::from_env();
    let store = JsonFileStore::new(&config.stats_path);
    let state = AppState::new(store);
    let app = app_router(state, &config);

    let listener = TcpListener::bind(&config.addr).await?;
    info!("Listening on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

struct AppState {
    store: JsonFileStore,
    stats: Mutex<PlayerStats>,
}

impl AppState {
    fn new(store: JsonFileStore) -> Arc<Self> {
        let stats = load_or_default(&store);
        Arc::new(Self {
            store,
            stats: Mutex::new(stats),
        })
    }
}

type SharedState = Arc<AppState>;

fn app_router(state: SharedState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/move", get(handle_move))
        .route("/state", get(handle_state))
        .route(
            "/stats",
            get(handle_get_stats)
                .post(handle_record_stats)
                .delete(handle_reset_stats),
        )
        .with_state(state);
    let spa = Router::new().nest_service(
        "/",
        ServeDir::new(&config.static_dir).append_index_html_on_directories(true),
    );
    Router::new()
        .nest("/api", api)
        .merge(spa)
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_origin(axum::http::HeaderValue::from_static("*"))
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
struct GameQuery {
    #[serde(default)]
    moves: String,
    #[serde(default)]
    mode: GameMode,
    #[serde(default)]
    difficulty: Difficulty,
}

impl GameQuery {
    fn replay(&self) -> Result<GameState, GameError> {
        let columns = parse_history(&self.moves)?;
        GameState::replay(self.mode, self.difficulty, &columns)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct MoveResponse {
    column: usize,
}

/// Column the computer would play for whoever is to move after `moves`.
async fn handle_move(Query(query): Query<GameQuery>) -> Result<impl IntoResponse, ApiError> {
    let state = query.replay()?;
    if !state.is_in_progress() {
        return Err(GameError::GameOver.into());
    }
    let board = *state.board();
    let player = state.current_player();
    let difficulty = state.difficulty();
    // Hard search is CPU bound; keep it off the async workers.
    let column =
        tokio::task::spawn_blocking(move || get_ai_move(&board, player, difficulty)).await??;
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(MoveResponse { column })))
}

async fn handle_state(Query(query): Query<GameQuery>) -> Result<Json<GameState>, ApiError> {
    Ok(Json(query.replay()?))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Win,
    Loss,
    Draw,
}

#[derive(Debug, Deserialize)]
struct RecordRequest {
    outcome: Outcome,
    #[serde(default)]
    moves: u32,
}

async fn handle_get_stats(State(state): State<SharedState>) -> Json<PlayerStats> {
    Json(state.stats.lock().await.clone())
}

/// Applies `update` to a copy and saves it; the shared record only changes
/// once the store has accepted the new value.
async fn commit_stats(
    state: &AppState,
    update: impl FnOnce(&mut PlayerStats),
) -> Result<PlayerStats, ApiError> {
    let mut stats = state.stats.lock().await;
    let mut next = stats.clone();
    update(&mut next);
    next.validate()?;
    state.store.save(&next)?;
    *stats = next.clone();
    Ok(next)
}

async fn handle_record_stats(
    State(state): State<SharedState>,
    Json(request): Json<RecordRequest>,
) -> Result<Json<PlayerStats>, ApiError> {
    if request.outcome == Outcome::Win && request.moves == 0 {
        return Err(GameError::InvalidStats("a win needs a positive move count".into()).into());
    }
    let stats = commit_stats(&state, |stats| match request.outcome {
        Outcome::Win => stats.record_win(request.moves),
        Outcome::Loss => stats.record_loss(),
        Outcome::Draw => stats.record_draw(),
    })
    .await?;
    info!(outcome = ?request.outcome, total = stats.total_games, "recorded game");
    Ok(Json(stats))
}

async fn handle_reset_stats(
    State(state): State<SharedState>,
) -> Result<Json<PlayerStats>, ApiError> {
    Ok(Json(commit_stats(&state, PlayerStats::reset).await?))
}

#[derive(Debug)]
struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let body = format!("{}", self.0);
        (status, body).into_response()
    }
}
