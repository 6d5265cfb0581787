//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT. Log level via RUST_LOG.
//!
//! Each browser session owns one `TournamentEngine`; the page keeps the session id and
//! sends it with every request.

use actix_files::Files;
use actix_web::{
    get, post,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use elimination_scorekeeper::logic::MAX_TEAMS;
use elimination_scorekeeper::{
    default_team_configs, PendingAction, PlayerId, TeamConfig, TeamId, Tournament,
    TournamentEngine, TournamentError, TournamentState,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Identifies one browser session (and its engine).
type SessionId = Uuid;

/// Per-session entry: the engine + last activity time (for auto-cleanup).
struct SessionEntry {
    engine: TournamentEngine,
    last_activity: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            engine: TournamentEngine::new(),
            last_activity: Instant::now(),
        }
    }
}

/// In-memory state: one engine per session. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);
/// How often the cleanup task runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);
/// Upper bound on live sessions; new sessions are refused beyond it.
const MAX_SESSIONS: usize = 10_000;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// What the page renders from: the session, the engine state, and the tournament if any.
#[derive(Serialize)]
struct SessionSnapshot<'a> {
    session_id: SessionId,
    state: TournamentState,
    tournament: Option<&'a Tournament>,
}

impl<'a> SessionSnapshot<'a> {
    fn of(session_id: SessionId, engine: &'a TournamentEngine) -> Self {
        Self {
            session_id,
            state: engine.state(),
            tournament: engine.tournament(),
        }
    }
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    num_teams: usize,
    players_per_team: usize,
    #[serde(default = "default_format")]
    format: u32,
    /// Falls back to the preset names/colors when omitted.
    #[serde(default)]
    teams: Option<Vec<TeamConfig>>,
}

fn default_format() -> u32 {
    3
}

/// Body for destructive actions; without `confirmed: true` the server asks first.
#[derive(Default, Deserialize)]
struct ConfirmBody {
    #[serde(default)]
    confirmed: bool,
}

#[derive(Deserialize)]
struct PresetsQuery {
    #[serde(default = "default_preset_count")]
    count: usize,
}

fn default_preset_count() -> usize {
    2
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session, team, and player id.
#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    team_id: TeamId,
    player_id: PlayerId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `f` against the engine of session `id`, refreshing its activity time.
/// Answers 404 for unknown sessions and 500 if the lock is poisoned.
fn with_session<F>(state: &AppState, id: SessionId, f: F) -> HttpResponse
where
    F: FnOnce(&mut TournamentEngine) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.engine)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

/// Answer with the updated snapshot or the error.
fn snapshot_or_error(
    id: SessionId,
    engine: &mut TournamentEngine,
    op: impl FnOnce(&mut TournamentEngine) -> Result<(), TournamentError>,
) -> HttpResponse {
    match op(&mut *engine) {
        Ok(()) => HttpResponse::Ok().json(SessionSnapshot::of(id, engine)),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "elimination-scorekeeper",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Default team names/colors for the setup form.
#[get("/api/team-presets")]
async fn api_team_presets(query: Query<PresetsQuery>) -> HttpResponse {
    HttpResponse::Ok().json(default_team_configs(query.count.min(MAX_TEAMS)))
}

/// Add a fresh session unless `max` sessions are live. Expired sessions are swept
/// before giving up.
fn insert_session(
    sessions: &mut HashMap<SessionId, SessionEntry>,
    max: usize,
) -> Option<SessionId> {
    if sessions.len() >= max {
        sessions.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
        if sessions.len() >= max {
            return None;
        }
    }
    let id = Uuid::new_v4();
    sessions.insert(id, SessionEntry::new());
    Some(id)
}

/// Open a new session with an unconfigured engine (client stores the id).
#[post("/api/sessions")]
async fn api_create_session(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let Some(id) = insert_session(&mut g, MAX_SESSIONS) else {
        log::warn!("Refused new session: {} sessions open", g.len());
        return HttpResponse::ServiceUnavailable()
            .json(serde_json::json!({ "error": "Too many open sessions" }));
    };
    log::info!("Opened session {}", id);
    HttpResponse::Ok().json(SessionSnapshot::of(id, &g[&id].engine))
}

#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let id = path.id;
    with_session(&state, id, |engine| {
        HttpResponse::Ok().json(SessionSnapshot::of(id, engine))
    })
}

/// Set up the tournament (engine must be unconfigured).
#[post("/api/sessions/{id}/tournament")]
async fn api_create_tournament(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let id = path.id;
    let body = body.into_inner();
    let teams = body
        .teams
        .unwrap_or_else(|| default_team_configs(body.num_teams.min(MAX_TEAMS)));
    with_session(&state, id, |engine| {
        snapshot_or_error(id, engine, |e| {
            e.create_tournament(body.num_teams, body.players_per_team, body.format, teams)
                .map(|_| ())
        })
    })
}

/// Start the game (Configured -> round 1).
#[post("/api/sessions/{id}/start")]
async fn api_start_game(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let id = path.id;
    with_session(&state, id, |engine| {
        snapshot_or_error(id, engine, |e| e.start_game().map(|_| ()))
    })
}

/// Eliminate a player. Without confirmation answers 409 with the prompt.
#[post("/api/sessions/{id}/teams/{team_id}/players/{player_id}/eliminate")]
async fn api_eliminate_player(
    state: AppState,
    path: Path<SessionPlayerPath>,
    body: Option<Json<ConfirmBody>>,
) -> HttpResponse {
    let SessionPlayerPath {
        id,
        team_id,
        player_id,
    } = path.into_inner();
    let confirmed = body.map(|b| b.confirmed).unwrap_or_default();
    with_session(&state, id, |engine| {
        if !confirmed {
            let action = PendingAction::EliminatePlayer { team_id, player_id };
            return match engine.confirmation(action) {
                Ok(c) => HttpResponse::Conflict()
                    .json(serde_json::json!({ "confirmation_required": c })),
                Err(e) => error_response(&e),
            };
        }
        snapshot_or_error(id, engine, |e| {
            e.eliminate_player(team_id, player_id).map(|_| ())
        })
    })
}

/// Score the current round; returns the round result alongside the snapshot.
#[post("/api/sessions/{id}/rounds/end")]
async fn api_end_round(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let id = path.id;
    with_session(&state, id, |engine| match engine.end_round() {
        Ok(result) => HttpResponse::Ok().json(serde_json::json!({
            "announcement": result.announcement(),
            "round": result,
            "session": SessionSnapshot::of(id, engine),
        })),
        Err(e) => error_response(&e),
    })
}

#[post("/api/sessions/{id}/rounds/next")]
async fn api_next_round(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let id = path.id;
    with_session(&state, id, |engine| {
        snapshot_or_error(id, engine, |e| e.next_round().map(|_| ()))
    })
}

/// Discard the tournament. Without confirmation answers 409 with the prompt.
#[post("/api/sessions/{id}/reset")]
async fn api_reset(
    state: AppState,
    path: Path<SessionPath>,
    body: Option<Json<ConfirmBody>>,
) -> HttpResponse {
    let id = path.id;
    let confirmed = body.map(|b| b.confirmed).unwrap_or_default();
    with_session(&state, id, |engine| {
        if !confirmed {
            return match engine.confirmation(PendingAction::Reset) {
                Ok(c) => HttpResponse::Conflict()
                    .json(serde_json::json!({ "confirmation_required": c })),
                Err(e) => error_response(&e),
            };
        }
        engine.reset();
        HttpResponse::Ok().json(SessionSnapshot::of(id, engine))
    })
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// API routes (shared by `main` and the handler tests).
fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_team_presets)
        .service(api_create_session)
        .service(api_get_session)
        .service(api_create_tournament)
        .service(api_start_game)
        .service(api_eliminate_player)
        .service(api_end_round)
        .service(api_next_round)
        .service(api_reset);
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));

    // Background task: periodically remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(favicon)
            .configure(api_routes)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
