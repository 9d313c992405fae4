use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::display::format_announcement;
use crate::error::SortError;
use crate::export::{map_groups_to_leagues, FinalizedGroup, LeagueAssignment};
use crate::request::SortRequest;
use crate::sorting::{classify_players, run_sort, SortingResult};

const ADMIN_KEY: &str = "is_admin";

/// The request a result was computed from, kept together so readers never mix runs
pub struct LastSort {
    pub request: SortRequest,
    pub result: SortingResult,
}

// In-memory storage for the last sort (the database lives elsewhere)
pub struct AppState {
    pub last_sort: Mutex<Option<LastSort>>,
    pub admin_password: String,
    pub season_year: Option<i32>,
}

impl AppState {
    pub fn new(admin_password: String, season_year: Option<i32>) -> Self {
        Self {
            last_sort: Mutex::new(None),
            admin_password,
            season_year,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
pub struct FinalizeRequest {
    leagues: Vec<LeagueAssignment>,
}

#[derive(Serialize)]
pub struct FinalizeResponse {
    groups: Vec<FinalizedGroup>,
    announcement: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SlotStats {
    slot_id: String,
    date_time: DateTime<Utc>,
    first_choice_requests: u32,
    ranked_requests: u32,
    available_players: u32,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| error::ErrorInternalServerError("state lock poisoned"))
}

fn is_admin(session: &Session) -> bool {
    session.get::<bool>(ADMIN_KEY).ok().flatten().unwrap_or(false)
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"}))
}

fn bad_request(err: &SortError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": err.to_string()}))
}

/// Per-slot demand among the selected players of a request
pub fn slot_popularity(request: &SortRequest) -> Vec<SlotStats> {
    let classified = classify_players(
        &request.selected_players,
        &request.preferences,
        &request.candidate_slots,
    );
    let selected: HashSet<&str> =
        request.selected_players.iter().map(|p| p.id.as_str()).collect();

    request
        .candidate_slots
        .iter()
        .map(|slot| {
            let records = request
                .preferences
                .iter()
                .filter(|r| r.slot_id == slot.id && selected.contains(r.player_id.as_str()));
            let (mut first_choice_requests, mut ranked_requests) = (0, 0);
            for record in records {
                if record.rank == 1 {
                    first_choice_requests += 1;
                }
                if record.rank > 0 {
                    ranked_requests += 1;
                }
            }

            SlotStats {
                slot_id: slot.id.clone(),
                date_time: slot.date_time,
                first_choice_requests,
                ranked_requests,
                available_players: classified.iter().filter(|p| p.can_attend(&slot.id)).count() as u32,
            }
        })
        .collect()
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        session.insert(ADMIN_KEY, true)?;
        info!("admin logged in");
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        warn!("rejected admin login");
        Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

async fn admin_logout(session: Session) -> Result<HttpResponse> {
    session.purge();
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

// Runs the sort and keeps the result for review
async fn sort_players(
    req: web::Json<SortRequest>,
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse> {
    if !is_admin(&session) {
        return Ok(unauthorized());
    }

    let mut request = req.into_inner();
    if let Some(year) = state.season_year {
        request.restrict_to_season(year);
    }

    let result = match run_sort(&request, &mut rand::thread_rng()) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "sort request rejected");
            return Ok(bad_request(&e));
        }
    };

    info!(
        completed = result.completed_groups.len(),
        ungrouped = result.ungrouped_players.len(),
        "sort finished"
    );

    let response = HttpResponse::Ok().json(&result);
    *lock(&state.last_sort)? = Some(LastSort { request, result });

    Ok(response)
}

async fn get_result(state: web::Data<AppState>) -> Result<HttpResponse> {
    let last = lock(&state.last_sort)?;

    if let Some(ref last) = *last {
        Ok(HttpResponse::Ok().json(&last.result))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": SortError::NoResult.to_string()})))
    }
}

// Stats endpoint
async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let last = lock(&state.last_sort)?;

    if let Some(ref last) = *last {
        Ok(HttpResponse::Ok().json(slot_popularity(&last.request)))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No data available"})))
    }
}

// Binds completed groups to leagues and builds the announcement
async fn finalize_groups(
    req: web::Json<FinalizeRequest>,
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse> {
    if !is_admin(&session) {
        return Ok(unauthorized());
    }

    let last = lock(&state.last_sort)?;
    let Some(ref last) = *last else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": SortError::NoResult.to_string()})));
    };

    match map_groups_to_leagues(&last.result, &req.leagues) {
        Ok(groups) => {
            info!(groups = groups.len(), "groups finalized");
            let announcement = format_announcement(&groups);
            Ok(HttpResponse::Ok().json(FinalizeResponse {
                groups,
                announcement,
            }))
        }
        Err(e) => Ok(bad_request(&e)),
    }
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .build()
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        .route("/api/login", web::post().to(admin_login))
        .route("/api/logout", web::post().to(admin_logout))
        .route("/api/sort", web::post().to(sort_players))
        .route("/api/result", web::get().to(get_result))
        .route("/api/stats", web::get().to(get_stats))
        .route("/api/finalize", web::post().to(finalize_groups));
}

pub async fn start_server(config: &Config) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(
        config.admin.password.clone(),
        config.season.year,
    ));
    let secret_key = Key::generate();

    info!(host = %config.server.host, port = config.server.port, "starting admin API");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(session_middleware(secret_key.clone()))
            .configure(routes)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
