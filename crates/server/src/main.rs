// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vg_booking::CodeSummary;
use vg_booking_api::{
    ApiError, ApplicationState, CommitReservationRequest, ModifyReservationRequest,
    RecordPaymentRequest, UpsertVendorRequest, VoidReservationRequest, commit_reservation,
    delete_vendor, group_preview, list_vendors, load_remote_config, modify_reservation,
    preview_code, record_payment, refresh_vendor_mirror, retire_code, sync, update_admin_config,
    upsert_vendor, void_reservation,
};
use vg_booking_domain::PricingConfig;
use vg_booking_persistence::{LocalState, LocalStateFile, Persistence};

mod live;

use live::{LiveEvent, LiveEventBroadcaster, RefreshSignal, live_events_handler};

/// Buffer size of the refresh-signal channel.
const REFRESH_BUFFER_SIZE: usize = 32;

/// Valle Glaciares booking server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seconds between periodic reconciliation syncs.
    #[arg(long, default_value_t = 15)]
    sync_interval_secs: u64,

    /// Path of the local mirror state file.
    #[arg(long, default_value = "vg-booking-local.json")]
    local_state: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The per-session application state (cache, retired set, registry,
    /// pricing).
    state: Arc<RwLock<ApplicationState>>,
    /// The remote store adapter.
    persistence: Arc<Mutex<Persistence>>,
    /// The local mirror contents (preserves operator UI preferences).
    local_state: Arc<Mutex<LocalState>>,
    /// The local mirror file handle.
    local_file: Arc<LocalStateFile>,
    /// WebSocket live-event broadcaster.
    broadcaster: Arc<LiveEventBroadcaster>,
    /// The refresh-signal channel the sync task subscribes to.
    refresh_tx: broadcast::Sender<RefreshSignal>,
}

impl AppState {
    /// Writes the current application state into the local mirror file.
    async fn save_local(&self) {
        let mut mirror = self.local_state.lock().await;
        self.state.read().await.write_local(&mut mirror);
        self.local_file.save(&mirror);
    }

    /// Emits a data-change refresh signal (errors mean no subscriber yet).
    fn signal_data_changed(&self) {
        let _ = self.refresh_tx.send(RefreshSignal::DataChanged);
    }
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// A human-readable description.
    error: String,
    /// Corrective messages for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<Vec<String>>,
}

/// Maps an operation error onto an HTTP response.
fn error_response(err: &ApiError) -> Response {
    let (status, messages): (StatusCode, Option<Vec<String>>) = match err {
        ApiError::ValidationFailed { messages } => {
            (StatusCode::UNPROCESSABLE_ENTITY, Some(messages.clone()))
        }
        ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, None),
        ApiError::DomainRuleViolation { .. } => (StatusCode::CONFLICT, None),
        ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, None),
        ApiError::RemoteFailure { .. } => (StatusCode::BAD_GATEWAY, None),
        ApiError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, None),
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
            messages,
        }),
    )
        .into_response()
}

/// Returns the current UTC instant as an ISO 8601 string.
fn now_iso() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| String::from("unknown"))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn get_next_code(
    AxumState(app): AxumState<AppState>,
    Path(vendor_key): Path<String>,
) -> Response {
    let state = app.state.read().await;
    match preview_code(&state, &vendor_key) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn get_group_preview(
    AxumState(app): AxumState<AppState>,
    Path(date): Path<String>,
) -> Response {
    let state = app.state.read().await;
    Json(group_preview(&state, &date)).into_response()
}

async fn post_reservation(
    AxumState(app): AxumState<AppState>,
    Json(request): Json<CommitReservationRequest>,
) -> Response {
    let mut persistence = app.persistence.lock().await;
    let mut state = app.state.write().await;
    match commit_reservation(&mut state, &mut persistence, &request, &now_iso()) {
        Ok(response) => {
            drop(state);
            drop(persistence);
            app.broadcaster.broadcast(&LiveEvent::ReservationCommitted {
                code: response.code.clone(),
                group_number: response.group_number.clone(),
            });
            app.signal_data_changed();
            app.save_local().await;
            Json(response).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// Body of a payment request (the code comes from the path).
#[derive(Debug, Deserialize)]
struct PaymentBody {
    vendor: String,
    method: String,
    amount: i64,
    #[serde(default)]
    receipt: String,
}

async fn post_payment(
    AxumState(app): AxumState<AppState>,
    Path(code): Path<String>,
    Json(body): Json<PaymentBody>,
) -> Response {
    let request: RecordPaymentRequest = RecordPaymentRequest {
        code,
        vendor: body.vendor,
        method: body.method,
        amount: body.amount,
        receipt: body.receipt,
    };
    let mut persistence = app.persistence.lock().await;
    let mut state = app.state.write().await;
    match record_payment(&mut state, &mut persistence, &request, &now_iso()) {
        Ok(response) => {
            drop(state);
            drop(persistence);
            app.broadcaster.broadcast(&LiveEvent::PaymentRecorded {
                code: response.code.clone(),
                amount: request.amount,
            });
            app.signal_data_changed();
            app.save_local().await;
            Json(response).into_response()
        }
        Err(err) => error_response(&err),
    }
}

async fn put_reservation(
    AxumState(app): AxumState<AppState>,
    Path(code): Path<String>,
    Json(mut request): Json<ModifyReservationRequest>,
) -> Response {
    request.code = code;
    let mut persistence = app.persistence.lock().await;
    let mut state = app.state.write().await;
    match modify_reservation(&mut state, &mut persistence, &request, &now_iso()) {
        Ok(response) => {
            drop(state);
            drop(persistence);
            app.broadcaster.broadcast(&LiveEvent::ReservationModified {
                code: response.code.clone(),
            });
            app.signal_data_changed();
            {
                // Remember the code for the modification screen's reload.
                let mut mirror = app.local_state.lock().await;
                mirror.last_opened_code = Some(response.code.clone());
            }
            app.save_local().await;
            Json(response).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// Body of a void request (the code comes from the path).
#[derive(Debug, Deserialize)]
struct VoidBody {
    vendor: String,
    reason: String,
}

async fn delete_reservation(
    AxumState(app): AxumState<AppState>,
    Path(code): Path<String>,
    Json(body): Json<VoidBody>,
) -> Response {
    let request: VoidReservationRequest = VoidReservationRequest {
        code,
        vendor: body.vendor,
        reason: body.reason,
    };
    let mut persistence = app.persistence.lock().await;
    let mut state = app.state.write().await;
    match void_reservation(&mut state, &mut persistence, &request, &now_iso()) {
        Ok(response) => {
            drop(state);
            drop(persistence);
            app.broadcaster.broadcast(&LiveEvent::ReservationVoided {
                code: response.code.clone(),
            });
            app.signal_data_changed();
            app.save_local().await;
            Json(response).into_response()
        }
        Err(err) => error_response(&err),
    }
}

async fn post_retire_code(
    AxumState(app): AxumState<AppState>,
    Path(code): Path<String>,
) -> Response {
    let response = {
        let mut state = app.state.write().await;
        retire_code(&mut state, &code)
    };
    app.broadcaster.broadcast(&LiveEvent::CodeRetired {
        code: response.code.clone(),
    });
    app.save_local().await;
    Json(response).into_response()
}

async fn post_sync(AxumState(app): AxumState<AppState>) -> Response {
    let mut persistence = app.persistence.lock().await;
    let mut state = app.state.write().await;
    match sync(&mut state, &mut *persistence, &now_iso()) {
        Ok(response) => {
            drop(state);
            drop(persistence);
            app.broadcaster.broadcast(&LiveEvent::CacheRebuilt {
                reservations: response.reservations,
            });
            app.save_local().await;
            Json(response).into_response()
        }
        Err(err) => error_response(&err),
    }
}

async fn get_vendors(AxumState(app): AxumState<AppState>) -> Response {
    let state = app.state.read().await;
    Json(list_vendors(&state)).into_response()
}

/// Body of a vendor upsert (the key comes from the path).
#[derive(Debug, Deserialize)]
struct VendorBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    range_start: Option<u32>,
    #[serde(default)]
    range_end: Option<u32>,
}

async fn put_vendor(
    AxumState(app): AxumState<AppState>,
    Path(vendor_key): Path<String>,
    Json(body): Json<VendorBody>,
) -> Response {
    let request: UpsertVendorRequest = UpsertVendorRequest {
        vendor_key,
        name: body.name,
        prefix: body.prefix,
        range_start: body.range_start,
        range_end: body.range_end,
    };
    let mut persistence = app.persistence.lock().await;
    let mut state = app.state.write().await;
    match upsert_vendor(&mut state, &mut persistence, &request) {
        Ok(listing) => {
            drop(state);
            drop(persistence);
            app.broadcaster.broadcast(&LiveEvent::VendorsChanged);
            app.save_local().await;
            Json(listing).into_response()
        }
        Err(err) => error_response(&err),
    }
}

async fn delete_vendor_handler(
    AxumState(app): AxumState<AppState>,
    Path(vendor_key): Path<String>,
) -> Response {
    let mut persistence = app.persistence.lock().await;
    let mut state = app.state.write().await;
    match delete_vendor(&mut state, &mut persistence, &vendor_key) {
        Ok(()) => {
            drop(state);
            drop(persistence);
            app.broadcaster.broadcast(&LiveEvent::VendorsChanged);
            app.save_local().await;
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(&err),
    }
}

async fn get_config(AxumState(app): AxumState<AppState>) -> Response {
    let state = app.state.read().await;
    Json(state.pricing.clone()).into_response()
}

async fn put_config(
    AxumState(app): AxumState<AppState>,
    Json(config): Json<PricingConfig>,
) -> Response {
    let mut persistence = app.persistence.lock().await;
    let mut state = app.state.write().await;
    match update_admin_config(&mut state, &mut persistence, &config, &now_iso()) {
        Ok(config_id) => {
            drop(state);
            drop(persistence);
            app.broadcaster.broadcast(&LiveEvent::ConfigChanged);
            // Prices feed every cached row; rebuild with the new rates.
            app.signal_data_changed();
            Json(serde_json::json!({ "config_id": config_id })).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// The day viewer's data for one service date.
#[derive(Debug, Serialize)]
struct DaySummaryResponse {
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    groups: Vec<CodeSummary>,
}

async fn get_day_summary(
    AxumState(app): AxumState<AppState>,
    Path(date): Path<String>,
) -> Response {
    let state = app.state.read().await;
    let mut codes: Vec<String> = state
        .cache
        .passengers
        .iter()
        .filter(|row| row.service_date == date)
        .map(|row| row.code.clone())
        .collect();
    codes.sort();
    codes.dedup();

    let groups: Vec<CodeSummary> = codes
        .iter()
        .filter_map(|code| state.cache.summary_for_code(code))
        .collect();
    drop(state);

    let comment: Option<String> = {
        let mut mirror = app.local_state.lock().await;
        mirror.day_view_date = Some(date.clone());
        app.local_file.save(&mirror);
        mirror.day_comments.get(&date).cloned()
    };
    Json(DaySummaryResponse {
        date,
        comment,
        groups,
    })
    .into_response()
}

/// Body of a day-comment update.
#[derive(Debug, Deserialize)]
struct DayCommentBody {
    comment: String,
}

async fn put_day_comment(
    AxumState(app): AxumState<AppState>,
    Path(date): Path<String>,
    Json(body): Json<DayCommentBody>,
) -> Response {
    {
        let mut mirror = app.local_state.lock().await;
        if body.comment.is_empty() {
            mirror.day_comments.remove(&date);
        } else {
            mirror.day_comments.insert(date, body.comment);
        }
        app.local_file.save(&mirror);
    }
    StatusCode::NO_CONTENT.into_response()
}

// ============================================================================
// Sync task
// ============================================================================

/// Runs the background Reconciliation Sync loop.
///
/// Wakes on any refresh signal and on the periodic interval. Each run is
/// a full snapshot rebuild, so overlapping triggers are safe: the last
/// completed run wins.
async fn run_sync_task(
    app: AppState,
    mut refresh_rx: broadcast::Receiver<RefreshSignal>,
    interval_secs: u64,
) {
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
    // The first tick fires immediately; the startup sync already ran.
    ticker.tick().await;

    loop {
        let signal: RefreshSignal = tokio::select! {
            _ = ticker.tick() => RefreshSignal::Interval,
            received = refresh_rx.recv() => match received {
                Ok(signal) => signal,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Refresh signals lagged; coalescing into one sync");
                    RefreshSignal::DataChanged
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        };

        let result = {
            let mut persistence = app.persistence.lock().await;
            let mut state = app.state.write().await;
            sync(&mut state, &mut *persistence, &now_iso())
        };
        match result {
            Ok(response) => {
                app.broadcaster.broadcast(&LiveEvent::CacheRebuilt {
                    reservations: response.reservations,
                });
                app.save_local().await;
            }
            Err(err) => {
                // The previous cache stays authoritative until the next
                // successful sync.
                error!(?signal, error = %err, "Reconciliation sync failed");
            }
        }
    }
}

// ============================================================================
// Startup
// ============================================================================

fn build_router(app: AppState) -> Router {
    let live_routes: Router = Router::new()
        .route("/live", get(live_events_handler))
        .with_state(Arc::clone(&app.broadcaster));

    Router::new()
        .route("/health", get(health))
        .route("/vendors", get(get_vendors))
        .route("/vendors/{key}", put(put_vendor).delete(delete_vendor_handler))
        .route("/vendors/{key}/next-code", get(get_next_code))
        .route("/reservations", post(post_reservation))
        .route(
            "/reservations/{code}",
            put(put_reservation).delete(delete_reservation),
        )
        .route("/reservations/{code}/payments", post(post_payment))
        .route("/codes/{code}/retire", post(post_retire_code))
        .route("/sync", post(post_sync))
        .route("/config", get(get_config).put(put_config))
        .route("/days/{date}", get(get_day_summary))
        .route("/days/{date}/comment", put(put_day_comment))
        .route("/groups/{date}/next", get(get_group_preview))
        .with_state(app)
        .merge(live_routes)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();

    let persistence: Persistence = match &args.database {
        Some(path) => {
            info!(path, "Opening database file");
            Persistence::new_with_file(path)?
        }
        None => {
            info!("Using in-memory database");
            Persistence::new_in_memory()?
        }
    };

    // Fast start from the local mirror; the remote store stays the source
    // of truth and the startup sync below replaces the cache.
    let local_file: LocalStateFile = LocalStateFile::new(&args.local_state);
    let mirror: LocalState = local_file.load();
    let state: ApplicationState = ApplicationState::from_local(&mirror);

    let (refresh_tx, refresh_rx) = broadcast::channel(REFRESH_BUFFER_SIZE);
    let app: AppState = AppState {
        state: Arc::new(RwLock::new(state)),
        persistence: Arc::new(Mutex::new(persistence)),
        local_state: Arc::new(Mutex::new(mirror)),
        local_file: Arc::new(local_file),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
        refresh_tx,
    };

    // Startup order mirrors a session login: configuration, vendor
    // mirror, then the first full sync.
    {
        let mut persistence = app.persistence.lock().await;
        let mut state = app.state.write().await;
        if let Err(err) = load_remote_config(&mut state, &mut persistence) {
            warn!(error = %err, "Failed to load admin configuration; using defaults");
        }
        if let Err(err) = refresh_vendor_mirror(&mut state, &mut persistence) {
            warn!(error = %err, "Failed to refresh vendor mirror; using local copy");
        }
        match sync(&mut state, &mut *persistence, &now_iso()) {
            Ok(response) => info!(
                reservations = response.reservations,
                passengers = response.passengers,
                "Startup sync completed"
            ),
            Err(err) => warn!(error = %err, "Startup sync failed; local cache stays authoritative"),
        }
    }
    app.save_local().await;

    tokio::spawn(run_sync_task(
        app.clone(),
        refresh_rx,
        args.sync_interval_secs,
    ));

    let router: Router = build_router(app);
    let addr: String = format!("0.0.0.0:{}", args.port);
    info!(addr, "Starting server");
    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
