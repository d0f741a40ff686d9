//! Serve command - runs the PermitDesk web server.
//!
//! Marshals the HTTP surface onto the library: one store session (and one
//! `AccountService`) per request, error-kind to status-code mapping, and
//! response bodies that never carry password hashes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::signal::unix::{SignalKind, signal};
use tracing_subscriber::EnvFilter;

use permitdesk::{
    account::{
        Account, AccountId, AccountService, AccountUpdate, Argon2Hasher, CredentialHasher,
        NewAccount,
    },
    download::{DownloadService, DownloadUpdate, NewDownload},
    registry::{PermissionPage, RegistryClient},
    store::MemoryStore,
};

use crate::cli::ServeArgs;

/// Owner id stamped onto placeholder report/download responses. The deployed
/// surface resolves the owner from the caller's token; token handling lives
/// outside this service.
const PLACEHOLDER_OWNER: AccountId = AccountId(1);

/// Shared application state
#[derive(Clone)]
struct AppState {
    store: MemoryStore,
    hasher: Arc<dyn CredentialHasher>,
    registry: RegistryClient,
    downloads: DownloadService,
}

/// Run the PermitDesk server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("permitdesk=info".parse().unwrap()),
        )
        .init();

    let app_state = AppState {
        store: MemoryStore::new(),
        hasher: Arc::new(Argon2Hasher),
        registry: RegistryClient::new(args.registry_url.clone()),
        downloads: DownloadService::new(),
    };

    // Build router
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/api/v1/users", post(create_user).get(list_users))
        .route(
            "/api/v1/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/v1/users/authenticate", post(authenticate_user))
        .route("/api/v1/reports", post(create_report).get(list_reports))
        .route(
            "/api/v1/reports/{id}",
            get(get_report).put(update_report).delete(delete_report),
        )
        .route("/api/v1/downloads", post(create_download).get(list_downloads))
        .route(
            "/api/v1/downloads/{id}",
            get(get_download).put(update_download).delete(delete_download),
        )
        .route("/api/v1/downloads/{id}/download", post(download_file))
        .with_state(app_state);

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("PermitDesk server listening on {local_addr}");
    println!("PermitDesk server starting on http://{local_addr}");
    println!();
    println!("Available endpoints:");
    println!("  GET    /                         - Service banner");
    println!("  GET    /health                   - Health check");
    println!("  POST   /api/v1/users             - Create account");
    println!("  GET    /api/v1/users             - List accounts (skip/limit)");
    println!("  GET    /api/v1/users/{{id}}        - Fetch account");
    println!("  PUT    /api/v1/users/{{id}}        - Update account");
    println!("  DELETE /api/v1/users/{{id}}        - Delete account");
    println!("  POST   /api/v1/users/authenticate - Verify credentials");
    println!("  GET    /api/v1/reports           - Planning-permissions register");
    println!("  *      /api/v1/downloads         - Download records (placeholder)");
    println!();
    println!("Press Ctrl+C to shutdown");

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to set up SIGTERM handler");
            let mut sigint =
                signal(SignalKind::interrupt()).expect("failed to set up SIGINT handler");

            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down"),
                _ = sigint.recv() => tracing::info!("Received SIGINT, shutting down"),
            }
        })
        .await?;

    println!("Server shut down");
    Ok(())
}

// ============================================================================
// Wire types
// ============================================================================

/// Account as it appears on the wire. Never carries the password hash.
#[derive(Serialize)]
struct UserBody {
    id: AccountId,
    email: String,
    username: String,
    first_name: Option<String>,
    last_name: Option<String>,
    is_active: bool,
    is_superuser: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Account> for UserBody {
    fn from(account: Account) -> Self {
        UserBody {
            id: account.id,
            email: account.email,
            username: account.username,
            first_name: account.first_name,
            last_name: account.last_name,
            is_active: account.is_active,
            is_superuser: account.is_superuser,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct Pagination {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

/// Report creation payload; echoed back by the placeholder route.
#[derive(Deserialize)]
struct ReportCreate {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_report_status")]
    status: String,
}

fn default_report_status() -> String {
    "pending".to_string()
}

#[derive(Serialize)]
struct ReportBody {
    id: i64,
    title: String,
    description: Option<String>,
    status: String,
    user_id: AccountId,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// Error marshalling
// ============================================================================

/// HTTP-facing error: a status code plus a FastAPI-style `detail` body.
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn not_found(what: &str) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            detail: format!("{what} not found"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<permitdesk::Error> for ApiError {
    fn from(err: permitdesk::Error) -> Self {
        let status = if err.is_conflict() {
            StatusCode::CONFLICT
        } else if err.is_invalid_credential() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else if err.is_registry_error() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        if status.is_server_error() {
            tracing::error!(module = err.module(), "request failed: {err}");
        }
        ApiError {
            status,
            detail: err.to_string(),
        }
    }
}

/// Run a closure against a fresh store session on the blocking pool.
///
/// Password hashing is deliberately CPU-expensive, so account operations stay
/// off the async workers.
async fn with_service<T, F>(state: AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut AccountService<'_>) -> permitdesk::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut session = state.store.session();
        let mut service = AccountService::new(&mut session, state.hasher.as_ref());
        op(&mut service)
    })
    .await
    .map_err(|e| {
        tracing::error!("account task panicked: {e}");
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: "internal error".to_string(),
        }
    })?
    .map_err(ApiError::from)
}

// ============================================================================
// Root & health
// ============================================================================

async fn handle_root() -> Json<serde_json::Value> {
    Json(json!({ "message": "PermitDesk backend" }))
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

// ============================================================================
// User handlers
// ============================================================================

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewAccount>,
) -> Result<(StatusCode, Json<UserBody>), ApiError> {
    let account = with_service(state, move |service| service.create_account(input)).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserBody>>, ApiError> {
    let accounts =
        with_service(state, move |service| service.list_accounts(page.skip, page.limit)).await?;
    Ok(Json(accounts.into_iter().map(UserBody::from).collect()))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserBody>, ApiError> {
    let account = with_service(state, move |service| service.get_by_id(id.into())).await?;
    match account {
        Some(account) => Ok(Json(account.into())),
        None => Err(ApiError::not_found("User")),
    }
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<AccountUpdate>,
) -> Result<Json<UserBody>, ApiError> {
    let account =
        with_service(state, move |service| service.update_account(id.into(), update)).await?;
    match account {
        Some(account) => Ok(Json(account.into())),
        None => Err(ApiError::not_found("User")),
    }
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = with_service(state, move |service| service.delete_account(id.into())).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("User"))
    }
}

async fn authenticate_user(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<UserBody>, ApiError> {
    let account = with_service(state, move |service| {
        service.authenticate(&credentials.username, &credentials.password)
    })
    .await?;
    match account {
        Some(account) => Ok(Json(account.into())),
        // Unknown user and wrong password produce the same response.
        None => Err(ApiError {
            status: StatusCode::UNAUTHORIZED,
            detail: "Invalid credentials".to_string(),
        }),
    }
}

// ============================================================================
// Report handlers
// ============================================================================

async fn create_report(Json(report): Json<ReportCreate>) -> (StatusCode, Json<ReportBody>) {
    // Placeholder: echoes the request until report persistence exists.
    let now = chrono::Utc::now();
    (
        StatusCode::CREATED,
        Json(ReportBody {
            id: 1,
            title: report.title,
            description: report.description,
            status: report.status,
            user_id: PLACEHOLDER_OWNER,
            created_at: now,
            updated_at: now,
        }),
    )
}

async fn list_reports(
    State(state): State<AppState>,
) -> Result<Json<PermissionPage>, ApiError> {
    let page = state
        .registry
        .planning_permissions()
        .await
        .map_err(permitdesk::Error::from)?;
    Ok(Json(page))
}

async fn get_report(Path(_id): Path<i64>) -> ApiError {
    ApiError::not_found("Report")
}

async fn update_report(Path(_id): Path<i64>) -> ApiError {
    ApiError::not_found("Report")
}

async fn delete_report(Path(_id): Path<i64>) -> ApiError {
    ApiError::not_found("Report")
}

// ============================================================================
// Download handlers
// ============================================================================

async fn create_download(
    State(state): State<AppState>,
    Json(request): Json<NewDownload>,
) -> (StatusCode, Json<permitdesk::download::Download>) {
    let download = state.downloads.create(PLACEHOLDER_OWNER, request);
    (StatusCode::CREATED, Json(download))
}

async fn list_downloads(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Json<Vec<permitdesk::download::Download>> {
    Json(state.downloads.list(PLACEHOLDER_OWNER, page.skip, page.limit))
}

async fn get_download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<permitdesk::download::Download>, ApiError> {
    state
        .downloads
        .get(PLACEHOLDER_OWNER, id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Download"))
}

async fn update_download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<DownloadUpdate>,
) -> Result<Json<permitdesk::download::Download>, ApiError> {
    state
        .downloads
        .update(PLACEHOLDER_OWNER, id, update)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Download"))
}

async fn delete_download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.downloads.delete(PLACEHOLDER_OWNER, id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Download"))
    }
}

async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<permitdesk::download::Download>, ApiError> {
    state
        .downloads
        .record_download(PLACEHOLDER_OWNER, id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("File"))
}
