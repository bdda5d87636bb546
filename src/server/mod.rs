//! JSON browsing server with per-session navigation and content reload

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::navigation::{Collection, NavError, NavigationState};
use crate::session::SessionStore;
use crate::view::{SiteInfo, Tab, TabView};
use crate::{Catalog, Folio};

/// Cookie carrying the session id
const SESSION_COOKIE: &str = "folio_session";

/// Configuration and content, swapped together on reload
struct LoadedSite {
    folio: Folio,
    catalog: Catalog,
}

/// Server state
struct ServerState {
    site: RwLock<LoadedSite>,
    sessions: SessionStore,
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let catalog = folio.load_catalog()?;
    let ttl = chrono::Duration::minutes(i64::from(folio.config.server.session_ttl_minutes));

    let state = Arc::new(ServerState {
        site: RwLock::new(LoadedSite {
            folio: folio.clone(),
            catalog,
        }),
        sessions: SessionStore::new(ttl),
    });

    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching content for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let watched = watched_paths(folio);
        let base_dir = folio.base_dir.clone();
        let state = state.clone();

        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(watched, base_dir, state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/site", get(site_handler))
        .route("/api/tabs/:tab", get(tab_handler))
        .route("/api/tabs/:tab/select/:index", post(select_handler))
        .route("/api/tabs/:tab/back", post(back_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Paths whose changes trigger a reload
fn watched_paths(folio: &Folio) -> Vec<(PathBuf, RecursiveMode)> {
    let mut paths = vec![
        (folio.blog_dir.clone(), RecursiveMode::NonRecursive),
        (folio.data_dir.clone(), RecursiveMode::NonRecursive),
        (folio.config_path(), RecursiveMode::NonRecursive),
    ];
    if let Some(cv) = &folio.cv_path {
        paths.push((cv.clone(), RecursiveMode::NonRecursive));
    }
    paths
}

/// Watch content and configuration, reloading the catalog on change
fn watch_and_reload(
    watched: Vec<(PathBuf, RecursiveMode)>,
    base_dir: PathBuf,
    state: Arc<ServerState>,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid reloads
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for (path, mode) in &watched {
        if path.exists() {
            debouncer.watcher().watch(path, *mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path_str = e.path.to_string_lossy();
                    !path_str.contains(".DS_Store") && !path_str.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match reload(&base_dir) {
                    Ok(site) => {
                        *state.site.blocking_write() = site;
                        tracing::info!("Reloaded content");
                    }
                    Err(e) => {
                        tracing::error!("Reload failed, keeping previous content: {:#}", e);
                    }
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

fn reload(base_dir: &std::path::Path) -> Result<LoadedSite> {
    let folio = Folio::new(base_dir)?;
    let catalog = folio.load_catalog()?;
    Ok(LoadedSite { folio, catalog })
}

/// Error returned by API handlers
#[derive(Debug)]
enum ApiError {
    Nav(NavError),
    Internal(anyhow::Error),
}

impl From<NavError> for ApiError {
    fn from(e: NavError) -> Self {
        ApiError::Nav(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Nav(NavError::IndexOutOfRange { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Nav(NavError::UnknownCollection(_)) => StatusCode::NOT_FOUND,
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match self {
            ApiError::Nav(e) => e.to_string(),
            ApiError::Internal(_) => "internal server error".to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn site_handler(State(state): State<Arc<ServerState>>) -> Result<Json<Value>, ApiError> {
    let site = state.site.read().await;
    Ok(Json(serde_json::to_value(SiteInfo::new(&site.folio.config))?))
}

async fn tab_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Path(tab): Path<String>,
) -> Result<Response, ApiError> {
    let tab: Tab = tab.parse()?;
    Ok(respond(&state, &headers, tab, |_, _| Ok(())).await)
}

async fn select_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Path((tab, index)): Path<(String, usize)>,
) -> Result<Response, ApiError> {
    let collection: Collection = tab.parse()?;
    let response = respond(&state, &headers, Tab::from(collection), |catalog, nav| {
        catalog.select(nav, collection, index)
    })
    .await;
    Ok(response)
}

async fn back_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Path(tab): Path<String>,
) -> Result<Response, ApiError> {
    let collection: Collection = tab.parse()?;
    let response = respond(&state, &headers, Tab::from(collection), |_, nav| {
        nav.go_back(collection);
        Ok(())
    })
    .await;
    Ok(response)
}

/// Apply `action` to the caller's session, then render `tab`
///
/// A session created by this request gets its cookie even when `action` fails.
async fn respond(
    state: &ServerState,
    headers: &HeaderMap,
    tab: Tab,
    action: impl FnOnce(&Catalog, &mut NavigationState) -> Result<(), NavError>,
) -> Response {
    let (id, created) = state.sessions.get_or_create(session_id(headers));
    let mut nav = state.sessions.snapshot(id);

    let result = {
        let site = state.site.read().await;
        action(&site.catalog, &mut nav)
            .map_err(ApiError::from)
            .and_then(|()| {
                let view = TabView::build(tab, &site.folio.config, &site.catalog, &mut nav);
                Ok(serde_json::to_value(view)?)
            })
    };
    state.sessions.update(id, nav);

    let mut response = match result {
        Ok(view) => Json(view).into_response(),
        Err(e) => e.into_response(),
    };
    if created {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Invalid session cookie {:?}: {}", cookie, e),
        }
    }
    response
}

/// Session id from the request cookies, if present and well-formed
fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find_map(|value| Uuid::parse_str(value).ok())
}
