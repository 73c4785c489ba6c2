//! REST API wrapper around the BIN resolver.
//!
//! # Usage
//!
//! ```bash
//! # Start server (requires HANDY_API_KEY; cache path via BIN_CACHE_DB)
//! HANDY_API_KEY=... bin-resolver-server
//!
//! # With custom port
//! bin-resolver-server --port 8080
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.
//!
//! # Behavior
//!
//! `GET /bin-lookup?bin=...` answers 400 only for a missing or too-short
//! `bin` parameter and 500 only when no API key is configured. Everything
//! else is a 200 with best-effort data: upstream failures degrade to the
//! offline fallback's "Unknown" placeholders rather than error statuses.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use bin_resolver::{
    cache::SqliteBinCache, input, remote::HandyApiClient, BinResolver, CardDetails,
};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BIN Resolver API",
        version = "0.1.0",
        description = "Resolves card BINs to issuer metadata via cache, external lookup, and offline fallback.",
        license(name = "MIT"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Lookup", description = "BIN resolution endpoints"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(bin_lookup, health),
    components(schemas(BinLookupResponse, ErrorResponse, HealthResponse))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, IntoParams)]
struct BinQuery {
    /// BIN to resolve: at least the first 6 digits of a card number.
    bin: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "bank": "JP Morgan Chase - Visa Classic",
    "type": "credit",
    "category": "CLASSIC",
    "country": "United States",
    "scheme": "visa",
    "bin": "414720"
}))]
struct BinLookupResponse {
    /// Issuing bank display name, or "Unknown"
    bank: String,
    /// Card type ("credit", "debit", ...), or "Unknown"
    #[serde(rename = "type")]
    card_type: String,
    /// Card tier if known, else the scheme, else "Unknown"
    category: String,
    /// Issuing country display name, or "Unknown"
    country: String,
    /// Card network, or "Unknown"
    scheme: String,
    /// The BIN that was resolved
    bin: String,
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    /// Human-readable error message
    error: String,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

struct AppState {
    resolver: BinResolver,
    /// False when HANDY_API_KEY was absent at startup.
    configured: bool,
}

impl BinLookupResponse {
    fn from_details(bin: String, details: CardDetails) -> Self {
        let scheme = details.scheme.map(|s| s.name().to_string());
        Self {
            bank: details.bank_name.unwrap_or_else(unknown),
            card_type: details.card_type.unwrap_or_else(unknown),
            category: details
                .card_tier
                .or_else(|| scheme.clone())
                .unwrap_or_else(unknown),
            country: details.country.unwrap_or_else(unknown),
            scheme: scheme.unwrap_or_else(unknown),
            bin,
        }
    }
}

fn unknown() -> String {
    "Unknown".to_string()
}

// ============================================================================
// Handlers
// ============================================================================

/// Resolve a BIN to issuer metadata
#[utoipa::path(
    get,
    path = "/bin-lookup",
    params(BinQuery),
    responses(
        (status = 200, description = "Best-effort BIN metadata", body = BinLookupResponse),
        (status = 400, description = "Missing or too-short bin parameter", body = ErrorResponse),
        (status = 500, description = "Service not configured", body = ErrorResponse)
    ),
    tag = "Lookup"
)]
async fn bin_lookup(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BinQuery>,
) -> Result<Json<BinLookupResponse>, (StatusCode, Json<ErrorResponse>)> {
    let bin_param = query.bin.unwrap_or_default();
    if bin_param.len() < input::BIN_LENGTH {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid BIN. Must be at least 6 digits.".to_string(),
            }),
        ));
    }

    if !state.configured {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "API configuration error".to_string(),
            }),
        ));
    }

    // Best-effort from here on: the resolver never fails for a 6+-digit BIN
    let details = state.resolver.resolve(&bin_param).await;
    let digits = input::extract_digits(&bin_param);
    let bin = input::bin6(&digits).unwrap_or(bin_param);

    Ok(Json(BinLookupResponse::from_details(bin, details)))
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse args
    let port: u16 = std::env::args()
        .skip_while(|a| a != "--port")
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let cache_path =
        std::env::var("BIN_CACHE_DB").unwrap_or_else(|_| "bin_cache.db".to_string());
    let cache = Arc::new(SqliteBinCache::open(&cache_path).unwrap());
    tracing::info!("BIN cache at {}", cache_path);

    let mut resolver = BinResolver::new(cache);
    let configured = match std::env::var("HANDY_API_KEY") {
        Ok(key) if !key.is_empty() => {
            resolver = resolver.with_remote(Arc::new(HandyApiClient::new(key).unwrap()));
            true
        }
        _ => {
            tracing::error!("HANDY_API_KEY environment variable is not set");
            false
        }
    };

    let state = Arc::new(AppState {
        resolver,
        configured,
    });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    // Build router with Swagger UI
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/bin-lookup", get(bin_lookup))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui/", port);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
