use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::backend::{BackendFactory, TriviaBackend};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::logging::logging_middleware;
use crate::resource::{category, fallback, question, quiz, AppState};

const CORS_ALLOW_HEADERS: &str = "Content-Type,Authorization,true";
const CORS_ALLOW_METHODS: &str = "GET,PUT,POST,DELETE,OPTIONS";

/// Connect the configured backend and make sure its schema exists
pub async fn setup_backend(config: &AppConfig) -> AppResult<Arc<dyn TriviaBackend>> {
    config.validate().map_err(AppError::Configuration)?;
    let backend_config = config
        .to_backend_config()
        .map_err(AppError::Configuration)?;

    tracing::info!(
        database = ?backend_config.database_type,
        "Setting up database backend"
    );

    let backend = BackendFactory::create(&backend_config).await?;
    backend.health_check().await?;
    backend.init_schema().await?;

    Ok(backend)
}

/// Insert the configured categories when the table is still empty
///
/// Returns how many categories were created.
pub async fn seed_categories(backend: &dyn TriviaBackend, categories: &[String]) -> AppResult<usize> {
    if backend.count_categories().await? > 0 {
        return Ok(0);
    }

    for category_type in categories {
        let category = backend.create_category(category_type).await?;
        tracing::debug!(id = category.id, category = %category.category_type, "Seeded category");
    }

    tracing::info!(count = categories.len(), "Seeded categories");
    Ok(categories.len())
}

/// Build the application router with every route and layer
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("true"),
        ]);

    Router::new()
        .route(
            "/questions",
            get(question::list_questions).post(question::post_questions),
        )
        .route(
            "/questions/{id}",
            get(question::get_question)
                .put(question::replace_question)
                .patch(question::patch_question)
                .delete(question::delete_question),
        )
        .route("/categories", get(category::list_categories))
        .route("/categories/{id}", get(category::get_category))
        .route(
            "/categories/{id}/questions",
            get(category::list_category_questions).post(category::search_category_questions),
        )
        .route("/quizzes", post(quiz::play_quiz))
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .fallback(fallback::not_found)
        .with_state(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Connect, seed, and serve until a shutdown signal arrives
pub async fn run(config: AppConfig) -> AppResult<()> {
    let backend = setup_backend(&config).await?;
    seed_categories(backend.as_ref(), &config.seed.categories).await?;

    let state = AppState::new(backend.clone(), config.pagination.questions_per_page);
    let app = build_router(state);

    let host: std::net::IpAddr = config.server.host.parse().map_err(|_| {
        AppError::Configuration(format!("Invalid host address: {}", config.server.host))
    })?;
    let addr = SocketAddr::from((host, config.server.port));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Trivia API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    backend.cleanup().await?;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
