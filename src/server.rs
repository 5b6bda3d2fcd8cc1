use axum::{
    Router,
    routing::{get, put},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{config::Config, db, db::ProductStore, handlers};

/// Both prefixes serve the same product handlers
pub const PRODUCT_PREFIXES: [&str; 2] = ["/products", "/api/products"];

/// Build the application router on top of a product store
pub fn create_router(store: ProductStore, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router: Router<ProductStore> = Router::new().route("/", get(handlers::index));

    for prefix in PRODUCT_PREFIXES {
        router = router
            .route(
                prefix,
                get(handlers::list_products).post(handlers::create_product),
            )
            .route(
                &format!("{prefix}/{{id}}"),
                put(handlers::update_product).delete(handlers::delete_product),
            );
    }

    router
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Initialize storage and serve until Ctrl+C or SIGTERM
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = db::init_db(&config.database_url).await?;
    let app = create_router(store, &config.static_dir);

    let listener = TcpListener::bind(config.server_addr()).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
