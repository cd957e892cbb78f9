use recruitworx_backend::{
    config::{get_config, init_config, Config},
    database::{memory::MemoryStore, pool::create_pool, postgres::PgStore, Store},
    middleware::cors::cors_layer,
    models::user::Role,
    routes, AppState, ServiceSettings,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    if config.uses_memory_store() {
        warn!("DATABASE_URL=memory: data lives only as long as this process");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let pool = create_pool(config).await?;
    let store = PgStore::new(pool);
    store.migrate().await?;
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;
    init_tracing(config.log_json);

    let store = open_store(config).await?;
    let app_state = AppState::new(store, ServiceSettings::from(config));
    info!(policy = ?config.status_policy, "status transition policy");

    if let Some(admin) = &config.bootstrap_admin {
        let user = app_state
            .auth_service
            .ensure_user(
                &admin.username,
                &admin.email,
                &admin.password,
                "Administrator",
                Role::Admin,
            )
            .await?;
        info!(user_id = user.id, username = %user.username, "bootstrap admin ready");
    }

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = state.auth_service.sweep_expired().await {
                    tracing::error!(error = ?e, "Session sweeper error");
                }
                tokio::time::sleep(SESSION_SWEEP_INTERVAL).await;
            }
        });
    }

    let app = routes::app(app_state, config.public_rps, config.api_rps)
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
