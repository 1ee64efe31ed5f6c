use std::sync::Arc;

use tracing::{Level, info};

use server::config::AppConfig;
use server::database;
use server::mail::{Mailer, SmtpMailer};
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database).await?;

    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::from_config(&config.mail)?);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState { db, config, mailer };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
