use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use clap::Parser;
use tracing::info;

use belasting_api::config::Cli;
use belasting_api::state::AppState;
use belasting_api::{app, logging, routes};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;
    logging::init_logging(&config.log_level, config.log_file.as_deref())?;

    info!("Starting belasting-api");
    let repo = app::connect(&config.db_config()).await?;
    let state = web::Data::new(AppState::new(repo));
    info!(
        advisor = state.advisor.primary_name().unwrap_or("rule-based"),
        "advice provider ready"
    );

    let bind_address = config.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {bind_address}"))?
    .run();

    info!("Server started at http://{}", bind_address);
    server.await.context("server error")
}
