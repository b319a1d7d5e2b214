use actix_web::{web, HttpServer};
use player::app::build_app;
use player::config::PlayerConfig;
use player::state::build_state;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker --env-file, or `set -a; . ./.env; set +a` locally).
    let config = match PlayerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid player configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("❌ Invalid player configuration: {e}");
        std::process::exit(1);
    }

    let app_state = match build_state().with_config(&config).build() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    let host = config.server.host.clone();
    let port = config.server.port;
    println!(
        "🚀 Starting {} ({} agent) on http://{}:{}",
        config.agent.persona, config.agent.kind, host, port
    );
    info!(
        agent = %config.agent.kind,
        telemetry_enabled = app_state.flusher().is_enabled(),
        "player state ready"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || build_app(data.clone()))
        .bind((host.as_str(), port))?
        .run()
        .await
}
