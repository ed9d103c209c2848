use countdown_server::config::ServerConfig;
use countdown_server::timetable::{TimetableStore, load_from_path};
use countdown_server::web::{AppState, create_router};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        path = %config.timetable_path.display(),
        timezone = %config.timezone,
        "loading timetable"
    );

    let data = load_from_path(&config.timetable_path)?;
    for anomaly in data.store.validate() {
        tracing::warn!(
            route = %anomaly.route,
            direction = %anomaly.direction,
            day_type = %anomaly.day_type,
            error = %anomaly.error,
            "malformed timetable list"
        );
    }
    tracing::info!(
        routes = data.store.routes().len(),
        holidays = data.calendar.len(),
        rules_version = data.rules.version(),
        "timetable loaded"
    );

    let state = AppState::new(data, config.engine.clone(), config.timezone);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "departure board listening");
    tracing::info!("  GET /health  - Health check");
    tracing::info!("  GET /routes  - Route catalogue");
    tracing::info!("  GET /board   - Countdown and upcoming departures");

    axum::serve(listener, app).await?;
    Ok(())
}
