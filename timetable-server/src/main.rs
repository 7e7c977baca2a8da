use std::fmt::Display;

use tracing_subscriber::EnvFilter;

use timetable_server::config::{ServerConfig, TimetableSource};
use timetable_server::stations::SearchOptions;
use timetable_server::timetable::{HttpTimetable, StaticTimetable, TimetableProvider};
use timetable_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| startup_failure("configuration", e));

    match config.timetable.clone() {
        TimetableSource::Fixtures(dir) => {
            let timetable = StaticTimetable::from_dir(&dir)
                .unwrap_or_else(|e| startup_failure("timetable fixtures", e));
            serve(&config, timetable).await;
        }
        TimetableSource::Http(http) => {
            tracing::info!(base_url = %http.base_url, "using HTTP timetable provider");
            let timetable =
                HttpTimetable::new(http).unwrap_or_else(|e| startup_failure("timetable client", e));
            serve(&config, timetable).await;
        }
    }
}

/// Log a startup error and exit with status 2.
fn startup_failure(what: &str, error: impl Display) -> ! {
    tracing::error!("{what} error: {error}");
    std::process::exit(2);
}

async fn serve<P: TimetableProvider + 'static>(config: &ServerConfig, timetable: P) {
    let state = AppState::new(timetable, SearchOptions::default());
    let app = create_router(state);

    let addr = config.bind_addr;
    tracing::info!("Timetable server listening on http://{addr}");
    tracing::info!("  GET /health");
    tracing::info!("  GET /stations?stationToSearch=<name>");
    tracing::info!(
        "  GET /journeys?originId=<id>&destinationId=<id>&departure=&arrival=&next=&afterNext="
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
