use ketchup::entities::Friend;
use ketchup::{AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ketchup=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Inizializza la configurazione
    let config = Config::from_env()?;
    config.print_info();
    let viewer = config.viewer_id.clone();

    let state = AppState::new(
        config,
        vec![
            Friend::new("sarah", "Sarah Johnson", &["work", "climbing"]),
            Friend::new("mike", "Mike Chen", &["college"]),
        ],
    );

    // richieste arrivate dal backend (create da altri utenti) e una creata dal viewer
    let from_sarah = state.requests.create("sarah");
    let from_mike = state.requests.create("mike");
    state.requests.create(&viewer);

    let controller = state.notification_controller().await;
    controller.activate().await;
    println!("{}", serde_json::to_string_pretty(&controller.snapshot().await)?);

    // il viewer accetta il primo prompt; in modalità continua il secondo viene armato subito
    controller.accept().await;
    println!("{}", serde_json::to_string_pretty(&controller.snapshot().await)?);
    controller.decline().await;

    tracing::info!(
        sarah = ?state.requests.read(&from_sarah.id).map(|r| r.status),
        mike = ?state.requests.read(&from_mike.id).map(|r| r.status),
        "Session resolved"
    );
    println!("{}", serde_json::to_string_pretty(&state.home_feed())?);

    Ok(())
}
