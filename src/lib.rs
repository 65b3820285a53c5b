pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod services;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
pub use config::Config;
use db::{NewItem, NewUser, Store};
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = cli::Cli::parse();

    match cli.command.unwrap_or(cli::Commands::Serve) {
        cli::Commands::Serve => run_server(config, prometheus_handle).await,

        cli::Commands::Init => {
            Config::create_default_if_missing()?;
            println!("✓ Config file ready. Edit config.toml and run `findit serve`.");
            Ok(())
        }

        cli::Commands::Seed => cmd_seed(&config).await,

        cli::Commands::Activity { limit } => cmd_activity(&config, limit).await,
    }
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!(
        "FindIt v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let port = config.server.port;
    let shared = Arc::new(SharedState::new(config).await?);
    shared.store.ping().await.context("Database is unreachable")?;
    let state = api::create_app_state(shared, prometheus_handle).await?;

    let app = api::router(state).await;
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Web API running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

/// Demo records matching the sample data the frontend was built against.
async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let user_id = if let Some(user) = store.get_user_by_email("john@example.com").await? {
        println!("Sample user already present (id {})", user.id);
        user.id
    } else {
        let id = store
            .create_user(
                NewUser {
                    first_name: "John".to_string(),
                    last_name: "Doe".to_string(),
                    email: "john@example.com".to_string(),
                    password: "password123".to_string(),
                    phone: Some("1234567890".to_string()),
                },
                &config.security,
            )
            .await?;
        println!("Created sample user john@example.com (id {id})");
        id
    };

    let existing = store.list_items(&db::ItemFilters::default()).await?;
    let existing_titles: std::collections::HashSet<String> =
        existing.into_iter().map(|i| i.title).collect();

    let samples = [
        NewItem {
            user_id: Some(user_id),
            title: "iPhone 13 Pro".to_string(),
            description:
                "Lost near Central Park, black case with blue phone. Has a small crack on the screen corner."
                    .to_string(),
            status: "lost".to_string(),
            category: "electronics".to_string(),
            location: "Central Park, NYC".to_string(),
            date: "2024-02-04".to_string(),
            time: Some("14:30".to_string()),
            posted_by: "Sarah Johnson".to_string(),
            contact: "sarah.j@email.com".to_string(),
            reward: Some("₹5000".to_string()),
            additional_info: None,
            image_path: None,
            current_location: None,
        },
        NewItem {
            user_id: Some(user_id),
            title: "Brown Leather Wallet".to_string(),
            description:
                "Found on subway platform, contains ID and credit cards. Brown leather with metal clasp."
                    .to_string(),
            status: "found".to_string(),
            category: "accessories".to_string(),
            location: "Times Square Station".to_string(),
            date: "2024-02-04".to_string(),
            time: Some("09:15".to_string()),
            posted_by: "Mike Chen".to_string(),
            contact: "mike.chen@email.com".to_string(),
            reward: None,
            additional_info: None,
            image_path: None,
            current_location: None,
        },
        NewItem {
            user_id: Some(user_id),
            title: "Silver Watch".to_string(),
            description:
                "Lost during morning jog, sentimental value. Citizen brand with leather strap."
                    .to_string(),
            status: "lost".to_string(),
            category: "jewelry".to_string(),
            location: "Brooklyn Bridge".to_string(),
            date: "2024-02-03".to_string(),
            time: Some("07:45".to_string()),
            posted_by: "David Wilson".to_string(),
            contact: "d.wilson@email.com".to_string(),
            reward: Some("₹8000".to_string()),
            additional_info: None,
            image_path: None,
            current_location: None,
        },
    ];

    let mut created = 0;
    for sample in samples {
        if existing_titles.contains(&sample.title) {
            continue;
        }
        store.create_item(sample).await?;
        created += 1;
    }

    println!("✓ Seed complete ({created} new listings)");
    Ok(())
}

async fn cmd_activity(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let entries = store.recent_activity(limit).await?;

    if entries.is_empty() {
        println!("No activity recorded.");
        return Ok(());
    }

    println!("Recent Activity (last {}):", entries.len());
    println!("{:-<70}", "");

    for entry in entries {
        let details = entry.details.as_deref().unwrap_or("-");
        let ip = entry.ip_address.as_deref().unwrap_or("-");
        println!("• {} | {}", entry.action, entry.created_at);
        println!("  Details: {details} | IP: {ip}");
    }

    Ok(())
}
