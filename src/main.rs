//! Homeshare service entry point
//!
//! Reads configuration from TOML file (~/.config/homeshare/config.toml),
//! wires the services at the composition root and runs the REST API plus
//! the exit-reminder scanner until a shutdown signal arrives.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use homeshare::application::{
    AuthService, BookingService, ChecklistService, ExitReminderScanner, MaintenanceService,
    ReminderConfig,
};
use homeshare::auth::{IdentityProviderConfig, JwtConfig, JwtIdentityVerifier};
use homeshare::config::AppConfig;
use homeshare::domain::RepositoryProvider;
use homeshare::infrastructure::database::migrator::Migrator;
use homeshare::interfaces::http::modules::metrics::handlers::MetricsState;
use homeshare::interfaces::http::AuthState;
use homeshare::notifications::EventBusDispatcher;
use homeshare::shared::shutdown::ShutdownCoordinator;
use homeshare::{
    create_api_router, create_event_bus, default_config_path, init_database, ApiState,
    DatabaseConfig, SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("HOMESHARE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Homeshare service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Composition root ───────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let event_bus = create_event_bus();
    info!("Event bus initialized for real-time notifications");

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "homeshare".to_string(),
    };
    let identity_verifier = Arc::new(JwtIdentityVerifier::new(IdentityProviderConfig {
        secret: app_cfg.security.identity_secret.clone(),
        issuer: app_cfg.security.identity_issuer.clone(),
    }));

    let booking_service = Arc::new(
        BookingService::new(repos.clone(), event_bus.clone())
            .with_max_stay_days(app_cfg.booking.max_stay_days),
    );
    let auth_service = Arc::new(
        AuthService::new(
            repos.clone(),
            identity_verifier,
            jwt_config.clone(),
            event_bus.clone(),
        )
        .with_single_device_enforcement(app_cfg.security.enforce_single_device),
    );
    if !app_cfg.security.enforce_single_device {
        warn!("Single-device login enforcement is DISABLED by configuration");
    }
    let checklist_service = Arc::new(ChecklistService::new(repos.clone(), event_bus.clone()));
    let maintenance_service = Arc::new(MaintenanceService::new(repos.clone(), event_bus.clone()));

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    // ── Exit reminder scanner ──────────────────────────────────
    let scanner = Arc::new(
        ExitReminderScanner::new(
            repos.clone(),
            Arc::new(EventBusDispatcher::new(event_bus.clone())),
        )
        .with_config(ReminderConfig {
            check_interval_secs: app_cfg.scheduler.exit_reminder_interval_secs,
        }),
    );
    scanner.start(shutdown_signal.clone());

    // ── REST API ───────────────────────────────────────────────
    let api_router = create_api_router(ApiState {
        repos,
        booking_service,
        auth_service,
        checklist_service,
        maintenance_service,
        auth: AuthState { jwt_config },
        metrics: MetricsState {
            handle: prometheus_handle,
        },
    });

    let api_addr = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // ── Cleanup ────────────────────────────────────────────────
    info!("Performing final cleanup...");
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Homeshare service shutdown complete");
    Ok(())
}
