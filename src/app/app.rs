use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};

use crate::config::{AppConfig, DataStoreKind, JwtConfig, MongoConfig};
use crate::handler::dashboard_handler::DashboardState;
use crate::handler::wizard_handler::WizardState;
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::repository::memory_repo::{InMemoryQuoteRepository, InMemoryWorkshopRepository};
use crate::repository::quote_repo::{MongoQuoteRepository, QuoteRepository};
use crate::repository::workshop_repo::{MongoWorkshopRepository, WorkshopRepository};
use crate::router::dashboard_router::dashboard_router;
use crate::router::quote_router::quote_router;
use crate::router::wizard_router::wizard_router;
use crate::router::workshop_router::workshop_router;
use crate::service::dashboard_service::{DashboardService, DashboardServiceImpl};
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::service::workshop_service::{WorkshopService, WorkshopServiceImpl};
use crate::util::jwt::{IdentityProvider, JwtTokenUtilsImpl};
use crate::wizard::session::{SessionLimits, WizardSessions};

/// Everything the HTTP layer needs, already wired together.
#[derive(Clone)]
pub struct AppServices {
    pub quote_service: Arc<dyn QuoteService>,
    pub workshop_service: Arc<dyn WorkshopService>,
    pub dashboard_service: Arc<dyn DashboardService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub sessions: Arc<WizardSessions>,
}

impl AppServices {
    pub fn new(
        quote_repo: Arc<dyn QuoteRepository>,
        workshop_repo: Arc<dyn WorkshopRepository>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let quote_service: Arc<dyn QuoteService> = Arc::new(QuoteServiceImpl::new(quote_repo));
        let workshop_service: Arc<dyn WorkshopService> = Arc::new(WorkshopServiceImpl::new(workshop_repo));
        let dashboard_service: Arc<dyn DashboardService> =
            Arc::new(DashboardServiceImpl::new(quote_service.clone(), workshop_service.clone()));
        AppServices {
            quote_service,
            workshop_service,
            dashboard_service,
            identity,
            sessions: Arc::new(WizardSessions::new()),
        }
    }

    pub fn with_session_limits(mut self, limits: SessionLimits) -> Self {
        self.sessions = Arc::new(WizardSessions::with_limits(limits));
        self
    }
}

pub fn create_router(services: &AppServices) -> Router {
    let admin_auth_state = Arc::new(AdminAuthState { identity: services.identity.clone() });
    let wizard_state = Arc::new(WizardState {
        sessions: services.sessions.clone(),
        quote_service: services.quote_service.clone(),
    });
    let dashboard_state = Arc::new(DashboardState {
        quote_service: services.quote_service.clone(),
        workshop_service: services.workshop_service.clone(),
        dashboard_service: services.dashboard_service.clone(),
    });

    Router::new()
        .merge(quote_router(services.quote_service.clone()))
        .merge(wizard_router(wizard_state))
        .merge(workshop_router(services.workshop_service.clone()))
        .merge(dashboard_router(dashboard_state, admin_auth_state))
        .route("/health", get(|| async { "OK" }))
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;
        let identity: Arc<dyn IdentityProvider> = Arc::new(JwtTokenUtilsImpl::new(jwt_config));

        let (quote_repo, workshop_repo) = match config.data_store {
            DataStoreKind::Mongo => {
                let mongo_config = MongoConfig::from_env()?;
                let quote_repo = MongoQuoteRepository::new(&mongo_config).await.map_err(|e| {
                    error!("Quote repository setup failed: {e}");
                    e
                })?;
                let workshop_repo = MongoWorkshopRepository::new(&mongo_config).await.map_err(|e| {
                    error!("Workshop repository setup failed: {e}");
                    e
                })?;
                info!(database = %mongo_config.database, "Using MongoDB data store");
                (
                    Arc::new(quote_repo) as Arc<dyn QuoteRepository>,
                    Arc::new(workshop_repo) as Arc<dyn WorkshopRepository>,
                )
            }
            DataStoreKind::Memory => {
                info!("Using in-memory data store");
                let workshop_repo = match &config.workshops_file {
                    Some(path) => InMemoryWorkshopRepository::from_json_file(path).await.map_err(|e| {
                        error!("Workshop seed failed: {e}");
                        e
                    })?,
                    None => InMemoryWorkshopRepository::default(),
                };
                (
                    Arc::new(InMemoryQuoteRepository::new()) as Arc<dyn QuoteRepository>,
                    Arc::new(workshop_repo) as Arc<dyn WorkshopRepository>,
                )
            }
        };

        let limits = SessionLimits {
            idle_ttl: Duration::from_secs(config.session_idle_secs),
            max_sessions: config.max_wizard_sessions,
            ..SessionLimits::default()
        };
        let services = AppServices::new(quote_repo, workshop_repo, identity).with_session_limits(limits);
        let router = create_router(&services);
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.bind_address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
