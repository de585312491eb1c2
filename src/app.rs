//! Application state shared by every front end.

use std::sync::Arc;

use crate::auth::Credentials;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::PageRequest;
use crate::services::{
    DashboardService, DivisionService, EmployeeService, SessionHolder, ThemeService,
};
use crate::store::Store;

/// Everything a front end needs, created once at startup and passed around explicitly.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub employees: EmployeeService,
    pub divisions: DivisionService,
    pub session: SessionHolder,
    pub theme: ThemeService,
    pub dashboard: DashboardService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Open the store named by `config` and wire up the services.
    pub async fn open(config: Config) -> Result<Self, AppError> {
        let store = Store::open(&config.db_path).await?;
        Self::with_store(config, store).await
    }

    /// Wire up the services over an already opened store and restore any saved session.
    pub async fn with_store(config: Config, store: Store) -> Result<Self, AppError> {
        let divisions = DivisionService::new(store.clone(), config.seed_defaults);
        let employees = EmployeeService::new(store.clone(), divisions.clone());
        let dashboard = DashboardService::new(employees.clone(), divisions.clone());
        let theme = ThemeService::new(store.clone());
        let session = SessionHolder::new(
            store.clone(),
            Credentials::new(&config.admin_username, &config.admin_password),
        );

        session.restore().await?;

        Ok(Self {
            store,
            employees,
            divisions,
            session,
            theme,
            dashboard,
            config: Arc::new(config),
        })
    }

    /// `page` with the configured page size.
    pub fn page(&self, page: usize) -> PageRequest {
        PageRequest::new(page, self.config.page_size)
    }

    /// End the session. Records and the theme preference are kept.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        self.session.logout().await
    }
}
