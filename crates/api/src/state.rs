use std::sync::Arc;

use issuetrack_db::stores::Stores;

use crate::config::ServerConfig;
use crate::services::IssueService;
use crate::views::Views;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Issue, project, user, activity and attachment stores.
    pub stores: Stores,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Issue lifecycle rules, wired to `stores`.
    pub issues: Arc<IssueService>,
    /// Compiled HTML templates.
    pub views: Arc<Views>,
}

impl AppState {
    /// Wire the service layer and templates over `stores`.
    pub fn new(stores: Stores, config: ServerConfig) -> Result<Self, tera::Error> {
        let issues = Arc::new(IssueService::new(
            stores.issues.clone(),
            stores.activity.clone(),
            stores.attachments.clone(),
        ));
        Ok(Self {
            stores,
            config: Arc::new(config),
            issues,
            views: Arc::new(Views::load()?),
        })
    }
}
