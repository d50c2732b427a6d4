//! Application State

use std::sync::Arc;

use crate::auth::TokenSigner;
use crate::catalog::Catalog;
use crate::intents::IntentIssuer;
use crate::store::OrderStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order storage
    pub orders: Arc<dyn OrderStore>,

    /// Menu catalog for dashboard aggregates
    pub catalog: Arc<Catalog>,

    /// Access token verification
    pub tokens: Arc<TokenSigner>,

    /// Payment intent issuer (optional - None if not configured)
    pub intents: Option<Arc<dyn IntentIssuer>>,
}
