//! Alert route store trait definition.

use tig_types::error::RepositoryError;
use tig_types::route::AlertRoute;

/// Write-only store for alert routes.
///
/// A single table keyed by route id. No uniqueness is enforced on the
/// channel: every setup invocation appends a record.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait AlertRouteStore: Send + Sync {
    /// Persist a new alert route.
    fn put(
        &self,
        route: &AlertRoute,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
