//! Watch registry trait definition.

use tig_types::error::PlatformError;
use tig_types::watch::{Watch, WatchQuery, WatchSpec};

/// Lists and creates watches held by the platform.
///
/// `create_watch` is not idempotent: calling it twice yields two watches.
/// Duplicate prevention is the caller's job.
pub trait WatchRegistry: Send + Sync {
    /// List watches matching `query`. Order is unspecified.
    fn list_watches(
        &self,
        query: WatchQuery,
    ) -> impl std::future::Future<Output = Result<Vec<Watch>, PlatformError>> + Send;

    /// Create a new watch.
    fn create_watch(
        &self,
        spec: &WatchSpec,
    ) -> impl std::future::Future<Output = Result<(), PlatformError>> + Send;
}
