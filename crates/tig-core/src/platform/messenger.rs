//! Direct message trait definition.

use tig_types::error::PlatformError;
use tig_types::id::UserId;

/// Sends direct messages to platform users.
pub trait DirectMessenger: Send + Sync {
    /// Send `text` to `recipient` as a direct message.
    fn send_direct_message(
        &self,
        recipient: &UserId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), PlatformError>> + Send;
}
