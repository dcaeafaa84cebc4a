//! Capability traits for external collaborators.
//!
//! The core never manages sockets, permission tables, or message transport
//! itself. Both outward-facing seams are capability traits injected into
//! the [`Dispatcher`](crate::framework::dispatcher::Dispatcher) at
//! construction time; concrete implementations live with the gateway and
//! delivery collaborators. Both calls may suspend (network I/O) and may
//! fail; the core treats neither as synchronous or infallible.

use std::sync::Arc;

use async_trait::async_trait;

use crate::foundation::error::{DeliveryResult, PermissionResult};
use crate::foundation::event::{MemberPermissions, MessageEvent};
use crate::foundation::reply::ReplyTarget;

// =============================================================================
// Delivery
// =============================================================================

/// Outbound message delivery.
///
/// Called once per reply, fire-and-forget with a reported result. Message
/// formatting, rate-limit compliance, and transport-level retries belong
/// to the implementation; the dispatcher only logs failures.
#[async_trait]
pub trait DeliveryCapability: Send + Sync {
    /// Sends `text` to the resolved target.
    async fn deliver(&self, target: ReplyTarget, text: &str) -> DeliveryResult<()>;
}

/// A shared delivery capability.
pub type BoxedDelivery = Arc<dyn DeliveryCapability>;

// =============================================================================
// Permissions
// =============================================================================

/// Administrator permission lookup.
///
/// Implementations may answer locally or perform a remote lookup. The
/// permission gate treats a failed lookup as denial.
#[async_trait]
pub trait PermissionCapability: Send + Sync {
    /// Whether the event's author holds administrator-equivalent
    /// permission.
    async fn has_administrator(&self, event: &MessageEvent) -> PermissionResult<bool>;
}

/// A shared permission capability.
pub type BoxedPermissionLookup = Arc<dyn PermissionCapability>;

/// Permission lookup answered from the event's own permission bitset.
///
/// Suitable when the gateway already resolves member permissions into the
/// event payload, which is the common deployment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventPermissions;

#[async_trait]
impl PermissionCapability for EventPermissions {
    async fn has_administrator(&self, event: &MessageEvent) -> PermissionResult<bool> {
        Ok(event
            .member_permissions
            .contains(MemberPermissions::ADMINISTRATOR))
    }
}
