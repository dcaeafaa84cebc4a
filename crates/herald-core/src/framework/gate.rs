//! Permission gate.
//!
//! Privileged commands are gated on administrator-equivalent permission.
//! The gate itself holds no permission data; it delegates to the injected
//! [`PermissionCapability`], which may perform a remote lookup.

use std::sync::Arc;

use tracing::warn;

use crate::foundation::event::MessageEvent;
use crate::integration::capability::PermissionCapability;

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The invoker may run the command.
    Allowed,
    /// The invoker may not run the command.
    Denied,
}

/// Gate deciding whether an invoker may run a privileged command.
#[derive(Clone)]
pub struct PermissionGate {
    lookup: Arc<dyn PermissionCapability>,
}

impl PermissionGate {
    /// Creates a gate over the given permission capability.
    pub fn new(lookup: Arc<dyn PermissionCapability>) -> Self {
        Self { lookup }
    }

    /// Checks whether the event's author may run a command with the given
    /// permission requirement.
    ///
    /// Ungated commands are always allowed. Direct messages have no
    /// administrator concept, so privileged commands are denied there
    /// rather than treated as an error. A failed lookup also denies: the
    /// gate fails closed.
    pub async fn authorize(
        &self,
        event: &MessageEvent,
        requires_administrator: bool,
    ) -> Authorization {
        if !requires_administrator {
            return Authorization::Allowed;
        }

        if event.is_direct_message() {
            return Authorization::Denied;
        }

        match self.lookup.has_administrator(event).await {
            Ok(true) => Authorization::Allowed,
            Ok(false) => Authorization::Denied,
            Err(e) => {
                warn!(
                    author_id = event.author_id,
                    error = %e,
                    "Permission lookup failed, denying"
                );
                Authorization::Denied
            }
        }
    }
}

impl std::fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionGate").finish()
    }
}
