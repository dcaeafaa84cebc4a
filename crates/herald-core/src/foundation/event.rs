//! Gateway event model.
//!
//! The core consumes a stream of already-decoded inbound events; the
//! connection lifecycle that produced them (handshake, heartbeats,
//! reconnects) lives entirely in the gateway collaborator.

use serde::{Deserialize, Serialize};

// ============================================================================
// Member Permissions
// ============================================================================

/// Raw permission bitset attached to a guild member.
///
/// The gateway delivers member permissions as an opaque integer. The core
/// never interprets individual bits itself; only permission-capability
/// implementations do, typically by testing for
/// [`MemberPermissions::ADMINISTRATOR`], the highest privilege tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberPermissions(u64);

impl MemberPermissions {
    /// The administrator permission bit.
    pub const ADMINISTRATOR: MemberPermissions = MemberPermissions(1 << 3);

    /// Creates a permission set from a raw bitset.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw bitset.
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Checks whether every bit of `other` is present in this set.
    pub const fn contains(&self, other: MemberPermissions) -> bool {
        self.0 & other.0 == other.0
    }
}

// ============================================================================
// Message Event
// ============================================================================

/// A decoded message event received from the gateway.
///
/// Immutable once received. Events from direct messages carry no guild;
/// everything else references the guild the channel belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// User ID of the message author.
    pub author_id: u64,

    /// Whether the author is itself a bot account.
    #[serde(default)]
    pub author_is_bot: bool,

    /// Raw text content of the message.
    pub content: String,

    /// Channel the message was posted in.
    pub channel_id: u64,

    /// Guild the message belongs to; `None` for direct messages.
    #[serde(default)]
    pub guild_id: Option<u64>,

    /// Permission bitset of the authoring member, as resolved by the
    /// gateway. Empty for direct messages.
    #[serde(default)]
    pub member_permissions: MemberPermissions,
}

impl MessageEvent {
    /// Returns `true` when the event originated in a direct message.
    pub fn is_direct_message(&self) -> bool {
        self.guild_id.is_none()
    }
}
