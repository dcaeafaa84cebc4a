//! Reply model.
//!
//! Handlers emit [`Reply`] values tagged with a [`Destination`] kind; the
//! dispatcher resolves each against the triggering event into a
//! [`ReplyTarget`] before handing it to the delivery capability. The split
//! keeps handlers ignorant of concrete channel and user IDs.

/// Addressable destination kinds a reply can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// The channel the triggering message was posted in.
    SourceChannel,
    /// The guild-wide default channel.
    GuildDefaultChannel,
    /// A direct message to the triggering author.
    AuthorDirectMessage,
}

/// A single outbound reply produced by a command handler.
///
/// Zero, one, or many replies may be produced per invocation; the
/// dispatcher forwards them in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Where the reply should go.
    pub destination: Destination,
    /// The reply text.
    pub text: String,
}

impl Reply {
    /// Creates a reply to the given destination.
    pub fn new(destination: Destination, text: impl Into<String>) -> Self {
        Self {
            destination,
            text: text.into(),
        }
    }

    /// Creates a reply to the channel the message came from.
    pub fn source_channel(text: impl Into<String>) -> Self {
        Self::new(Destination::SourceChannel, text)
    }

    /// Creates a reply to the guild's default channel.
    pub fn guild_default(text: impl Into<String>) -> Self {
        Self::new(Destination::GuildDefaultChannel, text)
    }

    /// Creates a direct-message reply to the author.
    pub fn direct_message(text: impl Into<String>) -> Self {
        Self::new(Destination::AuthorDirectMessage, text)
    }
}

/// A destination resolved against a concrete event.
///
/// `GuildDefault` carries the guild ID; resolving it to an actual channel
/// is the delivery adapter's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyTarget {
    /// A specific channel.
    Channel(u64),
    /// The default channel of a guild.
    GuildDefault(u64),
    /// A direct message to a user.
    DirectMessage(u64),
}
