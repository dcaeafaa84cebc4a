//! Event dispatcher for the Herald core.
//!
//! This module provides the [`Dispatcher`], the orchestrator that turns a
//! raw inbound event into zero or more delivered replies. When an event is
//! dispatched:
//!
//! 1. Bot-authored events are dropped before tokenization
//! 2. The content is tokenized and the command registry consulted
//! 3. Privileged commands pass through the permission gate
//! 4. The handler runs and its replies are forwarded, in emission order,
//!    to the delivery capability
//!
//! Every event runs this machine independently; there are no loops, no
//! revisited states, and no shared mutable state. Handler failures and
//! delivery failures are absorbed here — a single event can never take the
//! process down.

use std::sync::Arc;

use tracing::{Instrument, Level, debug, span, trace, warn};

use crate::foundation::event::MessageEvent;
use crate::foundation::reply::{Destination, Reply, ReplyTarget};
use crate::framework::gate::{Authorization, PermissionGate};
use crate::framework::registry::CommandRegistry;
use crate::framework::tokenize::tokenize;
use crate::integration::capability::{DeliveryCapability, PermissionCapability};

/// Reply sent to the source channel when the permission gate rejects an
/// invocation.
pub const PERMISSION_DENIED_TEXT: &str = "You don't have permission to use this command.";

/// Reply sent to the source channel when a handler fails unexpectedly.
pub const HANDLER_FAILURE_TEXT: &str = "Something went wrong while running that command.";

/// Terminal state of a single dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The author was a bot; the event was dropped before tokenization.
    Discarded,
    /// No registered command matched; nothing was sent.
    Ignored,
    /// The permission gate rejected the invocation; one denial reply was
    /// sent to the source channel.
    Denied,
    /// The handler failed; one generic failure reply was sent to the
    /// source channel.
    Faulted,
    /// The handler ran to completion.
    Completed {
        /// Number of replies successfully handed to the delivery
        /// capability.
        delivered: usize,
    },
}

/// The central event dispatcher.
///
/// Holds the read-only command registry and the capability set injected at
/// construction time. `Dispatcher` is `Send + Sync` and owns no mutable
/// state, so events may be dispatched concurrently.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    delivery: Arc<dyn DeliveryCapability>,
    gate: PermissionGate,
}

impl Dispatcher {
    /// Creates a dispatcher over a populated registry and capability set.
    pub fn new(
        registry: Arc<CommandRegistry>,
        delivery: Arc<dyn DeliveryCapability>,
        permissions: Arc<dyn PermissionCapability>,
    ) -> Self {
        Self {
            registry,
            delivery,
            gate: PermissionGate::new(permissions),
        }
    }

    /// Returns the command registry backing this dispatcher.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Processes one inbound event to completion.
    ///
    /// This is the single entry point the gateway collaborator invokes per
    /// decoded event. It never returns an error: every failure mode is
    /// absorbed into the returned [`DispatchOutcome`].
    pub async fn on_message(&self, event: MessageEvent) -> DispatchOutcome {
        let span = span!(
            Level::DEBUG,
            "dispatch",
            author_id = event.author_id,
            channel_id = event.channel_id,
        );
        self.process(event).instrument(span).await
    }

    async fn process(&self, event: MessageEvent) -> DispatchOutcome {
        if event.author_is_bot {
            trace!("Dropping bot-authored event");
            return DispatchOutcome::Discarded;
        }

        let tokens = tokenize(&event.content);
        let Some(descriptor) = self.registry.resolve(&tokens) else {
            debug!("No command matched");
            return DispatchOutcome::Ignored;
        };

        debug!(command = descriptor.name(), "Command resolved");

        if self
            .gate
            .authorize(&event, descriptor.requires_administrator())
            .await
            == Authorization::Denied
        {
            debug!(command = descriptor.name(), "Invocation denied");
            self.deliver(&event, &Reply::source_channel(PERMISSION_DENIED_TEXT))
                .await;
            return DispatchOutcome::Denied;
        }

        let replies = match descriptor.handler().handle(&event, &tokens[1..]).await {
            Ok(replies) => replies,
            Err(e) => {
                warn!(command = descriptor.name(), error = %e, "Handler failed");
                self.deliver(&event, &Reply::source_channel(HANDLER_FAILURE_TEXT))
                    .await;
                return DispatchOutcome::Faulted;
            }
        };

        let mut delivered = 0;
        for reply in &replies {
            if self.deliver(&event, reply).await {
                delivered += 1;
            }
        }

        DispatchOutcome::Completed { delivered }
    }

    /// Resolves a reply's destination against the event and hands it to
    /// the delivery capability.
    ///
    /// Returns whether delivery succeeded. Failures are logged and never
    /// retried here; retry policy belongs to the transport collaborator.
    async fn deliver(&self, event: &MessageEvent, reply: &Reply) -> bool {
        let Some(target) = resolve_target(event, reply.destination) else {
            warn!(
                destination = ?reply.destination,
                "Reply has no resolvable target outside a guild, skipping"
            );
            return false;
        };

        match self.delivery.deliver(target, &reply.text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(target = ?target, error = %e, "Reply delivery failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("command_count", &self.registry.len())
            .finish()
    }
}

/// Maps a destination kind to a concrete target address on the event.
///
/// `GuildDefaultChannel` is unresolvable for direct messages, which carry
/// no guild.
fn resolve_target(event: &MessageEvent, destination: Destination) -> Option<ReplyTarget> {
    match destination {
        Destination::SourceChannel => Some(ReplyTarget::Channel(event.channel_id)),
        Destination::GuildDefaultChannel => event.guild_id.map(ReplyTarget::GuildDefault),
        Destination::AuthorDirectMessage => Some(ReplyTarget::DirectMessage(event.author_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::{DeliveryError, DeliveryResult, HandlerError};
    use crate::foundation::event::MemberPermissions;
    use crate::framework::registry::{CommandDescriptor, handler_fn};
    use crate::integration::capability::EventPermissions;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Delivery capability that records every call.
    #[derive(Default)]
    struct RecordingDelivery {
        sent: Mutex<Vec<(ReplyTarget, String)>>,
    }

    #[async_trait]
    impl DeliveryCapability for RecordingDelivery {
        async fn deliver(&self, target: ReplyTarget, text: &str) -> DeliveryResult<()> {
            self.sent.lock().unwrap().push((target, text.to_owned()));
            Ok(())
        }
    }

    impl RecordingDelivery {
        fn sent(&self) -> Vec<(ReplyTarget, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    /// Delivery capability that fails every call.
    struct FailingDelivery;

    #[async_trait]
    impl DeliveryCapability for FailingDelivery {
        async fn deliver(&self, _target: ReplyTarget, _text: &str) -> DeliveryResult<()> {
            Err(DeliveryError::SendFailed("rate limited".into()))
        }
    }

    fn event(content: &str, permissions: MemberPermissions) -> MessageEvent {
        MessageEvent {
            author_id: 7,
            author_is_bot: false,
            content: content.to_string(),
            channel_id: 42,
            guild_id: Some(100),
            member_permissions: permissions,
        }
    }

    fn registry() -> Arc<CommandRegistry> {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandDescriptor::new(
                "!ping",
                false,
                handler_fn(|_event, _args| async {
                    Ok(vec![Reply::source_channel("Pong!")])
                }),
            ))
            .unwrap();
        registry
            .register(CommandDescriptor::new(
                "!announce",
                true,
                handler_fn(|_event, args: Vec<String>| async move {
                    Ok(vec![Reply::guild_default(args.join(" "))])
                }),
            ))
            .unwrap();
        registry
            .register(CommandDescriptor::new(
                "!broken",
                false,
                handler_fn(|_event, _args| async {
                    Err(HandlerError::failed("simulated fault"))
                }),
            ))
            .unwrap();
        Arc::new(registry)
    }

    fn dispatcher(delivery: Arc<dyn DeliveryCapability>) -> Dispatcher {
        Dispatcher::new(registry(), delivery, Arc::new(EventPermissions))
    }

    #[tokio::test]
    async fn test_bot_author_discarded() {
        let delivery = Arc::new(RecordingDelivery::default());
        let dispatcher = dispatcher(delivery.clone());

        let mut event = event("!ping", MemberPermissions::default());
        event.author_is_bot = true;

        let outcome = dispatcher.on_message(event).await;
        assert_eq!(outcome, DispatchOutcome::Discarded);
        assert!(delivery.sent().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_command_ignored() {
        let delivery = Arc::new(RecordingDelivery::default());
        let dispatcher = dispatcher(delivery.clone());

        let outcome = dispatcher
            .on_message(event("!unknown", MemberPermissions::default()))
            .await;
        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(delivery.sent().is_empty());
    }

    #[tokio::test]
    async fn test_empty_content_ignored() {
        let delivery = Arc::new(RecordingDelivery::default());
        let dispatcher = dispatcher(delivery.clone());

        let outcome = dispatcher
            .on_message(event("", MemberPermissions::default()))
            .await;
        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(delivery.sent().is_empty());
    }

    #[tokio::test]
    async fn test_ungated_command_replies_to_source_channel() {
        let delivery = Arc::new(RecordingDelivery::default());
        let dispatcher = dispatcher(delivery.clone());

        let outcome = dispatcher
            .on_message(event("!ping", MemberPermissions::default()))
            .await;
        assert_eq!(outcome, DispatchOutcome::Completed { delivered: 1 });
        assert_eq!(
            delivery.sent(),
            vec![(ReplyTarget::Channel(42), "Pong!".to_string())]
        );
    }

    #[tokio::test]
    async fn test_gated_command_denied_for_non_administrator() {
        let delivery = Arc::new(RecordingDelivery::default());
        let dispatcher = dispatcher(delivery.clone());

        let outcome = dispatcher
            .on_message(event("!announce test", MemberPermissions::default()))
            .await;
        assert_eq!(outcome, DispatchOutcome::Denied);

        // Exactly one denial to the source channel; the guild default
        // channel receives nothing.
        assert_eq!(
            delivery.sent(),
            vec![(
                ReplyTarget::Channel(42),
                PERMISSION_DENIED_TEXT.to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_gated_command_runs_for_administrator() {
        let delivery = Arc::new(RecordingDelivery::default());
        let dispatcher = dispatcher(delivery.clone());

        let outcome = dispatcher
            .on_message(event(
                "!announce Hello World",
                MemberPermissions::ADMINISTRATOR,
            ))
            .await;
        assert_eq!(outcome, DispatchOutcome::Completed { delivered: 1 });
        assert_eq!(
            delivery.sent(),
            vec![(ReplyTarget::GuildDefault(100), "Hello World".to_string())]
        );
    }

    #[tokio::test]
    async fn test_handler_fault_sends_one_failure_reply() {
        let delivery = Arc::new(RecordingDelivery::default());
        let dispatcher = dispatcher(delivery.clone());

        let outcome = dispatcher
            .on_message(event("!broken", MemberPermissions::default()))
            .await;
        assert_eq!(outcome, DispatchOutcome::Faulted);
        assert_eq!(
            delivery.sent(),
            vec![(ReplyTarget::Channel(42), HANDLER_FAILURE_TEXT.to_string())]
        );
    }

    #[tokio::test]
    async fn test_delivery_failure_absorbed() {
        let dispatcher = dispatcher(Arc::new(FailingDelivery));

        let outcome = dispatcher
            .on_message(event("!ping", MemberPermissions::default()))
            .await;
        assert_eq!(outcome, DispatchOutcome::Completed { delivered: 0 });
    }

    #[tokio::test]
    async fn test_guild_default_reply_skipped_in_direct_message() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandDescriptor::new(
                "!shout",
                false,
                handler_fn(|_event, _args| async {
                    Ok(vec![Reply::guild_default("to everyone")])
                }),
            ))
            .unwrap();

        let delivery = Arc::new(RecordingDelivery::default());
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            delivery.clone(),
            Arc::new(EventPermissions),
        );

        let mut event = event("!shout", MemberPermissions::default());
        event.guild_id = None;

        let outcome = dispatcher.on_message(event).await;
        assert_eq!(outcome, DispatchOutcome::Completed { delivered: 0 });
        assert!(delivery.sent().is_empty());
    }

    #[tokio::test]
    async fn test_replies_delivered_in_emission_order() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandDescriptor::new(
                "!multi",
                false,
                handler_fn(|_event, _args| async {
                    Ok(vec![
                        Reply::source_channel("first"),
                        Reply::direct_message("second"),
                        Reply::guild_default("third"),
                    ])
                }),
            ))
            .unwrap();

        let delivery = Arc::new(RecordingDelivery::default());
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            delivery.clone(),
            Arc::new(EventPermissions),
        );

        let outcome = dispatcher
            .on_message(event("!multi", MemberPermissions::default()))
            .await;
        assert_eq!(outcome, DispatchOutcome::Completed { delivered: 3 });
        assert_eq!(
            delivery.sent(),
            vec![
                (ReplyTarget::Channel(42), "first".to_string()),
                (ReplyTarget::DirectMessage(7), "second".to_string()),
                (ReplyTarget::GuildDefault(100), "third".to_string()),
            ]
        );
    }
}
