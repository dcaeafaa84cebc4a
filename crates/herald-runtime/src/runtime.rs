//! Main runtime orchestration.
//!
//! The runtime owns startup: it loads configuration, initializes logging,
//! populates the command registry (built-ins first, then deployment
//! commands), and wires the delivery and permission capabilities into a
//! [`Dispatcher`]. After `build()` the registry is read-only.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use herald_runtime::HeraldRuntime;
//!
//! let runtime = HeraldRuntime::builder()
//!     .delivery(delivery_adapter)
//!     .build()?;
//!
//! // Either hand single events over...
//! runtime.on_message(event).await;
//!
//! // ...or drive a whole gateway stream to completion.
//! runtime.run(event_stream).await;
//! ```

use std::pin::pin;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::{info, trace};

use herald_core::{
    BoxedDelivery, BoxedPermissionLookup, CommandDescriptor, CommandRegistry, DispatchOutcome,
    Dispatcher, EventPermissions, MessageEvent,
};

use crate::commands::register_builtins;
use crate::config::{ConfigLoader, HeraldConfig};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;

/// The assembled Herald runtime.
///
/// Thin wrapper around the dispatcher plus the configuration it was built
/// from. The gateway collaborator feeds it decoded events, either one at a
/// time through [`on_message`](Self::on_message) or as a stream through
/// [`run`](Self::run).
pub struct HeraldRuntime {
    config: HeraldConfig,
    dispatcher: Dispatcher,
}

impl HeraldRuntime {
    /// Creates a runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Returns the configuration the runtime was built from.
    pub fn config(&self) -> &HeraldConfig {
        &self.config
    }

    /// Returns the dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Processes one decoded gateway event.
    pub async fn on_message(&self, event: MessageEvent) -> DispatchOutcome {
        self.dispatcher.on_message(event).await
    }

    /// Drives a stream of decoded gateway events to completion.
    ///
    /// Events are processed sequentially: each one runs through the full
    /// dispatch state machine before the next is considered. Callers that
    /// want concurrent dispatch can clone the dispatcher into their own
    /// tasks instead; it holds no mutable state.
    pub async fn run<S>(&self, events: S)
    where
        S: Stream<Item = MessageEvent>,
    {
        info!("Herald runtime is now processing events");

        let mut events = pin!(events);
        while let Some(event) = events.next().await {
            let outcome = self.dispatcher.on_message(event).await;
            trace!(?outcome, "Event dispatched");
        }

        info!("Event stream ended, runtime stopping");
    }
}

impl std::fmt::Debug for HeraldRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeraldRuntime")
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder assembling a [`HeraldRuntime`].
///
/// # Example
///
/// ```rust,ignore
/// let runtime = HeraldRuntime::builder()
///     .config_file("config/herald.toml")
///     .delivery(delivery_adapter)
///     .permissions(permission_service)
///     .command(CommandDescriptor::new("!uptime", false, uptime_handler))
///     .build()?;
/// ```
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
    config: Option<HeraldConfig>,
    delivery: Option<BoxedDelivery>,
    permissions: Option<BoxedPermissionLookup>,
    commands: Vec<CommandDescriptor>,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new(),
            config: None,
            delivery: None,
            permissions: None,
            commands: Vec::new(),
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Uses a pre-built configuration instead of loading one.
    pub fn config(mut self, config: HeraldConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the delivery capability. Required.
    pub fn delivery(mut self, delivery: BoxedDelivery) -> Self {
        self.delivery = Some(delivery);
        self
    }

    /// Sets the permission capability.
    ///
    /// Defaults to [`EventPermissions`], which answers from the permission
    /// bitset the gateway resolved into each event.
    pub fn permissions(mut self, permissions: BoxedPermissionLookup) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Adds a deployment-specific command.
    ///
    /// Commands are registered after the built-ins; a name collision fails
    /// the build.
    pub fn command(mut self, descriptor: CommandDescriptor) -> Self {
        self.commands.push(descriptor);
        self
    }

    /// Builds the runtime.
    ///
    /// Loads configuration (unless one was supplied), initializes logging,
    /// and populates the command registry. Fails on configuration errors,
    /// duplicate command names, or a missing delivery capability.
    pub fn build(self) -> RuntimeResult<HeraldRuntime> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_loader.load()?,
        };

        logging::init_from_config(&config.logging);

        let delivery = self.delivery.ok_or(RuntimeError::MissingDelivery)?;
        let permissions = self
            .permissions
            .unwrap_or_else(|| Arc::new(EventPermissions));

        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry, &config.commands.prefix)?;
        for descriptor in self.commands {
            registry.register(descriptor)?;
        }

        info!(
            command_prefix = %config.commands.prefix,
            command_count = registry.len(),
            "Runtime initialized from configuration"
        );

        let dispatcher = Dispatcher::new(Arc::new(registry), delivery, permissions);

        Ok(HeraldRuntime { config, dispatcher })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{PING_TEXT, RULES_TEXT};
    use async_trait::async_trait;
    use herald_core::{
        DeliveryCapability, DeliveryResult, MemberPermissions, PERMISSION_DENIED_TEXT,
        ReplyTarget, handler_fn,
    };
    use std::sync::Mutex;

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

    fn runtime(delivery: Arc<RecordingDelivery>) -> HeraldRuntime {
        HeraldRuntime::builder()
            .config(HeraldConfig::default())
            .delivery(delivery)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_ping_round_trip() {
        let delivery = Arc::new(RecordingDelivery::default());
        let runtime = runtime(delivery.clone());

        let outcome = runtime
            .on_message(event("!ping", MemberPermissions::default()))
            .await;
        assert_eq!(outcome, DispatchOutcome::Completed { delivered: 1 });
        assert_eq!(
            delivery.sent(),
            vec![(ReplyTarget::Channel(42), PING_TEXT.to_string())]
        );
    }

    #[tokio::test]
    async fn test_announce_denied_for_non_administrator() {
        let delivery = Arc::new(RecordingDelivery::default());
        let runtime = runtime(delivery.clone());

        let outcome = runtime
            .on_message(event("!announce test", MemberPermissions::default()))
            .await;
        assert_eq!(outcome, DispatchOutcome::Denied);
        assert_eq!(
            delivery.sent(),
            vec![(
                ReplyTarget::Channel(42),
                PERMISSION_DENIED_TEXT.to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_announce_reaches_guild_default_for_administrator() {
        let delivery = Arc::new(RecordingDelivery::default());
        let runtime = runtime(delivery.clone());

        let outcome = runtime
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
    async fn test_rules_direct_message_regardless_of_permissions() {
        for permissions in [MemberPermissions::default(), MemberPermissions::ADMINISTRATOR] {
            let delivery = Arc::new(RecordingDelivery::default());
            let runtime = runtime(delivery.clone());

            let outcome = runtime.on_message(event("!rules", permissions)).await;
            assert_eq!(outcome, DispatchOutcome::Completed { delivered: 1 });
            assert_eq!(
                delivery.sent(),
                vec![(ReplyTarget::DirectMessage(7), RULES_TEXT.to_string())]
            );
        }
    }

    #[tokio::test]
    async fn test_duplicate_deployment_command_fails_build() {
        let result = HeraldRuntime::builder()
            .config(HeraldConfig::default())
            .delivery(Arc::new(RecordingDelivery::default()))
            .command(herald_core::CommandDescriptor::new(
                "!ping",
                false,
                handler_fn(|_event, _args| async { Ok(Vec::new()) }),
            ))
            .build();

        assert!(matches!(result, Err(RuntimeError::Registry(_))));
    }

    #[tokio::test]
    async fn test_missing_delivery_fails_build() {
        let result = HeraldRuntime::builder()
            .config(HeraldConfig::default())
            .build();

        assert!(matches!(result, Err(RuntimeError::MissingDelivery)));
    }

    #[tokio::test]
    async fn test_run_drains_stream_sequentially() {
        let delivery = Arc::new(RecordingDelivery::default());
        let runtime = runtime(delivery.clone());

        let events = futures::stream::iter(vec![
            event("!ping", MemberPermissions::default()),
            event("not a command", MemberPermissions::default()),
            event("!rules", MemberPermissions::default()),
        ]);

        runtime.run(events).await;

        assert_eq!(
            delivery.sent(),
            vec![
                (ReplyTarget::Channel(42), PING_TEXT.to_string()),
                (ReplyTarget::DirectMessage(7), RULES_TEXT.to_string()),
            ]
        );
    }
}
