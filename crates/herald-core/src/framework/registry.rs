//! Command registry and handler erasure.
//!
//! The registry is a static mapping from command token to descriptor,
//! populated once at process start and read-only thereafter. Because it is
//! never mutated after startup, the dispatcher can share it behind an
//! `Arc` and dispatch events concurrently without locks.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::foundation::error::{HandlerResult, RegistryError, RegistryResult};
use crate::foundation::event::MessageEvent;
use crate::foundation::reply::Reply;

// ============================================================================
// Command Handler
// ============================================================================

/// An invocable command implementation.
///
/// Handlers receive the triggering event and the argument tokens (the
/// command token itself is already stripped) and produce zero or more
/// replies. Returning an error never crashes dispatch; the dispatcher
/// absorbs it into a generic failure reply.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs the command against an event.
    async fn handle(&self, event: &MessageEvent, args: &[String]) -> HandlerResult<Vec<Reply>>;
}

/// A type-erased command handler stored in the registry.
pub type BoxedCommandHandler = Arc<dyn CommandHandler>;

/// Adapter implementing [`CommandHandler`] for plain async functions.
struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(MessageEvent, Vec<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult<Vec<Reply>>> + Send + 'static,
{
    async fn handle(&self, event: &MessageEvent, args: &[String]) -> HandlerResult<Vec<Reply>> {
        (self.0)(event.clone(), args.to_vec()).await
    }
}

/// Wraps a plain async function as a [`BoxedCommandHandler`].
///
/// # Example
///
/// ```rust,ignore
/// let ping = handler_fn(|_event, _args| async {
///     Ok(vec![Reply::source_channel("Pong!")])
/// });
/// ```
pub fn handler_fn<F, Fut>(f: F) -> BoxedCommandHandler
where
    F: Fn(MessageEvent, Vec<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult<Vec<Reply>>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

// ============================================================================
// Command Descriptor
// ============================================================================

/// Descriptor binding a command name to its handler and permission
/// requirement.
#[derive(Clone)]
pub struct CommandDescriptor {
    /// The command token, including its leading marker character.
    name: String,
    /// Whether the invoker must hold administrator permission.
    requires_administrator: bool,
    /// The handler invoked on a match.
    handler: BoxedCommandHandler,
}

impl CommandDescriptor {
    /// Creates a new descriptor.
    pub fn new(
        name: impl Into<String>,
        requires_administrator: bool,
        handler: BoxedCommandHandler,
    ) -> Self {
        Self {
            name: name.into(),
            requires_administrator,
            handler,
        }
    }

    /// Returns the command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the command is gated on administrator permission.
    pub fn requires_administrator(&self) -> bool {
        self.requires_administrator
    }

    /// Returns the handler.
    pub fn handler(&self) -> &BoxedCommandHandler {
        &self.handler
    }
}

impl std::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("requires_administrator", &self.requires_administrator)
            .finish()
    }
}

// ============================================================================
// Command Registry
// ============================================================================

/// Startup-built mapping from command token to descriptor.
///
/// Keys are unique; registration rejects duplicates instead of
/// overwriting. Lookup is exact and case-sensitive — no prefix matching,
/// no aliases.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command descriptor.
    ///
    /// Fails with [`RegistryError::DuplicateCommand`] when the name is
    /// already taken, leaving the registry unchanged.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> RegistryResult<()> {
        if self.commands.contains_key(descriptor.name()) {
            return Err(RegistryError::DuplicateCommand {
                name: descriptor.name().to_owned(),
            });
        }
        self.commands
            .insert(descriptor.name().to_owned(), descriptor);
        Ok(())
    }

    /// Resolves the command addressed by a token sequence.
    ///
    /// Looks at `tokens[0]`; an empty sequence resolves to nothing.
    pub fn resolve(&self, tokens: &[String]) -> Option<&CommandDescriptor> {
        self.commands.get(tokens.first()?.as_str())
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("command_count", &self.commands.len())
            .finish()
    }
}
