//! Built-in commands.
//!
//! The three commands every Herald deployment carries. They are registered
//! at startup under the configured marker prefix; deployments add their
//! own commands through the runtime builder.

use herald_core::{
    CommandDescriptor, CommandRegistry, HandlerResult, MessageEvent, RegistryResult, Reply,
    handler_fn,
};

/// Acknowledgement sent by the ping command.
pub const PING_TEXT: &str = "Pong!";

/// Rules text sent by the rules command.
pub const RULES_TEXT: &str =
    "Here are the server rules:\n\n1. Be respectful\n2. No spamming\n3. No NSFW content";

/// Replies with a fixed acknowledgement in the source channel.
async fn ping(_event: MessageEvent, _args: Vec<String>) -> HandlerResult<Vec<Reply>> {
    Ok(vec![Reply::source_channel(PING_TEXT)])
}

/// Joins the arguments into a single announcement for the guild's default
/// channel.
///
/// Empty arguments still announce the empty string; the command performs
/// no validation.
async fn announce(_event: MessageEvent, args: Vec<String>) -> HandlerResult<Vec<Reply>> {
    Ok(vec![Reply::guild_default(args.join(" "))])
}

/// Sends the server rules to the author as a direct message.
async fn rules(_event: MessageEvent, _args: Vec<String>) -> HandlerResult<Vec<Reply>> {
    Ok(vec![Reply::direct_message(RULES_TEXT)])
}

/// Registers the built-in commands under the given marker prefix.
///
/// | command | permission | destination |
/// |---|---|---|
/// | `{prefix}ping` | none | source channel |
/// | `{prefix}announce` | administrator | guild default channel |
/// | `{prefix}rules` | none | author direct message |
pub fn register_builtins(registry: &mut CommandRegistry, prefix: &str) -> RegistryResult<()> {
    registry.register(CommandDescriptor::new(
        format!("{prefix}ping"),
        false,
        handler_fn(ping),
    ))?;
    registry.register(CommandDescriptor::new(
        format!("{prefix}announce"),
        true,
        handler_fn(announce),
    ))?;
    registry.register(CommandDescriptor::new(
        format!("{prefix}rules"),
        false,
        handler_fn(rules),
    ))?;
    Ok(())
}
