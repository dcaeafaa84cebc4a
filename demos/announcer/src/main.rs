//! Announcer Demo
//!
//! A console-backed demonstration of the Herald runtime. Decoded gateway
//! events arrive as JSON objects, one per line, on stdin; replies are
//! logged to the console instead of being sent to a chat platform.
//!
//! # Usage
//!
//! ```bash
//! echo '{"author_id": 7, "content": "!ping", "channel_id": 42, "guild_id": 100}' \
//!     | cargo run --package announcer
//! ```
//!
//! An administrator announcing (permission bit `1 << 3` set):
//!
//! ```bash
//! echo '{"author_id": 7, "content": "!announce Hello World", "channel_id": 42,
//!        "guild_id": 100, "member_permissions": 8}' \
//!     | cargo run --package announcer
//! ```

use anyhow::Result;
use async_trait::async_trait;
use herald::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader, stdin};
use tracing::{error, info};

/// Delivery capability that logs replies to the console.
///
/// A real deployment would hand the reply to the chat platform's REST
/// client here, resolving `GuildDefault` to the guild's configured
/// default channel.
struct ConsoleDelivery;

#[async_trait]
impl DeliveryCapability for ConsoleDelivery {
    async fn deliver(&self, target: ReplyTarget, text: &str) -> DeliveryResult<()> {
        match target {
            ReplyTarget::Channel(id) => info!(channel_id = id, text, "Reply to channel"),
            ReplyTarget::GuildDefault(id) => {
                info!(guild_id = id, text, "Reply to guild default channel");
            }
            ReplyTarget::DirectMessage(id) => info!(user_id = id, text, "Reply to user"),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let runtime = HeraldRuntime::builder()
        .delivery(std::sync::Arc::new(ConsoleDelivery))
        .build()?;

    info!("Reading JSON events from stdin, one per line");

    let lines = BufReader::new(stdin()).lines();
    let events = futures::stream::unfold(lines, |mut lines| async {
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<MessageEvent>(line) {
                        Ok(event) => return Some((event, lines)),
                        Err(e) => {
                            error!(error = %e, "Skipping undecodable event");
                        }
                    }
                }
                Ok(None) => return None,
                Err(e) => {
                    error!(error = %e, "Failed to read from stdin");
                    return None;
                }
            }
        }
    });

    runtime.run(events).await;

    Ok(())
}
