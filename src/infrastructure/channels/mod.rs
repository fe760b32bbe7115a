// src/infrastructure/channels/mod.rs
mod facebook;
mod oauth1;
mod telegram;
mod twitter;

pub use facebook::FacebookPublisher;
pub use telegram::TelegramPublisher;
pub use twitter::TwitterPublisher;

use crate::application::ports::channel::ChannelError;

/// Turns a non-success response into `ChannelError::Api`, preferring the provider's
/// `error.message` (Graph API style) or `description` (Bot API style) when present.
async fn api_error(resp: reqwest::Response) -> ChannelError {
    let status = resp.status().as_u16();
    let raw = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&raw)
        .ok()
        .and_then(|body| {
            body.pointer("/error/message")
                .or_else(|| body.get("description"))
                .or_else(|| body.pointer("/detail"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(raw);
    ChannelError::Api { status, message }
}
