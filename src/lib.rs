#![deny(unexpected_cfgs)]
//
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
//
// https://github.com/rust-lang/rust-clippy/issues/16440
#![allow(clippy::multiple_crate_versions)]

//! Build one Discord-style webhook message (content, embeds, mention rules) and post it.
//!
//! ```no_run
//! use webhook_message::{MentionKind, WebhookClient};
//!
//! # fn main() -> anyhow::Result<()> {
//! let client = WebhookClient::new("https://discord.com/api/webhooks/1234/token")?;
//! let resp = client.send(|m| {
//!     m.username("Build Bot")
//!         .content("Pipeline finished")
//!         .allow_mentions([MentionKind::Users], Vec::<&str>::new(), ["80351110224678912"], false)
//!         .embed(|e| {
//!             e.title("main #512").color(3_066_993).field("Duration", 94.5, true);
//!         });
//! })?;
//! println!("{}", resp.status());
//! # Ok(())
//! # }
//! ```

mod client;
mod embed;
mod error;
mod message;
mod scalar;
mod validate;

pub use client::WebhookClient;
pub use embed::{
    Color, Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage, EmbedMedia, EmbedProvider,
    EmbedThumbnail, EmbedVideo, MAX_FIELDS,
};
pub use error::BuildError;
pub use message::{AllowedMentions, MentionKind, Message, Snowflake};
pub use scalar::Scalar;
