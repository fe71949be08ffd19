mod mentions;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

pub use mentions::{AllowedMentions, MentionKind, Snowflake};

use crate::{embed::Embed, scalar::Scalar};

/// The top-level webhook payload.
///
/// Built through chained `&mut self` setters; keys that were never set are omitted from the
/// document, except `tts` which is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
    tts: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_mentions: Option<AllowedMentions>,
}

impl Message {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty message and lets `configure` fill it in.
    #[must_use]
    pub fn build<F>(configure: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut message = Self::new();
        configure(&mut message);
        message
    }

    pub fn content(&mut self, content: impl Into<Scalar>) -> &mut Self {
        self.content = Some(content.into().to_canonical_string());
        self
    }

    pub fn username(&mut self, username: impl Into<Scalar>) -> &mut Self {
        self.username = Some(username.into().to_canonical_string());
        self
    }

    pub fn avatar_url(&mut self, avatar_url: impl Into<Scalar>) -> &mut Self {
        self.avatar_url = Some(avatar_url.into().to_canonical_string());
        self
    }

    pub const fn tts(&mut self, tts: bool) -> &mut Self {
        self.tts = tts;
        self
    }

    /// Replaces the mention restrictions. The lists are emitted in the given order.
    pub fn allow_mentions<P, R, U>(
        &mut self,
        parse: P,
        roles: R,
        users: U,
        replied_user: bool,
    ) -> &mut Self
    where
        P: IntoIterator<Item = MentionKind>,
        R: IntoIterator,
        R::Item: Into<Snowflake>,
        U: IntoIterator,
        U::Item: Into<Snowflake>,
    {
        self.allowed_mentions = Some(AllowedMentions {
            parse: parse.into_iter().collect(),
            roles: roles.into_iter().map(Into::into).collect(),
            users: users.into_iter().map(Into::into).collect(),
            replied_user,
        });
        self
    }

    /// Appends a new embed after `configure` has filled it in.
    pub fn embed<F>(&mut self, configure: F) -> &mut Self
    where
        F: FnOnce(&mut Embed),
    {
        let mut embed = Embed::new();
        configure(&mut embed);
        self.embeds.push(embed);
        self
    }

    #[must_use]
    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    /// Checks the embeds for violated limits.
    ///
    /// # Errors
    /// Returns a [`BuildError`](crate::BuildError) if an embed was given too many fields.
    pub fn check(&self) -> Result<()> {
        for (i, embed) in self.embeds.iter().enumerate() {
            embed
                .check()
                .with_context(|| format!("Embed #{} is invalid", i + 1))?;
        }
        Ok(())
    }

    /// Renders the wire document.
    ///
    /// # Errors
    /// Fails if [`Message::check`] fails or the document could not be serialized.
    pub fn to_json(&self) -> Result<String> {
        self.check()?;
        serde_json::to_string(self).context("Could not serialize message")
    }

    /// Same as [`Message::to_json`], as a [`Value`].
    ///
    /// # Errors
    /// See [`Message::to_json`].
    pub fn to_value(&self) -> Result<Value> {
        self.check()?;
        serde_json::to_value(self).context("Could not serialize message")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::BuildError;

    #[test]
    fn empty_message_only_has_tts() {
        let message = Message::new();
        assert_eq!(message.to_json().unwrap(), r#"{"tts":false}"#);
    }

    #[test]
    fn content_last_write_wins() {
        let message = Message::build(|m| {
            m.content("hi").content(5);
        });
        assert_eq!(
            message.to_value().unwrap(),
            json!({"content": "5", "tts": false})
        );
    }

    #[test]
    fn top_level_keys_follow_schema_order() {
        let message = Message::build(|m| {
            m.allow_mentions([], Vec::<Snowflake>::new(), Vec::<Snowflake>::new(), false)
                .embed(|e| {
                    e.title("t");
                })
                .tts(true)
                .avatar_url("https://example.com/a.png")
                .username("bot")
                .content("hello");
        });
        assert_eq!(
            message.to_json().unwrap(),
            concat!(
                r#"{"content":"hello","username":"bot","avatar_url":"https://example.com/a.png","#,
                r#""tts":true,"embeds":[{"title":"t"}],"#,
                r#""allowed_mentions":{"parse":[],"roles":[],"users":[],"replied_user":false}}"#,
            )
        );
    }

    #[test]
    fn allowed_mentions_keep_input_order() {
        let message = Message::build(|m| {
            m.allow_mentions([MentionKind::Roles, MentionKind::Users], ["1", "2"], ["3"], true);
        });
        assert_eq!(
            message.to_value().unwrap(),
            json!({
                "tts": false,
                "allowed_mentions": {
                    "parse": ["roles", "users"],
                    "roles": ["1", "2"],
                    "users": ["3"],
                    "replied_user": true,
                },
            })
        );
    }

    #[test]
    fn allow_mentions_replaces_previous_value() {
        let message = Message::build(|m| {
            m.allow_mentions([MentionKind::Everyone], [1_u64], [2_u64], true)
                .allow_mentions([MentionKind::Users], Vec::<Snowflake>::new(), ["9"], false);
        });
        assert_eq!(
            message.to_value().unwrap()["allowed_mentions"],
            json!({"parse": ["users"], "roles": [], "users": ["9"], "replied_user": false})
        );
    }

    #[test]
    fn embeds_keep_insertion_order() {
        let message = Message::build(|m| {
            m.embed(|e| {
                e.title("first");
            })
            .embed(|e| {
                e.title("second").color(255);
            })
            .embed(|_| {});
        });
        assert_eq!(message.embeds().len(), 3);
        assert_eq!(
            message.to_value().unwrap(),
            json!({
                "tts": false,
                "embeds": [{"title": "first"}, {"title": "second", "color": 255}, {}],
            })
        );
    }

    #[test]
    fn overfull_embed_fails_serialization() {
        let message = Message::build(|m| {
            m.embed(|e| {
                e.title("fine");
            })
            .embed(|e| {
                for i in 0..26 {
                    e.field(i, i, true);
                }
            });
        });

        let err = message.to_json().unwrap_err();
        assert_eq!(
            err.downcast_ref::<BuildError>(),
            Some(&BuildError::TooManyFields {
                limit: 25,
                attempted: 26
            })
        );
        assert!(format!("{err:#}").starts_with("Embed #2 is invalid"));
    }
}
