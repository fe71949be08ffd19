use serde::Serialize;

/// Opaque entity identifier. No numeric interpretation happens on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Snowflake(String);

impl Snowflake {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for Snowflake {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for Snowflake {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Kinds of mentions the text of a message may trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    Roles,
    Users,
    Everyone,
}

/// The `allowed_mentions` object. Every key is always emitted, so an empty `parse`
/// list really does suppress all mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<MentionKind>,
    pub roles: Vec<Snowflake>,
    pub users: Vec<Snowflake>,
    pub replied_user: bool,
}
