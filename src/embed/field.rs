use serde::Serialize;

/// One `{name, value, inline}` record of an embed. All three keys are always emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    #[must_use]
    pub const fn new(name: String, value: String, inline: bool) -> Self {
        Self {
            name,
            value,
            inline,
        }
    }
}
