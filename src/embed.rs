mod color;
mod field;
mod media;

use serde::Serialize;

pub use color::Color;
pub use field::EmbedField;
pub use media::{
    EmbedAuthor, EmbedFooter, EmbedImage, EmbedMedia, EmbedProvider, EmbedThumbnail, EmbedVideo,
};

use crate::{error::BuildError, scalar::Scalar};

/// Maximum number of fields a single embed may hold.
pub const MAX_FIELDS: usize = 25;

/// A rich sub-document of a [`Message`](crate::Message).
///
/// Every setter takes `&mut self` and hands it back, so calls can be chained.
/// Setting the same attribute twice keeps the last value.
/// Keys that were never set are left out of the serialized document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<EmbedThumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    video: Option<EmbedVideo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<EmbedProvider>,

    /// Number of `field` calls made after the embed was already full.
    #[serde(skip)]
    rejected_fields: usize,
}

impl Embed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, title: impl Into<Scalar>) -> &mut Self {
        self.title = Some(canonical(title));
        self
    }

    /// Sets the `type` key.
    pub fn kind(&mut self, kind: impl Into<Scalar>) -> &mut Self {
        self.kind = Some(canonical(kind));
        self
    }

    pub fn description(&mut self, description: impl Into<Scalar>) -> &mut Self {
        self.description = Some(canonical(description));
        self
    }

    pub fn url(&mut self, url: impl Into<Scalar>) -> &mut Self {
        self.url = Some(canonical(url));
        self
    }

    /// Expects an ISO 8601 string; a [`chrono::DateTime`] converts to one.
    pub fn timestamp(&mut self, timestamp: impl Into<Scalar>) -> &mut Self {
        self.timestamp = Some(canonical(timestamp));
        self
    }

    /// The color has to be given in decimal (`"16711680"`, not `"ff0000"`).
    /// Anything that does not coerce to an integer ends up as `0`.
    pub fn color(&mut self, color: impl Into<Scalar>) -> &mut Self {
        self.color = Some(color.into().to_canonical_integer());
        self
    }

    pub fn color_rgb(&mut self, color: Color) -> &mut Self {
        self.color(color)
    }

    pub fn footer(&mut self, text: impl Into<Scalar>, icon_url: impl Into<Scalar>) -> &mut Self {
        self.footer = Some(EmbedFooter {
            text: canonical(text),
            icon_url: canonical(icon_url),
        });
        self
    }

    pub fn author(
        &mut self,
        name: impl Into<Scalar>,
        url: impl Into<Scalar>,
        icon_url: impl Into<Scalar>,
    ) -> &mut Self {
        self.author = Some(EmbedAuthor {
            name: canonical(name),
            url: canonical(url),
            icon_url: canonical(icon_url),
        });
        self
    }

    pub fn provider(&mut self, name: impl Into<Scalar>, url: impl Into<Scalar>) -> &mut Self {
        self.provider = Some(EmbedProvider {
            name: canonical(name),
            url: canonical(url),
        });
        self
    }

    pub fn image(&mut self, url: impl Into<Scalar>) -> &mut Self {
        self.image = Some(EmbedMedia { url: canonical(url) });
        self
    }

    pub fn video(&mut self, url: impl Into<Scalar>) -> &mut Self {
        self.video = Some(EmbedMedia { url: canonical(url) });
        self
    }

    pub fn thumbnail(&mut self, url: impl Into<Scalar>) -> &mut Self {
        self.thumbnail = Some(EmbedMedia { url: canonical(url) });
        self
    }

    /// Appends a field.
    ///
    /// Once [`MAX_FIELDS`] fields are present, further fields are dropped and the embed is
    /// marked as invalid: [`Embed::check`] (and therefore serializing or sending the message)
    /// fails with [`BuildError::TooManyFields`].
    pub fn field(
        &mut self,
        name: impl Into<Scalar>,
        value: impl Into<Scalar>,
        inline: bool,
    ) -> &mut Self {
        if self.fields.len() >= MAX_FIELDS {
            self.rejected_fields += 1;
            log::error!(
                "Rejected field #{} of embed; at most {MAX_FIELDS} fields are allowed",
                self.fields.len() + self.rejected_fields,
            );
            return self;
        }
        self.fields
            .push(EmbedField::new(canonical(name), canonical(value), inline));
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[EmbedField] {
        &self.fields
    }

    /// Fails if more fields were added than an embed can hold.
    pub fn check(&self) -> Result<(), BuildError> {
        if self.rejected_fields == 0 {
            return Ok(());
        }
        Err(BuildError::TooManyFields {
            limit: MAX_FIELDS,
            attempted: MAX_FIELDS + 1,
        })
    }
}

fn canonical(value: impl Into<Scalar>) -> String {
    value.into().to_canonical_string()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn to_json(embed: &Embed) -> Value {
        serde_json::to_value(embed).unwrap()
    }

    #[test]
    fn empty_embed_has_no_keys() {
        assert_eq!(to_json(&Embed::new()), json!({}));
    }

    #[test]
    fn keys_follow_schema_order() {
        let mut embed = Embed::new();
        embed
            .provider("Provider", "https://provider.example")
            .footer("Footer", "https://example.com/icon.png")
            .field("Room", 204, true)
            .color("5814783")
            .timestamp("2024-03-09T17:05:00Z")
            .url("https://example.com")
            .description("Body")
            .kind("rich")
            .title("Title")
            .author("Author", "", "")
            .thumbnail("https://example.com/thumb.png")
            .image("https://example.com/image.png")
            .video("https://example.com/video.mp4");

        let rendered = serde_json::to_string(&embed).unwrap();
        let expected = concat!(
            r#"{"author":{"name":"Author"},"title":"Title","type":"rich","description":"Body","#,
            r#""url":"https://example.com","timestamp":"2024-03-09T17:05:00Z","color":5814783,"#,
            r#""fields":[{"name":"Room","value":"204","inline":true}],"#,
            r#""thumbnail":{"url":"https://example.com/thumb.png"},"#,
            r#""image":{"url":"https://example.com/image.png"},"#,
            r#""video":{"url":"https://example.com/video.mp4"},"#,
            r#""footer":{"text":"Footer","icon_url":"https://example.com/icon.png"},"#,
            r#""provider":{"name":"Provider","url":"https://provider.example"}}"#,
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn last_write_wins() {
        let mut embed = Embed::new();
        embed.title("first").title(2_u8).footer("a", "b").footer("c", "");
        assert_eq!(
            to_json(&embed),
            json!({"title": "2", "footer": {"text": "c"}})
        );
    }

    #[test]
    fn color_is_stored_as_decimal_integer() {
        let mut embed = Embed::new();
        embed.color(Color::new(255, 0, 0));
        assert_eq!(to_json(&embed), json!({"color": 16_711_680}));

        embed.color("ff0000");
        assert_eq!(to_json(&embed), json!({"color": 0}));

        embed.color(-1_i32);
        assert_eq!(to_json(&embed), json!({"color": -1}));
    }

    #[test]
    fn false_inline_is_still_emitted() {
        let mut embed = Embed::new();
        embed.field("", "", false);
        assert_eq!(
            to_json(&embed),
            json!({"fields": [{"name": "", "value": "", "inline": false}]})
        );
    }

    #[test]
    fn twenty_five_fields_fit_in_order() {
        let mut embed = Embed::new();
        for i in 0..MAX_FIELDS {
            embed.field(format!("name {i}"), i, i % 2 == 0);
        }
        assert_eq!(embed.check(), Ok(()));

        let expected: Vec<Value> = (0..MAX_FIELDS)
            .map(|i| {
                json!({"name": format!("name {i}"), "value": i.to_string(), "inline": i % 2 == 0})
            })
            .collect();
        assert_eq!(to_json(&embed)["fields"], Value::Array(expected));
        assert_eq!(embed.fields().len(), 25);
    }

    #[test]
    fn empty_media_url_is_omitted() {
        let mut embed = Embed::new();
        embed.image("").thumbnail("https://example.com/t.png").video("");
        assert_eq!(
            to_json(&embed),
            json!({"thumbnail": {"url": "https://example.com/t.png"}, "image": {}, "video": {}})
        );
    }

    // The cap is strict: the 26th field is the first one rejected.
    #[test]
    fn twenty_sixth_field_is_rejected() {
        let mut embed = Embed::new();
        for i in 0..=MAX_FIELDS {
            embed.field("name", i, false);
        }
        assert_eq!(embed.fields().len(), MAX_FIELDS);
        assert_eq!(
            embed.check(),
            Err(BuildError::TooManyFields {
                limit: 25,
                attempted: 26
            })
        );
    }
}
