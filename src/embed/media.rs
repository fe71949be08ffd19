//! The small sub-objects an embed can carry.
//!
//! Attributes passed as an empty string are left out of the document.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedProvider {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Shared shape of `image`, `thumbnail` and `video`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedMedia {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

pub type EmbedImage = EmbedMedia;
pub type EmbedThumbnail = EmbedMedia;
pub type EmbedVideo = EmbedMedia;
