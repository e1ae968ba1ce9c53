//! Media library items.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five media categories of the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Still images
    Image,
    /// Articles
    Text,
    /// Audio tracks
    Music,
    /// Video clips
    Video,
    /// Slide decks
    Presentation,
}

impl MediaType {
    /// All categories in navigation order.
    pub const ALL: [MediaType; 5] = [
        MediaType::Image,
        MediaType::Text,
        MediaType::Music,
        MediaType::Video,
        MediaType::Presentation,
    ];

    /// Whether the generation service can produce items of this type.
    pub fn is_generatable(self) -> bool {
        matches!(
            self,
            MediaType::Image | MediaType::Text | MediaType::Presentation
        )
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaType::Image => "image",
            MediaType::Text => "text",
            MediaType::Music => "music",
            MediaType::Video => "video",
            MediaType::Presentation => "presentation",
        };
        f.write_str(name)
    }
}

/// A reader comment on an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier
    pub id: String,
    /// Display name of the commenter
    pub author: String,
    /// Comment body
    pub text: String,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// An image in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    /// Unique identifier
    pub id: String,
    /// Image location (public URL or data URL)
    pub url: String,
    /// Prompt or caption the image was created from
    pub prompt: String,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,
}

/// An article with ratings and comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextItem {
    /// Unique identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Markdown body
    pub content: String,
    /// Author name
    pub author: String,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,
    /// Average rating, 0 to 5
    pub rating: f64,
    /// Number of ratings behind the average
    pub rating_count: u32,
    /// Reader comments, oldest first
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl TextItem {
    /// Lowest accepted star rating.
    pub const MIN_STARS: u8 = 1;
    /// Highest accepted star rating.
    pub const MAX_STARS: u8 = 5;

    /// The running average after one more rating of `stars`.
    ///
    /// Returns `(rating, rating_count)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) if `stars` is outside 1..=5.
    pub fn with_rating(&self, stars: u8) -> crate::Result<(f64, u32)> {
        if !(Self::MIN_STARS..=Self::MAX_STARS).contains(&stars) {
            return Err(crate::Error::InvalidInput(format!(
                "rating must be between {} and {}, got {}",
                Self::MIN_STARS,
                Self::MAX_STARS,
                stars
            )));
        }

        let count = self.rating_count + 1;
        let total = self.rating * f64::from(self.rating_count) + f64::from(stars);
        Ok((total / f64::from(count), count))
    }
}

/// Content of a new article before the library assigns identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewText {
    /// Headline
    pub title: String,
    /// Markdown body
    pub content: String,
    /// Author name
    pub author: String,
}

/// A music track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicItem {
    /// Unique identifier
    pub id: String,
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Audio file or streaming-service URL
    pub url: String,
    /// Optional cover art
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// Human-readable duration, `"Unknown"` when not known
    #[serde(default = "unknown_duration")]
    pub duration: String,
}

fn unknown_duration() -> String {
    MusicItem::UNKNOWN_DURATION.to_string()
}

impl MusicItem {
    /// Duration placeholder for tracks without metadata.
    pub const UNKNOWN_DURATION: &'static str = "Unknown";
}

/// Where a video is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSource {
    /// YouTube; `url` holds the 11-character video id
    Youtube,
    /// Vimeo; `url` holds the numeric video id
    Vimeo,
    /// A directly playable file; `url` holds its location
    Native,
}

/// A video clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    /// Unique identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Preview image
    pub thumbnail_url: String,
    /// Hosting service
    pub source_type: VideoSource,
    /// Video id for hosted sources, file URL for native ones
    pub url: String,
}

/// One slide of a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Identifier, unique within the deck
    pub id: String,
    /// Slide heading
    pub title: String,
    /// Bullet points
    #[serde(default)]
    pub content: Vec<String>,
    /// Optional slide image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A slide deck, either structured slides or a linked PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationItem {
    /// Unique identifier
    pub id: String,
    /// Deck title
    pub title: String,
    /// Author name
    pub author: String,
    /// Slides; empty for PDF decks
    #[serde(default)]
    pub slides: Vec<Slide>,
    /// Optional PDF rendition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}
