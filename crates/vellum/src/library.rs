//! Media library storage
//!
//! [`MediaLibrary`] is the persistence seam for the five collections. Lists
//! come back newest first. [`InMemoryLibrary`] is the bundled implementation.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{
    Comment, ImageItem, MusicItem, NewText, PresentationItem, TextItem, VideoItem,
};

/// Storage for library items.
///
/// `add_*` methods assign the item id (and timestamps where the item has
/// one); any id on the value passed in is replaced.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// All images, newest first.
    async fn images(&self) -> Result<Vec<ImageItem>>;
    /// Store an image.
    async fn add_image(&self, url: String, prompt: String) -> Result<ImageItem>;
    /// Remove an image.
    async fn delete_image(&self, id: &str) -> Result<()>;

    /// All articles with their comments, newest first.
    async fn texts(&self) -> Result<Vec<TextItem>>;
    /// Store an article with no ratings or comments.
    async fn add_text(&self, text: NewText) -> Result<TextItem>;
    /// Remove an article and its comments.
    async fn delete_text(&self, id: &str) -> Result<()>;
    /// Append a comment to an article.
    async fn add_comment(&self, text_id: &str, author: String, body: String) -> Result<Comment>;
    /// Overwrite an article's rating aggregate.
    async fn update_text_rating(
        &self,
        id: &str,
        rating: f64,
        rating_count: u32,
    ) -> Result<TextItem>;
    /// Record one star rating and persist the new average.
    ///
    /// The default reads the article and then writes the aggregate in two
    /// calls, so concurrent ratings of one article can overwrite each
    /// other. Stores that can update in place should override it.
    async fn rate_text(&self, id: &str, stars: u8) -> Result<TextItem> {
        let texts = self.texts().await?;
        let text = texts
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("text", id))?;

        let (rating, rating_count) = text.with_rating(stars)?;
        self.update_text_rating(id, rating, rating_count).await
    }

    /// All tracks, newest first.
    async fn music(&self) -> Result<Vec<MusicItem>>;
    /// Store a track.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for `blob:` URLs, which only live as long as
    /// the page that created them.
    async fn add_music(&self, track: MusicItem) -> Result<MusicItem>;
    /// Remove a track.
    async fn delete_music(&self, id: &str) -> Result<()>;

    /// All videos, newest first.
    async fn videos(&self) -> Result<Vec<VideoItem>>;
    /// Store a video.
    async fn add_video(&self, video: VideoItem) -> Result<VideoItem>;
    /// Remove a video.
    async fn delete_video(&self, id: &str) -> Result<()>;

    /// All decks, newest first.
    async fn presentations(&self) -> Result<Vec<PresentationItem>>;
    /// Store a deck.
    async fn add_presentation(&self, deck: PresentationItem) -> Result<PresentationItem>;
    /// Remove a deck.
    async fn delete_presentation(&self, id: &str) -> Result<()>;
}

/// Record one star rating for an article and persist the new average.
///
/// See [`MediaLibrary::rate_text`].
pub async fn rate_text<L>(library: &L, id: &str, stars: u8) -> Result<TextItem>
where
    L: MediaLibrary + ?Sized,
{
    library.rate_text(id, stars).await
}

fn not_found(kind: &str, id: &str) -> Error {
    Error::NotFound(format!("{} '{}' not found", kind, id))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Remove the item with `id`, or report it missing.
fn remove_by_id<T>(
    items: &mut Vec<T>,
    id: &str,
    kind: &str,
    item_id: impl Fn(&T) -> &str,
) -> Result<()> {
    let before = items.len();
    items.retain(|item| item_id(item) != id);
    if items.len() == before {
        return Err(not_found(kind, id));
    }
    debug!(kind, id, "Library item deleted");
    Ok(())
}

#[derive(Debug, Default)]
struct Collections {
    images: Vec<ImageItem>,
    texts: Vec<TextItem>,
    music: Vec<MusicItem>,
    videos: Vec<VideoItem>,
    presentations: Vec<PresentationItem>,
}

/// Process-local library. Collections are kept newest first.
#[derive(Debug, Default)]
pub struct InMemoryLibrary {
    collections: RwLock<Collections>,
}

impl InMemoryLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaLibrary for InMemoryLibrary {
    async fn images(&self) -> Result<Vec<ImageItem>> {
        Ok(self.collections.read().await.images.clone())
    }

    async fn add_image(&self, url: String, prompt: String) -> Result<ImageItem> {
        let item = ImageItem {
            id: new_id(),
            url,
            prompt,
            created_at: now_millis(),
        };
        self.collections.write().await.images.insert(0, item.clone());
        Ok(item)
    }

    async fn delete_image(&self, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        remove_by_id(&mut collections.images, id, "image", |i| i.id.as_str())
    }

    async fn texts(&self) -> Result<Vec<TextItem>> {
        Ok(self.collections.read().await.texts.clone())
    }

    async fn add_text(&self, text: NewText) -> Result<TextItem> {
        let item = TextItem {
            id: new_id(),
            title: text.title,
            content: text.content,
            author: text.author,
            created_at: now_millis(),
            rating: 0.0,
            rating_count: 0,
            comments: Vec::new(),
        };
        self.collections.write().await.texts.insert(0, item.clone());
        Ok(item)
    }

    async fn delete_text(&self, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        remove_by_id(&mut collections.texts, id, "text", |t| t.id.as_str())
    }

    async fn add_comment(&self, text_id: &str, author: String, body: String) -> Result<Comment> {
        let mut collections = self.collections.write().await;
        let text = collections
            .texts
            .iter_mut()
            .find(|t| t.id == text_id)
            .ok_or_else(|| not_found("text", text_id))?;

        let comment = Comment {
            id: new_id(),
            author,
            text: body,
            timestamp: now_millis(),
        };
        text.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_text_rating(
        &self,
        id: &str,
        rating: f64,
        rating_count: u32,
    ) -> Result<TextItem> {
        let mut collections = self.collections.write().await;
        let text = collections
            .texts
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("text", id))?;

        text.rating = rating;
        text.rating_count = rating_count;
        Ok(text.clone())
    }

    async fn rate_text(&self, id: &str, stars: u8) -> Result<TextItem> {
        let mut collections = self.collections.write().await;
        let text = collections
            .texts
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("text", id))?;

        let (rating, rating_count) = text.with_rating(stars)?;
        text.rating = rating;
        text.rating_count = rating_count;
        Ok(text.clone())
    }

    async fn music(&self) -> Result<Vec<MusicItem>> {
        Ok(self.collections.read().await.music.clone())
    }

    async fn add_music(&self, mut track: MusicItem) -> Result<MusicItem> {
        if track.url.starts_with("blob:") {
            warn!(url = %track.url, "Refusing to store temporary blob URL");
            return Err(Error::InvalidInput(
                "Cannot save temporary file URL to the library".to_string(),
            ));
        }
        if track.duration.trim().is_empty() {
            track.duration = MusicItem::UNKNOWN_DURATION.to_string();
        }

        track.id = new_id();
        self.collections.write().await.music.insert(0, track.clone());
        Ok(track)
    }

    async fn delete_music(&self, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        remove_by_id(&mut collections.music, id, "music", |m| m.id.as_str())
    }

    async fn videos(&self) -> Result<Vec<VideoItem>> {
        Ok(self.collections.read().await.videos.clone())
    }

    async fn add_video(&self, mut video: VideoItem) -> Result<VideoItem> {
        video.id = new_id();
        self.collections.write().await.videos.insert(0, video.clone());
        Ok(video)
    }

    async fn delete_video(&self, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        remove_by_id(&mut collections.videos, id, "video", |v| v.id.as_str())
    }

    async fn presentations(&self) -> Result<Vec<PresentationItem>> {
        Ok(self.collections.read().await.presentations.clone())
    }

    async fn add_presentation(&self, mut deck: PresentationItem) -> Result<PresentationItem> {
        deck.id = new_id();
        self.collections
            .write()
            .await
            .presentations
            .insert(0, deck.clone());
        Ok(deck)
    }

    async fn delete_presentation(&self, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        remove_by_id(&mut collections.presentations, id, "presentation", |p| p.id.as_str())
    }
}
