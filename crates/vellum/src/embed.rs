//! Media link normalization
//!
//! Turns the links users paste (YouTube, Vimeo, Spotify, Google Drive, ...)
//! into the ids and player URLs the library stores and renders.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{VideoItem, VideoSource};

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("youtube id pattern is valid")
});

static VIMEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vimeo\.com/(\d+)").expect("vimeo id pattern is valid"));

static DRIVE_FILE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([^/]+)").expect("drive path pattern is valid"));

static DRIVE_QUERY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id=([^&]+)").expect("drive query pattern is valid"));

static DRIVE_VIEW_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(view|edit).*$").expect("drive suffix pattern is valid"));

const YOUTUBE_ID_LEN: usize = 11;

/// Extract the 11-character video id from a YouTube link.
///
/// Recognizes `youtu.be/ID`, `v/ID`, `u/x/ID`, `embed/ID`, `watch?v=ID` and
/// `&v=ID`. Anything that does not yield exactly 11 characters is `None`.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let id = YOUTUBE_ID.captures(url)?.get(2)?.as_str();
    (id.len() == YOUTUBE_ID_LEN).then_some(id)
}

/// Extract the numeric video id from a Vimeo link.
pub fn vimeo_video_id(url: &str) -> Option<&str> {
    Some(VIMEO_ID.captures(url)?.get(1)?.as_str())
}

/// What to store for a pasted video link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLink {
    /// Hosting service
    pub source_type: VideoSource,
    /// Video id when one was recognized, otherwise the link itself
    pub url: String,
    /// Thumbnail derived from the id, YouTube only
    pub thumbnail_url: Option<String>,
}

impl VideoLink {
    /// Classify a pasted link.
    ///
    /// A YouTube or Vimeo link whose id cannot be extracted keeps its source
    /// type and stores the link unchanged.
    pub fn parse(url: &str) -> Self {
        if url.contains("youtube.com") || url.contains("youtu.be") {
            return match youtube_video_id(url) {
                Some(id) => Self {
                    source_type: VideoSource::Youtube,
                    url: id.to_string(),
                    thumbnail_url: Some(format!(
                        "https://img.youtube.com/vi/{}/maxresdefault.jpg",
                        id
                    )),
                },
                None => Self {
                    source_type: VideoSource::Youtube,
                    url: url.to_string(),
                    thumbnail_url: None,
                },
            };
        }

        if url.contains("vimeo.com") {
            return Self {
                source_type: VideoSource::Vimeo,
                url: vimeo_video_id(url).unwrap_or(url).to_string(),
                thumbnail_url: None,
            };
        }

        Self {
            source_type: VideoSource::Native,
            url: url.to_string(),
            thumbnail_url: None,
        }
    }
}

/// Player URL for a stored video.
///
/// `origin` is the page origin the YouTube player is embedded in.
pub fn video_embed_url(video: &VideoItem, origin: &str) -> String {
    match video.source_type {
        VideoSource::Youtube => format!(
            "https://www.youtube.com/embed/{}?origin={}&enablejsapi=1&rel=0",
            video.url, origin
        ),
        VideoSource::Vimeo => format!("https://player.vimeo.com/video/{}?autoplay=1", video.url),
        VideoSource::Native => video.url.clone(),
    }
}

/// Where a music link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicService {
    /// open.spotify.com
    Spotify,
    /// udio.com
    Udio,
    /// musicgpt.com
    MusicGpt,
    /// mureka.ai
    Mureka,
    /// An audio file played directly
    Local,
}

impl MusicService {
    /// Detect the service from a track URL.
    pub fn detect(url: &str) -> Self {
        if url.contains("spotify.com") {
            MusicService::Spotify
        } else if url.contains("udio.com") {
            MusicService::Udio
        } else if url.contains("musicgpt.com") {
            MusicService::MusicGpt
        } else if url.contains("mureka.ai") {
            MusicService::Mureka
        } else {
            MusicService::Local
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            MusicService::Spotify => "Spotify",
            MusicService::Udio => "Udio",
            MusicService::MusicGpt => "MusicGPT",
            MusicService::Mureka => "Mureka",
            MusicService::Local => "Local",
        }
    }

    /// Whether playback happens on the service's own page or player.
    pub fn is_external(self) -> bool {
        self != MusicService::Local
    }

    /// Whether the service allows its player in an iframe.
    ///
    /// Udio and Mureka refuse framing and open in a popup instead.
    pub fn is_embeddable(self) -> bool {
        matches!(self, MusicService::Spotify | MusicService::MusicGpt)
    }
}

/// Directly streamable URL for an audio link.
///
/// Google Drive share links (`/d/ID/...` or `?id=ID`) become download links;
/// everything else is returned unchanged.
pub fn audio_source_url(url: &str) -> String {
    if url.contains("drive.google.com") {
        let id = DRIVE_FILE_ID
            .captures(url)
            .or_else(|| DRIVE_QUERY_ID.captures(url))
            .and_then(|c| c.get(1));
        if let Some(id) = id {
            return format!(
                "https://drive.google.com/uc?export=download&id={}",
                id.as_str()
            );
        }
    }
    url.to_string()
}

/// Iframe URL for an external music link.
///
/// Spotify links map to `open.spotify.com/embed{path}`; Udio links lose
/// their query string; others are returned unchanged.
pub fn music_embed_url(url: &str) -> String {
    let clean = url.split('?').next().unwrap_or(url);

    if clean.contains("spotify.com") {
        return match url::Url::parse(url) {
            Ok(parsed) => format!("https://open.spotify.com/embed{}", parsed.path()),
            Err(_) => url.to_string(),
        };
    }
    if clean.contains("udio.com") {
        return clean.to_string();
    }
    url.to_string()
}

/// Embeddable preview URL for a Google Drive document link.
pub fn drive_preview_url(url: &str) -> String {
    if !url.contains("drive.google.com") {
        return url.to_string();
    }

    let preview = DRIVE_VIEW_SUFFIX.replace(url, "/preview").into_owned();
    if preview.contains("/preview") {
        preview
    } else {
        format!("{}/preview", preview)
    }
}

/// Split a pasted list of slide image URLs on newlines and commas.
pub fn split_slide_urls(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_youtube_id_rejects_wrong_length() {
        assert_eq!(youtube_video_id("https://youtu.be/short"), None);
        assert_eq!(youtube_video_id("https://example.com/nothing"), None);
    }

    #[test]
    fn test_video_link_youtube_thumbnail() {
        let link = VideoLink::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(link.source_type, VideoSource::Youtube);
        assert_eq!(link.url, "dQw4w9WgXcQ");
        assert_eq!(
            link.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg")
        );
    }

    #[test]
    fn test_video_link_unparseable_youtube_keeps_url() {
        let link = VideoLink::parse("https://www.youtube.com/channel/abc");
        assert_eq!(link.source_type, VideoSource::Youtube);
        assert_eq!(link.url, "https://www.youtube.com/channel/abc");
        assert_eq!(link.thumbnail_url, None);
    }

    #[test]
    fn test_music_service_flags() {
        assert!(MusicService::Spotify.is_embeddable());
        assert!(!MusicService::Udio.is_embeddable());
        assert!(MusicService::Mureka.is_external());
        assert!(!MusicService::Local.is_external());
        assert_eq!(MusicService::MusicGpt.name(), "MusicGPT");
    }

    #[test]
    fn test_drive_preview_idempotent() {
        let url = "https://drive.google.com/file/d/abc/preview";
        assert_eq!(drive_preview_url(url), url);
    }
}
