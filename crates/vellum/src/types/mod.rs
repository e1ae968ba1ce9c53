//! Type definitions for the media library and the generation API
//!
//! - [`media`]: library items (images, articles, music, video, decks)
//! - [`generation`]: `generateContent` wire types and generator outputs

pub mod generation;
pub mod media;

pub use generation::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GeneratedArticle,
    GeneratedImage, GeneratedPresentation, GeneratedSlide, GenerationConfig, InlineData, Part,
};
pub use media::{
    Comment, ImageItem, MediaType, MusicItem, NewText, PresentationItem, Slide, TextItem,
    VideoItem, VideoSource,
};
