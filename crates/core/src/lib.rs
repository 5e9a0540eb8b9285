//! Tubelens Core Library
//!
//! Core functionality for fetching YouTube video metadata and comments,
//! aggregating comment activity, parsing caption tracks, and generating
//! AI-powered insights.

pub mod analysis;
pub mod cache;
pub mod captions;
pub mod error;
pub mod format;
pub mod insights;
pub mod provider;
pub mod types;
pub mod youtube;

// Re-export commonly used items at crate root
pub use analysis::aggregate_comments;
pub use cache::{
    get_cache_dir, get_captions_path, get_comments_path, get_insights_path, get_report_path,
    get_video_path, load_captions, load_json, save_captions, save_json,
};
pub use captions::parse_caption_track;
pub use error::{Result, TubelensError};
pub use format::{
    format_analysis_readable, format_caption_preview, format_comments_for_prompt, format_timestamp,
};
pub use insights::{generate_insights, parse_insights};
pub use provider::Provider;
pub use types::{
    AnalysisReport, AuthorCount, CaptionEntry, Comment, CommentInsights, CommentStats,
    SentimentDistribution, TimelinePoint, Video,
};
pub use youtube::{MAX_COMMENTS, YouTubeClient, extract_video_id};
