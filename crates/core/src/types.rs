use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One top-level comment as decoded from the Data API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub reply_count: u64,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

/// Chart-ready aggregate over one video's comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentStats {
    pub total_comments: usize,
    pub unique_authors: usize,
    pub top_authors: Vec<AuthorCount>,
    pub comment_timeline: Vec<TimelinePoint>,
    pub average_likes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub name: String,
    pub count: usize,
}

/// Comment count for one UTC calendar day (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: String,
    pub count: usize,
}

/// One timed line of text from a caption track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// LLM-produced summary of a comment batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentInsights {
    pub sentiment: SentimentDistribution,
    pub top_topics: Vec<String>,
    pub summary: String,
}

/// Percentages in the 0-100 range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Everything one analysis run produces, as saved to the cache dir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub video: Video,
    pub stats: CommentStats,
    pub insights: Option<CommentInsights>,
}
