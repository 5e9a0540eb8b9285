use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::{
    error::{Result, TubelensError},
    types::{Comment, Video},
};

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";

/// Hard cap on fetched comments per video, matching the practical limit of
/// paging the commentThreads endpoint.
pub const MAX_COMMENTS: usize = 1000;
const PAGE_SIZE: usize = 100;
const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Pull the 11-char video id out of the URL shapes YouTube hands around.
///
/// Accepts `youtube.com/watch?v=<id>`, `youtu.be/<id>`,
/// `youtube.com/shorts/<id>` and `youtube.com/embed/<id>`.
pub fn extract_video_id(raw_url: &str) -> Result<String> {
    let invalid = || TubelensError::InvalidUrl {
        url: raw_url.to_string(),
    };

    let parsed = Url::parse(raw_url).map_err(|_| invalid())?;
    let host = parsed.host_str().ok_or_else(invalid)?.to_ascii_lowercase();

    let on_youtube = host == "youtube.com" || host.ends_with(".youtube.com");

    // youtu.be/<id>
    if host == "youtu.be" {
        let id = parsed
            .path_segments()
            .and_then(|mut segs| segs.next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(invalid)?;
        return Ok(id.to_string());
    }

    if !on_youtube {
        return Err(invalid());
    }

    // youtube.com/watch?v=<id>
    if parsed.path().starts_with("/watch") {
        for (key, value) in parsed.query_pairs() {
            if key == "v" && !value.trim().is_empty() {
                return Ok(value.trim().to_string());
            }
        }
        return Err(invalid());
    }

    // youtube.com/shorts/<id>, youtube.com/embed/<id>
    if let Some(mut segs) = parsed.path_segments() {
        let first = segs.next().unwrap_or("");
        let second = segs.next().unwrap_or("").trim();
        if (first == "shorts" || first == "embed") && !second.is_empty() {
            return Ok(second.to_string());
        }
    }

    Err(invalid())
}

/// Thin client over the YouTube Data API v3.
pub struct YouTubeClient {
    api_key: String,
    client: reqwest::Client,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from the `YOUTUBE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("YOUTUBE_API_KEY").map_err(|_| TubelensError::MissingApiKey {
                env_var: "YOUTUBE_API_KEY".to_string(),
            })?;
        Ok(Self::new(api_key))
    }

    /// Fetch title, channel, and statistics for a single video.
    pub async fn get_video_details(&self, video_id: &str) -> Result<Video> {
        let response: VideoListResponse = self
            .client
            .get(format!("{YOUTUBE_API_BASE}/videos"))
            .query(&[
                ("key", self.api_key.as_str()),
                ("id", video_id),
                ("part", "snippet,statistics"),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(TubelensError::YouTubeApi {
                reason: format!("{} ({})", error.message, error.code),
            });
        }

        let item = response
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| TubelensError::VideoNotFound {
                video_id: video_id.to_string(),
            })?;

        Ok(item.into_video())
    }

    /// Fetch the video's top-level comments, newest pages first as the API
    /// returns them, up to [`MAX_COMMENTS`].
    ///
    /// Pages sequentially with a fixed delay between requests to stay under
    /// the API quota. `on_progress` gets the running total after each page.
    pub async fn fetch_all_comments(
        &self,
        video_id: &str,
        mut on_progress: impl FnMut(usize),
    ) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params: Vec<(&str, String)> = vec![
                ("key", self.api_key.clone()),
                ("videoId", video_id.to_string()),
                ("part", "snippet".to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let response: CommentThreadListResponse = self
                .client
                .get(format!("{YOUTUBE_API_BASE}/commentThreads"))
                .query(&params)
                .send()
                .await?
                .json()
                .await?;

            if let Some(error) = response.error {
                return Err(TubelensError::YouTubeApi {
                    reason: format!("{} ({})", error.message, error.code),
                });
            }

            comments.extend(
                response
                    .items
                    .unwrap_or_default()
                    .into_iter()
                    .map(CommentThread::into_comment),
            );
            on_progress(comments.len().min(MAX_COMMENTS));

            if comments.len() >= MAX_COMMENTS {
                comments.truncate(MAX_COMMENTS);
                break;
            }

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }

            tokio::time::sleep(PAGE_DELAY).await;
        }

        Ok(comments)
    }

    /// Download the raw caption track text for a video.
    ///
    /// Uses the public timedtext endpoint (the captions.download API needs
    /// OAuth for third-party videos), retrying with `kind=asr` to pick up
    /// auto-generated tracks.
    pub async fn download_captions(&self, video_id: &str, lang: &str) -> Result<String> {
        let manual = self
            .client
            .get(TIMEDTEXT_URL)
            .query(&[("v", video_id), ("lang", lang), ("fmt", "vtt")])
            .send()
            .await?;

        let body = if manual.status().is_success() {
            manual.text().await?
        } else {
            let auto = self
                .client
                .get(TIMEDTEXT_URL)
                .query(&[("v", video_id), ("lang", lang), ("fmt", "vtt"), ("kind", "asr")])
                .send()
                .await?;
            if !auto.status().is_success() {
                return Err(TubelensError::NoCaptions {
                    video_id: video_id.to_string(),
                });
            }
            auto.text().await?
        };

        if body.trim().is_empty() {
            return Err(TubelensError::NoCaptions {
                video_id: video_id.to_string(),
            });
        }

        Ok(body)
    }
}

// Data API wire types. Statistics counts come back as decimal strings and
// likeCount disappears entirely when the uploader hides ratings.

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    items: Option<Vec<VideoItem>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    title: String,
    channel_title: String,
    published_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

impl VideoItem {
    fn into_video(self) -> Video {
        Video {
            id: self.id,
            title: self.snippet.title,
            channel_title: self.snippet.channel_title,
            published_at: self.snippet.published_at,
            view_count: parse_count(self.statistics.view_count.as_deref()),
            like_count: parse_count(self.statistics.like_count.as_deref()),
            comment_count: parse_count(self.statistics.comment_count.as_deref()),
        }
    }
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.unwrap_or("0").parse().unwrap_or(0)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadListResponse {
    items: Option<Vec<CommentThread>>,
    next_page_token: Option<String>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    id: String,
    snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: TopLevelComment,
    total_reply_count: u64,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    author_display_name: String,
    text_display: String,
    like_count: u64,
    published_at: DateTime<Utc>,
}

impl CommentThread {
    fn into_comment(self) -> Comment {
        let top = self.snippet.top_level_comment.snippet;
        Comment {
            id: self.id,
            author: top.author_display_name,
            text: top.text_display,
            like_count: top.like_count,
            reply_count: self.snippet.total_reply_count,
            published_at: top.published_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn video_id_from_watch_url() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn video_id_from_short_url() {
        let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn video_id_from_shorts_and_embed() {
        let id = extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
        let id = extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn non_video_urls_are_rejected() {
        assert!(extract_video_id("https://youtube.com/").is_err());
        assert!(extract_video_id("https://youtube.com/channel/UCxyz").is_err());
        assert!(extract_video_id("https://vimeo.com/watch?v=abc").is_err());
        assert!(extract_video_id("not a url").is_err());
    }

    #[test]
    fn comment_thread_maps_to_comment() {
        let wire = json!({
            "items": [{
                "id": "thread-1",
                "snippet": {
                    "topLevelComment": {
                        "snippet": {
                            "authorDisplayName": "alice",
                            "textDisplay": "great video",
                            "likeCount": 7,
                            "publishedAt": "2024-03-05T12:00:00Z"
                        }
                    },
                    "totalReplyCount": 2
                }
            }],
            "nextPageToken": "next"
        });

        let response: CommentThreadListResponse = serde_json::from_value(wire).unwrap();
        assert_eq!(response.next_page_token.as_deref(), Some("next"));

        let comment = response
            .items
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
            .into_comment();
        assert_eq!(comment.id, "thread-1");
        assert_eq!(comment.author, "alice");
        assert_eq!(comment.text, "great video");
        assert_eq!(comment.like_count, 7);
        assert_eq!(comment.reply_count, 2);
        assert_eq!(comment.published_at.to_rfc3339(), "2024-03-05T12:00:00+00:00");
    }

    #[test]
    fn hidden_like_count_defaults_to_zero() {
        let wire = json!({
            "id": "vid",
            "snippet": {
                "title": "A video",
                "channelTitle": "A channel",
                "publishedAt": "2024-01-01T00:00:00Z"
            },
            "statistics": {
                "viewCount": "1234",
                "commentCount": "56"
            }
        });

        let video = serde_json::from_value::<VideoItem>(wire).unwrap().into_video();
        assert_eq!(video.view_count, 1234);
        assert_eq!(video.like_count, 0);
        assert_eq!(video.comment_count, 56);
    }
}
