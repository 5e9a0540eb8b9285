use crate::types::{CaptionEntry, Comment, CommentInsights, CommentStats, Video};

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Format comments as the bullet list the insights prompt attaches.
pub fn format_comments_for_prompt(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|c| format!("- {}", c.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the first `limit` caption entries as timestamped lines.
pub fn format_caption_preview(entries: &[CaptionEntry], limit: usize) -> String {
    entries
        .iter()
        .take(limit)
        .map(|e| format!("[{}] {}", format_timestamp(e.start), e.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one analysis run as human-readable markdown.
pub fn format_analysis_readable(
    video: &Video,
    stats: &CommentStats,
    insights: Option<&CommentInsights>,
) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!("# {}\n\n", video.title));

    // Meta info
    output.push_str(&format!(
        "**Channel:** {} | **Published:** {} | **Views:** {} | **Likes:** {}\n\n",
        video.channel_title,
        video.published_at.format("%Y-%m-%d"),
        video.view_count,
        video.like_count
    ));

    // Comment activity
    output.push_str("## Comment Activity\n\n");
    output.push_str(&format!("• Total comments: {}\n", stats.total_comments));
    output.push_str(&format!("• Unique authors: {}\n", stats.unique_authors));
    output.push_str(&format!(
        "• Average likes per comment: {:.1}\n",
        stats.average_likes
    ));
    output.push('\n');

    // Top authors
    if !stats.top_authors.is_empty() {
        output.push_str("## Top Authors\n\n");
        for (i, author) in stats.top_authors.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} — {} comments\n",
                i + 1,
                author.name,
                author.count
            ));
        }
        output.push('\n');
    }

    // Daily timeline
    if !stats.comment_timeline.is_empty() {
        output.push_str("## Daily Timeline\n\n");
        for point in &stats.comment_timeline {
            output.push_str(&format!("• {}: {}\n", point.date, point.count));
        }
        output.push('\n');
    }

    // AI insights
    if let Some(insights) = insights {
        output.push_str("## Sentiment\n\n");
        output.push_str(&format!(
            "**Positive:** {:.0}% | **Neutral:** {:.0}% | **Negative:** {:.0}%\n\n",
            insights.sentiment.positive, insights.sentiment.neutral, insights.sentiment.negative
        ));

        output.push_str("## Top Topics\n\n");
        for topic in &insights.top_topics {
            output.push_str(&format!("• {}\n", topic));
        }
        output.push('\n');

        output.push_str("## Summary\n\n");
        output.push_str(&insights.summary);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuthorCount, SentimentDistribution, TimelinePoint};
    use chrono::{TimeZone, Utc};

    fn sample_video() -> Video {
        Video {
            id: "vid".to_string(),
            title: "A video".to_string(),
            channel_title: "A channel".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            view_count: 1000,
            like_count: 100,
            comment_count: 10,
        }
    }

    fn sample_stats() -> CommentStats {
        CommentStats {
            total_comments: 3,
            unique_authors: 2,
            top_authors: vec![AuthorCount {
                name: "alice".to_string(),
                count: 2,
            }],
            comment_timeline: vec![TimelinePoint {
                date: "2024-01-10".to_string(),
                count: 3,
            }],
            average_likes: 2.0,
        }
    }

    #[test]
    fn timestamps_render_as_minutes_and_seconds() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.0), "01:05");
        // minutes keep counting past the hour
        assert_eq!(format_timestamp(3723.0), "62:03");
    }

    #[test]
    fn prompt_list_is_one_bullet_per_comment() {
        let comments = vec![
            Comment {
                id: "1".to_string(),
                author: "a".to_string(),
                text: " first ".to_string(),
                like_count: 0,
                reply_count: 0,
                published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            },
            Comment {
                id: "2".to_string(),
                author: "b".to_string(),
                text: "second".to_string(),
                like_count: 0,
                reply_count: 0,
                published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            },
        ];
        assert_eq!(format_comments_for_prompt(&comments), "- first\n- second");
    }

    #[test]
    fn caption_preview_is_limited_and_timestamped() {
        let entries: Vec<CaptionEntry> = (0..8)
            .map(|i| CaptionEntry {
                text: format!("line {i}"),
                start: i as f64 * 61.0,
                duration: 2.0,
            })
            .collect();
        let preview = format_caption_preview(&entries, 2);
        assert_eq!(preview, "[00:00] line 0\n[01:01] line 1");
    }

    #[test]
    fn readable_report_has_the_stat_sections() {
        let readable = format_analysis_readable(&sample_video(), &sample_stats(), None);
        assert!(readable.starts_with("# A video\n"));
        assert!(readable.contains("## Comment Activity"));
        assert!(readable.contains("• Total comments: 3"));
        assert!(readable.contains("1. alice — 2 comments"));
        assert!(readable.contains("• 2024-01-10: 3"));
        assert!(!readable.contains("## Sentiment"));
    }

    #[test]
    fn readable_report_includes_insights_when_present() {
        let insights = CommentInsights {
            sentiment: SentimentDistribution {
                positive: 60.0,
                neutral: 30.0,
                negative: 10.0,
            },
            top_topics: vec!["editing".to_string()],
            summary: "Mostly positive.".to_string(),
        };
        let readable = format_analysis_readable(&sample_video(), &sample_stats(), Some(&insights));
        assert!(readable.contains("**Positive:** 60%"));
        assert!(readable.contains("• editing"));
        assert!(readable.contains("Mostly positive."));
    }
}
