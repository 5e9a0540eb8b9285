use std::collections::HashMap;

use crate::types::{AuthorCount, Comment, CommentStats, TimelinePoint};

const TOP_AUTHORS_LIMIT: usize = 10;

/// Aggregate a fetched comment list into chart-ready stats.
///
/// Single pass over the input; accepts anything including an empty list and
/// never fails. Authors are opaque string keys, so a missing display name
/// just buckets under the empty string.
pub fn aggregate_comments(comments: &[Comment]) -> CommentStats {
    // count + index of first appearance, so equal counts rank in the order
    // the authors first showed up
    let mut authors: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut days: HashMap<String, usize> = HashMap::new();
    let mut like_sum: u64 = 0;

    for (index, comment) in comments.iter().enumerate() {
        let tally = authors.entry(comment.author.as_str()).or_insert((0, index));
        tally.0 += 1;

        let day = comment.published_at.format("%Y-%m-%d").to_string();
        *days.entry(day).or_insert(0) += 1;

        like_sum += comment.like_count;
    }

    let unique_authors = authors.len();

    let mut ranked: Vec<(&str, usize, usize)> = authors
        .into_iter()
        .map(|(name, (count, first_seen))| (name, count, first_seen))
        .collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(TOP_AUTHORS_LIMIT);

    let top_authors = ranked
        .into_iter()
        .map(|(name, count, _)| AuthorCount {
            name: name.to_string(),
            count,
        })
        .collect();

    // zero-padded ISO dates, so the lexicographic order is the calendar order
    let mut comment_timeline: Vec<TimelinePoint> = days
        .into_iter()
        .map(|(date, count)| TimelinePoint { date, count })
        .collect();
    comment_timeline.sort_unstable_by(|a, b| a.date.cmp(&b.date));

    let average_likes = if comments.is_empty() {
        0.0
    } else {
        like_sum as f64 / comments.len() as f64
    };

    CommentStats {
        total_comments: comments.len(),
        unique_authors,
        top_authors,
        comment_timeline,
        average_likes,
    }
}
