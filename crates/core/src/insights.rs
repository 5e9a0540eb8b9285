use crate::{
    error::{Result, TubelensError},
    format::format_comments_for_prompt,
    provider::Provider,
    types::{Comment, CommentInsights, SentimentDistribution},
};

/// Cap on how many comments are attached to the prompt.
const MAX_PROMPT_COMMENTS: usize = 50;

fn insights_system_prompt(lang: &str) -> String {
    format!(
        r#"You are an expert at analyzing viewer comments from video platforms.

IMPORTANT: Write all text content (topics, summary) in {lang} language.

You MUST output ONLY valid JSON matching this exact structure (no markdown, no explanation):
{{
  "sentiment": {{
    "positive": <number>,
    "neutral": <number>,
    "negative": <number>
  }},
  "top_topics": ["topic1", "topic2", "topic3"],
  "summary": "1-2 sentence summary of the overall comment section"
}}

Rules:
- Sentiment values are percentages in the 0-100 range and must sum to 100
- Do not quote the numbers
- At most 3 topics, ordered by how often they come up
- Output ONLY the JSON, nothing else"#
    )
}

impl CommentInsights {
    /// What an empty comment section reads as, without asking a model.
    fn no_comments() -> Self {
        Self {
            sentiment: SentimentDistribution {
                positive: 0.0,
                neutral: 100.0,
                negative: 0.0,
            },
            top_topics: vec!["No comments".to_string()],
            summary: "There are no comments to analyze.".to_string(),
        }
    }
}

/// Summarize a comment batch with the chosen AI provider.
pub async fn generate_insights(
    comments: &[Comment],
    provider: &Provider,
    lang: &str,
) -> Result<CommentInsights> {
    if comments.is_empty() {
        return Ok(CommentInsights::no_comments());
    }

    let sample = prompt_sample(comments);
    let api_key = provider.api_key()?;

    let user_prompt = format!(
        "Analyze these {} comments:\n\n{}",
        sample.len(),
        format_comments_for_prompt(sample)
    );

    let response = reqwest::Client::new()
        .post(provider.api_url())
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&serde_json::json!({
            "model": provider.model(),
            "messages": [
                {
                    "role": "system",
                    "content": insights_system_prompt(lang),
                },
                {
                    "role": "user",
                    "content": user_prompt,
                },
            ],
            "temperature": 0.0,
        }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    // Extract content from response
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| TubelensError::InsightsFailed {
            reason: format!("Invalid API response: {:?}", response),
        })?;

    parse_insights(content)
}

/// Parse the model's strict-JSON reply into [`CommentInsights`].
pub fn parse_insights(content: &str) -> Result<CommentInsights> {
    let insights: CommentInsights = serde_json::from_str(content.trim())?;
    Ok(insights)
}

fn prompt_sample(comments: &[Comment]) -> &[Comment] {
    &comments[..comments.len().min(MAX_PROMPT_COMMENTS)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn comment(text: &str) -> Comment {
        Comment {
            id: text.to_string(),
            author: "a".to_string(),
            text: text.to_string(),
            like_count: 0,
            reply_count: 0,
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn empty_input_falls_back_without_a_network_call() {
        let insights = generate_insights(&[], &Provider::Grok, "en").await.unwrap();
        assert_eq!(insights.sentiment.neutral, 100.0);
        assert_eq!(insights.sentiment.positive, 0.0);
        assert_eq!(insights.top_topics, vec!["No comments".to_string()]);
    }

    #[test]
    fn prompt_sample_caps_at_fifty() {
        let comments: Vec<Comment> = (0..120).map(|i| comment(&format!("c{i}"))).collect();
        assert_eq!(prompt_sample(&comments).len(), MAX_PROMPT_COMMENTS);

        let few: Vec<Comment> = (0..3).map(|i| comment(&format!("c{i}"))).collect();
        assert_eq!(prompt_sample(&few).len(), 3);
    }

    #[test]
    fn parse_insights_accepts_strict_json() {
        let content = r#"{
            "sentiment": {"positive": 60, "neutral": 30, "negative": 10},
            "top_topics": ["editing", "music"],
            "summary": "Mostly positive reception."
        }"#;
        let insights = parse_insights(content).unwrap();
        assert_eq!(insights.sentiment.positive, 60.0);
        assert_eq!(insights.top_topics.len(), 2);
        assert_eq!(insights.summary, "Mostly positive reception.");
    }

    #[test]
    fn parse_insights_rejects_loose_output() {
        let err = parse_insights("Sure! Here is the JSON you asked for: {").unwrap_err();
        assert!(matches!(err, TubelensError::JsonError(_)));
    }

    #[test]
    fn system_prompt_pins_the_output_language() {
        let prompt = insights_system_prompt("uk");
        assert!(prompt.contains("in uk language"));
        assert!(prompt.contains("ONLY valid JSON"));
    }
}
