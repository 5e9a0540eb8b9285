use crate::{
    error::{Result, TubelensError},
    types::CaptionEntry,
};

const HEADER_TOKEN: &str = "WEBVTT";

/// Parse a downloaded caption track into timed entries.
///
/// Forward scan over the lines: a line with `-->` sets the pending timing
/// for the text that follows, every other non-blank line (header aside)
/// becomes one entry. Each physical text line is its own entry; the extra
/// lines of a multi-line cue come out with zeroed timing rather than folding
/// into the first entry.
///
/// A timestamp that doesn't read as `H:MM:SS` aborts the whole parse.
pub fn parse_caption_track(raw: &str) -> Result<Vec<CaptionEntry>> {
    let mut entries = Vec::new();
    let mut start = 0.0;
    let mut duration = 0.0;

    for line in raw.lines() {
        if let Some((from, to)) = line.split_once("-->") {
            let begin = parse_cue_timestamp(from)?;
            let end = parse_cue_timestamp(to)?;
            start = begin;
            // a reversed cue keeps its negative duration; callers see the
            // track as-is
            duration = end - begin;
            continue;
        }

        let text = line.trim();
        if text.is_empty() || text == HEADER_TOKEN {
            continue;
        }

        entries.push(CaptionEntry {
            text: text.to_string(),
            start,
            duration,
        });
        start = 0.0;
        duration = 0.0;
    }

    Ok(entries)
}

/// Parse one side of a `H:MM:SS --> H:MM:SS` timing line into seconds.
fn parse_cue_timestamp(raw: &str) -> Result<f64> {
    let token = raw.trim();

    let mut parts = token.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TubelensError::MalformedTimestamp {
            token: token.to_string(),
        });
    };

    let field = |s: &str| -> Result<u64> {
        s.trim()
            .parse()
            .map_err(|_| TubelensError::MalformedTimestamp {
                token: token.to_string(),
            })
    };

    let total = field(hours)? * 3600 + field(minutes)? * 60 + field(seconds)?;
    Ok(total as f64)
}
