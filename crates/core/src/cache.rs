use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::{error::Result, provider::Provider};

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("tubelens")
}

/// Get the cache directory for one video. Video ids are 11 chars of
/// URL-safe base64, so they double as directory names.
pub fn get_cache_dir(video_id: &str) -> PathBuf {
    get_root_cache_dir().join(video_id)
}

pub fn get_video_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("video.json")
}

pub fn get_comments_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("comments.json")
}

pub fn get_captions_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("captions.vtt")
}

/// Insights depend on the provider and output language, so each pair gets
/// its own cache file.
pub fn get_insights_path(cache_dir: &Path, provider: &Provider, lang: &str) -> PathBuf {
    cache_dir.join(format!("insights_{}_{}.json", provider.slug(), lang))
}

pub fn get_report_path(cache_dir: &Path, provider: &Provider, lang: &str) -> PathBuf {
    cache_dir.join(format!("report_{}_{}.json", provider.slug(), lang))
}

/// Load a cached JSON artifact.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json_content = fs::read_to_string(path).await?;
    let value: T = serde_json::from_str(&json_content)?;
    Ok(value)
}

/// Save a JSON artifact to the cache.
pub async fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let pretty_json = serde_json::to_string_pretty(value)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}

/// Load a cached raw caption track.
pub async fn load_captions(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).await?;
    Ok(text)
}

/// Save a raw caption track to the cache.
pub async fn save_captions(raw: &str, path: &Path) -> Result<()> {
    fs::write(path, raw).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_dir_is_keyed_by_video_id() {
        let dir = get_cache_dir("dQw4w9WgXcQ");
        assert!(dir.starts_with(get_root_cache_dir()));
        assert!(dir.ends_with("dQw4w9WgXcQ"));
    }

    #[test]
    fn insights_path_is_provider_and_lang_aware() {
        let dir = PathBuf::from("/cache/vid");
        let path = get_insights_path(&dir, &Provider::Openai, "en");
        assert_eq!(path, PathBuf::from("/cache/vid/insights_openai_en.json"));

        let other = get_insights_path(&dir, &Provider::Grok, "uk");
        assert_ne!(path, other);
    }

    #[tokio::test]
    async fn json_artifacts_round_trip() {
        let dir = std::env::temp_dir().join("tubelens-test-cache");
        fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("roundtrip.json");

        let value = vec!["a".to_string(), "b".to_string()];
        save_json(&value, &path).await.unwrap();
        let loaded: Vec<String> = load_json(&path).await.unwrap();
        assert_eq!(loaded, value);

        fs::remove_file(&path).await.unwrap();
    }
}
