use serde_json::Value;
use tokio::process::Command;

use crate::error::{Result, SeoError};
use crate::types::VideoContext;

/// Identify the platform from the URL host.
pub fn platform_for_url(url: &str) -> &'static str {
    let url = url.to_lowercase();
    if url.contains("youtube.com") || url.contains("youtu.be") {
        "YouTube"
    } else if url.contains("instagram.com") {
        "Instagram"
    } else if url.contains("linkedin.com") {
        "LinkedIn"
    } else if url.contains("facebook.com") {
        "Facebook"
    } else if url.contains("tiktok.com") {
        "TikTok"
    } else {
        "Unknown"
    }
}

/// Pull the video id out of a YouTube URL (watch, short-link, shorts, embed
/// and legacy /v/ forms).
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    for marker in ["youtu.be/", "/shorts/", "/embed/", "/v/", "/e/"] {
        if let Some(pos) = url.find(marker) {
            return clean_id(&url[pos + marker.len()..]);
        }
    }

    // watch?v= or a later &v= parameter
    let mut search_from = 0;
    while let Some(rel) = url[search_from..].find("v=") {
        let pos = search_from + rel;
        if matches!(url[..pos].chars().last(), Some('?') | Some('&')) {
            return clean_id(&url[pos + 2..]);
        }
        search_from = pos + 2;
    }
    None
}

fn clean_id(s: &str) -> Option<String> {
    let id: String = s
        .chars()
        .take_while(|c| !matches!(c, '&' | '?' | '#' | '/'))
        .collect();
    (!id.is_empty()).then_some(id)
}

/// Fetch metadata and transcript for a video URL using yt-dlp.
///
/// The transcript is best-effort: any failure yields an empty string, never
/// an error. An empty or unparseable URL is the one input the pipeline does
/// not self-heal.
pub async fn extract_metadata(url: &str) -> Result<VideoContext> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SeoError::InvalidInput {
            reason: "empty video URL".to_string(),
        });
    }

    let platform = platform_for_url(url);
    if platform != "YouTube" {
        // Other platforms get a generic record; transcripts are only
        // fetched for YouTube.
        return Ok(VideoContext {
            title: format!("Video on {platform}"),
            author: "Unknown".to_string(),
            platform: platform.to_string(),
            duration_seconds: 0,
            transcript_text: String::new(),
        });
    }

    if extract_video_id(url).is_none() {
        return Err(SeoError::InvalidInput {
            reason: format!("could not parse a video id from {url}"),
        });
    }

    let output = Command::new("yt-dlp")
        .arg(url)
        .arg("--dump-json")
        .arg("--skip-download")
        .output()
        .await?;

    if !output.status.success() {
        return Err(SeoError::MetadataFailed {
            url: url.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let info: Value =
        serde_json::from_slice(&output.stdout).map_err(|err| SeoError::MetadataFailed {
            url: url.to_string(),
            reason: err.to_string(),
        })?;

    let transcript_text = fetch_auto_captions(&info).await.unwrap_or_default();

    Ok(VideoContext {
        title: info["title"].as_str().unwrap_or("Untitled Video").to_string(),
        author: info["uploader"]
            .as_str()
            .or_else(|| info["channel"].as_str())
            .unwrap_or("Unknown")
            .to_string(),
        platform: platform.to_string(),
        duration_seconds: info["duration"].as_u64().unwrap_or(0),
        transcript_text,
    })
}

/// Download English auto-captions advertised in the yt-dlp dump and join
/// them into plain text.
async fn fetch_auto_captions(info: &Value) -> Option<String> {
    let tracks = info
        .get("automatic_captions")
        .filter(|t| t.is_object())
        .or_else(|| info.get("subtitles"))?;

    let track = ["en", "en-US", "en-IN", "en-orig"]
        .iter()
        .find_map(|lang| tracks.get(lang))
        .and_then(Value::as_array)?;

    let format = track
        .iter()
        .find(|t| t["ext"] == "json3")
        .or_else(|| track.first())?;
    let url = format.get("url")?.as_str()?;

    let body = reqwest::get(url).await.ok()?.text().await.ok()?;
    let captions: Value = serde_json::from_str(&body).ok()?;

    let mut text = String::new();
    for event in captions.get("events")?.as_array()? {
        let Some(segs) = event.get("segs").and_then(Value::as_array) else {
            continue;
        };
        for seg in segs {
            if let Some(chunk) = seg.get("utf8").and_then(Value::as_str) {
                text.push_str(chunk);
                text.push(' ');
            }
        }
    }

    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}
