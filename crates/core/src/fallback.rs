use crate::repair::TAG_COUNT;
use crate::types::{
    AnalysisResult, SeoBundle, ThumbnailConcept, ThumbnailSet, TimestampEntry, TitleCandidate,
    VideoContext,
};

/// Generic high-traffic vocabulary cycled to fill the tag quota in degraded
/// mode. Duplicates are allowed here; this is not the normal output contract.
const FALLBACK_TAG_POOL: [&str; 10] = [
    "youtube",
    "video",
    "content",
    "viral",
    "trending",
    "growth",
    "algorithm",
    "seo",
    "engagement",
    "audience",
];

/// Deterministic, schema-valid substitute result used when generation fails.
/// Pure: no network, no clock, no randomness; downstream consumers never
/// need a separate "no result" branch.
pub fn fallback(video: &VideoContext, language: &str) -> AnalysisResult {
    let tags = FALLBACK_TAG_POOL
        .iter()
        .cycle()
        .take(TAG_COUNT)
        .map(|tag| tag.to_string())
        .collect();

    AnalysisResult {
        analysis: format!(
            "SEO analysis in {language} is temporarily unavailable for \"{}\".",
            video.title
        ),
        seo: SeoBundle {
            tags,
            description: format!(
                "This is a video titled \"{}\". The full AI SEO optimization could not be \
                 generated this time; the essentials below keep the upload publishable.",
                video.title
            ),
            timestamps: vec![
                TimestampEntry {
                    time: "00:00".to_string(),
                    description: "Introduction".to_string(),
                },
                TimestampEntry {
                    time: "00:30".to_string(),
                    description: "Key content begins".to_string(),
                },
            ],
            titles: vec![TitleCandidate {
                rank: 1,
                title: video.title.clone(),
                reason: "fallback title".to_string(),
            }],
        },
        thumbnails: ThumbnailSet {
            thumbnail_concepts: vec![ThumbnailConcept {
                concept: "Bold contrast thumbnail".to_string(),
                text_overlay: "WATCH THIS".to_string(),
                colors: vec![
                    "#FF0000".to_string(),
                    "#FFFFFF".to_string(),
                    "#000000".to_string(),
                ],
                focal_point: "Center".to_string(),
                tone: "Bold".to_string(),
                composition: "Centered".to_string(),
            }],
        },
    }
}
