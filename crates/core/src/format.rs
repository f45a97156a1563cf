use crate::types::AnalysisResult;

/// Format seconds as MM:SS
pub fn format_timestamp(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format an analysis result as human-readable markdown
pub fn format_result_readable(result: &AnalysisResult) -> String {
    let mut output = String::new();

    output.push_str("# Content Analysis\n\n");
    output.push_str(&result.analysis);
    output.push_str("\n\n");

    output.push_str(&format!("## Tags ({})\n\n", result.seo.tags.len()));
    output.push_str(&result.seo.tags.join(", "));
    output.push_str("\n\n");

    output.push_str("## Description\n\n");
    output.push_str(&result.seo.description);
    output.push_str("\n\n");

    if !result.seo.timestamps.is_empty() {
        output.push_str("## Timestamps\n\n");
        for entry in &result.seo.timestamps {
            output.push_str(&format!("{} — {}\n", entry.time, entry.description));
        }
        output.push('\n');
    }

    output.push_str("## Title Ideas\n\n");
    for title in &result.seo.titles {
        output.push_str(&format!("{}. {} ({})\n", title.rank, title.title, title.reason));
    }
    output.push('\n');

    if !result.thumbnails.thumbnail_concepts.is_empty() {
        output.push_str("## Thumbnail Concepts\n\n");
        for (i, concept) in result.thumbnails.thumbnail_concepts.iter().enumerate() {
            output.push_str(&format!("### Concept {}\n\n", i + 1));
            output.push_str(&format!("Idea: {}\n", concept.concept));
            output.push_str(&format!("Text overlay: {}\n", concept.text_overlay));
            output.push_str(&format!("Colors: {}\n", concept.colors.join(" ")));
            output.push_str(&format!("Focal point: {}\n", concept.focal_point));
            output.push_str(&format!("Tone: {}\n", concept.tone));
            if !concept.composition.is_empty() {
                output.push_str(&format!("Composition: {}\n", concept.composition));
            }
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback;
    use crate::types::VideoContext;

    #[test]
    fn timestamps_format_as_mm_ss() {
        assert_eq!(format_timestamp(0), "00:00");
        assert_eq!(format_timestamp(90), "01:30");
        assert_eq!(format_timestamp(3661), "61:01");
    }

    #[test]
    fn readable_output_covers_every_section() {
        let video = VideoContext {
            title: "Intro to Rust".to_string(),
            author: "Jane".to_string(),
            platform: "YouTube".to_string(),
            duration_seconds: 600,
            transcript_text: String::new(),
        };
        let readable = format_result_readable(&fallback(&video, "English"));
        assert!(readable.contains("# Content Analysis"));
        assert!(readable.contains("## Tags (35)"));
        assert!(readable.contains("## Description"));
        assert!(readable.contains("00:00 — Introduction"));
        assert!(readable.contains("1. Intro to Rust (fallback title)"));
        assert!(readable.contains("### Concept 1"));
        assert!(readable.contains("Text overlay: WATCH THIS"));
    }
}
