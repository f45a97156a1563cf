use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata and transcript for one video, produced by the extractor and
/// consumed read-only by the pipeline. `transcript_text` is empty when no
/// transcript is available, never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoContext {
    pub title: String,
    pub author: String,
    pub platform: String,
    pub duration_seconds: u64,
    pub transcript_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampEntry {
    /// Navigation point in MM:SS format
    pub time: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleCandidate {
    /// 1 is the best candidate; ranks form a dense 1..N sequence
    pub rank: u32,
    pub title: String,
    pub reason: String,
}

/// A structured design brief for one candidate thumbnail, not the image itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailConcept {
    pub concept: String,
    pub text_overlay: String,
    /// Hex color strings, best first; 3 expected
    pub colors: Vec<String>,
    pub focal_point: String,
    pub tone: String,
    #[serde(default)]
    pub composition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoBundle {
    /// Exactly 35 after repair, no duplicates, no leading '#'
    pub tags: Vec<String>,
    pub description: String,
    pub timestamps: Vec<TimestampEntry>,
    pub titles: Vec<TitleCandidate>,
}

/// Wrapper around the thumbnail concept list.
///
/// Models routinely return this field as a bare array, as null, or as an
/// object missing the `thumbnail_concepts` key; deserialization absorbs all
/// three shapes. Malformed concept objects still fail the parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThumbnailSet {
    pub thumbnail_concepts: Vec<ThumbnailConcept>,
}

impl<'de> Deserialize<'de> for ThumbnailSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let thumbnail_concepts = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => serde_json::from_value(Value::Array(items))
                .map_err(de::Error::custom)?,
            Value::Object(mut map) => match map.remove("thumbnail_concepts") {
                None | Some(Value::Null) => Vec::new(),
                Some(inner) => serde_json::from_value(inner).map_err(de::Error::custom)?,
            },
            other => {
                return Err(de::Error::custom(format!(
                    "expected thumbnails object or list, got {other}"
                )));
            }
        };
        Ok(ThumbnailSet { thumbnail_concepts })
    }
}

/// The pipeline's output. Constructed exactly once per invocation, either by
/// the generation engine (possibly repaired) or by the fallback generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: String,
    pub seo: SeoBundle,
    #[serde(default)]
    pub thumbnails: ThumbnailSet,
}

/// Parse an "MM:SS" timestamp into (minutes, seconds).
pub fn parse_mm_ss(time: &str) -> Option<(u32, u32)> {
    let (mins, secs) = time.split_once(':')?;
    if mins.is_empty() || secs.len() != 2 {
        return None;
    }
    let mins: u32 = mins.parse().ok()?;
    let secs: u32 = secs.parse().ok()?;
    (secs < 60).then_some((mins, secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn concept_json(name: &str) -> Value {
        json!({
            "concept": name,
            "text_overlay": "WATCH",
            "colors": ["#FF0000", "#FFFFFF", "#000000"],
            "focal_point": "Center",
            "tone": "Bold",
            "composition": "Centered"
        })
    }

    fn result_json(thumbnails: Value) -> Value {
        json!({
            "analysis": "solid video",
            "seo": {
                "tags": ["rust"],
                "description": "desc",
                "timestamps": [{"time": "00:00", "description": "Intro"}],
                "titles": [{"rank": 1, "title": "T", "reason": "R"}]
            },
            "thumbnails": thumbnails
        })
    }

    #[test]
    fn bare_list_thumbnails_are_rewrapped_in_order() {
        let raw = result_json(json!([
            concept_json("a"),
            concept_json("b"),
            concept_json("c")
        ]));
        let parsed: AnalysisResult = serde_json::from_value(raw).unwrap();
        let names: Vec<_> = parsed
            .thumbnails
            .thumbnail_concepts
            .iter()
            .map(|c| c.concept.as_str())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn wrapped_thumbnails_parse_unchanged() {
        let raw = result_json(json!({"thumbnail_concepts": [concept_json("a")]}));
        let parsed: AnalysisResult = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.thumbnails.thumbnail_concepts.len(), 1);
        assert_eq!(parsed.thumbnails.thumbnail_concepts[0].concept, "a");
    }

    #[test]
    fn null_absent_or_keyless_thumbnails_become_empty() {
        for raw in [
            result_json(Value::Null),
            result_json(json!({})),
            result_json(json!({"style": "bold"})),
        ] {
            let parsed: AnalysisResult = serde_json::from_value(raw).unwrap();
            assert!(parsed.thumbnails.thumbnail_concepts.is_empty());
        }

        let mut no_field = result_json(Value::Null);
        no_field.as_object_mut().unwrap().remove("thumbnails");
        let parsed: AnalysisResult = serde_json::from_value(no_field).unwrap();
        assert!(parsed.thumbnails.thumbnail_concepts.is_empty());
    }

    #[test]
    fn malformed_concept_is_a_parse_error() {
        let raw = result_json(json!([{"concept": "missing everything else"}]));
        assert!(serde_json::from_value::<AnalysisResult>(raw).is_err());
    }

    #[test]
    fn missing_composition_defaults_to_empty() {
        let mut concept = concept_json("a");
        concept.as_object_mut().unwrap().remove("composition");
        let parsed: ThumbnailConcept = serde_json::from_value(concept).unwrap();
        assert_eq!(parsed.composition, "");
    }

    #[test]
    fn mm_ss_parsing() {
        assert_eq!(parse_mm_ss("00:00"), Some((0, 0)));
        assert_eq!(parse_mm_ss("12:34"), Some((12, 34)));
        assert_eq!(parse_mm_ss("120:59"), Some((120, 59)));
        assert_eq!(parse_mm_ss("12:60"), None);
        assert_eq!(parse_mm_ss("12:5"), None);
        assert_eq!(parse_mm_ss("-1:05"), None);
        assert_eq!(parse_mm_ss("1234"), None);
        assert_eq!(parse_mm_ss(""), None);
    }
}
