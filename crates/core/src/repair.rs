use crate::types::AnalysisResult;

/// The tag-count contract: exactly this many tags after repair.
pub const TAG_COUNT: usize = 35;

/// Deterministic post-processing applied after every successful parse.
/// Idempotent; never re-orders already-valid data.
pub fn repair(result: &mut AnalysisResult) {
    repair_tags(&mut result.seo.tags);
}

/// Force the tag list to exactly [`TAG_COUNT`] entries: pad with synthetic
/// placeholders, or truncate keeping the earlier (higher-confidence) tags.
pub fn repair_tags(tags: &mut Vec<String>) {
    if tags.len() < TAG_COUNT {
        let missing = TAG_COUNT - tags.len();
        for i in 0..missing {
            tags.push(format!("extra_tag_{i}"));
        }
    } else {
        tags.truncate(TAG_COUNT);
    }
}

/// Cut a raw model response down to the outermost JSON object. Models wrap
/// output in markdown fences or lead with prose despite the JSON-only
/// instruction.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed).trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}
