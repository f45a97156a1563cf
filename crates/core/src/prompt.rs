/// Machine-written serialization instructions derived from the output schema.
/// Embedded in the system prompt so the model's JSON matches the parse shape.
pub fn format_instructions() -> String {
    r##"The output must be a single JSON instance that conforms exactly to the shape below. Every key is required unless noted. Do not add keys, comments or surrounding text.

{
  "analysis": "string - deep content analysis",
  "seo": {
    "tags": ["string - exactly 35 entries"],
    "description": "string - 350 to 500 words",
    "timestamps": [{"time": "MM:SS", "description": "string"}],
    "titles": [{"rank": 1, "title": "string", "reason": "string"}]
  },
  "thumbnails": {
    "thumbnail_concepts": [
      {
        "concept": "string",
        "text_overlay": "string",
        "colors": ["#RRGGBB", "#RRGGBB", "#RRGGBB"],
        "focal_point": "string",
        "tone": "string",
        "composition": "string"
      }
    ]
  }
}"##
    .to_string()
}

/// Instruction document for the model: task rules, count and length
/// constraints, language override and the schema serialization instructions.
pub fn system_prompt(language: &str) -> String {
    format!(
        r#"You are an elite YouTube SEO strategist and growth expert. Analyze the provided video and produce the best SEO optimization plan.

Write ALL generated text (analysis, tags, description, timestamps, titles, thumbnail concepts) in {language}.

REQUIREMENTS:

1. ANALYSIS
- Deep insight on audience intent, tone, value proposition and engagement potential.

2. TAGS
- EXACTLY 35 SEO tags.
- No duplicates. No hashtags.
- Short, powerful, high search intent.

3. DESCRIPTION
- 350 to 500 words.
- Hook in the first line.
- Keyword rich, engaging tone, call to action included.

4. TIMESTAMPS
- Helpful navigation points in MM:SS format.

5. TITLES
- EXACTLY 5 high-CTR titles, ranked best first, each with a brief reason.

6. THUMBNAILS
- EXACTLY 3 thumbnail concepts, each with concept, text_overlay, 3 hex color codes, focal_point, tone and composition.

Return ONLY valid JSON. No markdown. No explanations.

{format_instructions}"#,
        language = language,
        format_instructions = format_instructions()
    )
}

pub fn user_prompt(context_block: &str) -> String {
    format!("VIDEO DATA:\n{context_block}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_encodes_the_hard_constraints() {
        let prompt = system_prompt("Spanish");
        assert!(prompt.contains("Spanish"));
        assert!(prompt.contains("EXACTLY 35 SEO tags"));
        assert!(prompt.contains("No duplicates. No hashtags."));
        assert!(prompt.contains("350 to 500 words"));
        assert!(prompt.contains("EXACTLY 5 high-CTR titles"));
        assert!(prompt.contains("EXACTLY 3 thumbnail concepts"));
        assert!(prompt.contains("ONLY valid JSON"));
    }

    #[test]
    fn format_instructions_cover_every_schema_field() {
        let instructions = format_instructions();
        for field in [
            "analysis",
            "tags",
            "description",
            "timestamps",
            "titles",
            "rank",
            "reason",
            "thumbnail_concepts",
            "text_overlay",
            "colors",
            "focal_point",
            "tone",
            "composition",
        ] {
            assert!(instructions.contains(field), "missing field: {field}");
        }
    }

    #[test]
    fn format_instructions_describe_valid_json() {
        let instructions = format_instructions();
        let start = instructions.find('{').unwrap();
        let end = instructions.rfind('}').unwrap();
        let schema: serde_json::Value =
            serde_json::from_str(&instructions[start..=end]).unwrap();
        assert!(schema.get("seo").is_some());

        // the hex color placeholders must survive into the schema text
        let colors = &schema["thumbnails"]["thumbnail_concepts"][0]["colors"];
        assert_eq!(colors[0], "#RRGGBB");
        assert!(instructions.contains("\"#RRGGBB\""));
    }
}
