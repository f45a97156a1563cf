use crate::backend::Backend;
use crate::types::VideoContext;

/// Appended to the transcript when it is cut to the backend budget, so the
/// model knows the text is incomplete.
pub const TRUNCATION_MARKER: &str = " ... (truncated)";

/// Assemble the textual context block sent to the model. Pure function of
/// its inputs; the transcript is hard-capped at the backend's budget.
pub fn build_context(video: &VideoContext, backend: Backend) -> String {
    let budget = backend.max_transcript_chars();
    let transcript = truncate_chars(&video.transcript_text, budget);

    format!(
        "Title: {}\nAuthor: {}\nPlatform: {}\nDuration: {} seconds\n\nTranscript Snippet:\n{}",
        video.title, video.author, video.platform, video.duration_seconds, transcript
    )
}

fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((byte_idx, _)) => {
            let mut cut = text[..byte_idx].to_string();
            cut.push_str(TRUNCATION_MARKER);
            cut
        }
        None => text.to_string(),
    }
}
