//! Markdown code-fence stripping for model responses.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

/// Returns the payload inside a leading markdown code fence, or the trimmed
/// input when there is no fence.
///
/// A fence with a language tag (```` ```json ````) and an unterminated fence
/// are both accepted. Text outside the fence is discarded.
#[must_use]
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !(trimmed.starts_with("```") || trimmed.starts_with("~~~")) {
        return trimmed.to_owned();
    }

    fenced_block(trimmed).unwrap_or_else(|| strip_fence_markers(trimmed).to_owned())
}

fn fenced_block(text: &str) -> Option<String> {
    let mut inside = false;
    let mut body = String::new();
    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => inside = true,
            Event::Text(chunk) if inside => body.push_str(&chunk),
            Event::End(TagEnd::CodeBlock) if inside => return Some(body.trim().to_owned()),
            _ => {}
        }
    }
    inside.then(|| body.trim().to_owned())
}

// Single-line fences such as ```json{...}``` are not code blocks to a
// CommonMark parser (the info string may not contain backticks).
fn strip_fence_markers(text: &str) -> &str {
    let body = text.trim_start_matches('`');
    let body = body.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    body.trim_end().trim_end_matches('`').trim()
}
