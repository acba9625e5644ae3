/// Collapse every whitespace run in the extracted text to a single space.
///
/// Pure and total: empty or whitespace-only input normalizes to the empty
/// string, which callers must treat as "nothing to synthesize" rather than
/// an extraction failure. Idempotent, so re-normalizing cached text is safe.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
