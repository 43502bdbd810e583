// Message sanitization before text from an upstream service is echoed to a caller

/// Upper bound, in characters, for a message returned to a client
pub const MAX_CLIENT_MESSAGE_CHARS: usize = 512;

/// Collapse whitespace and bound the length of `message`.
///
/// Returns `fallback` when nothing printable is left, so error bodies never
/// carry an empty message.
pub fn sanitize_message(message: &str, fallback: &str) -> String {
    let collapsed = message
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.is_empty() {
        return fallback.to_string();
    }

    if collapsed.chars().count() <= MAX_CLIENT_MESSAGE_CHARS {
        return collapsed;
    }

    let mut truncated: String = collapsed.chars().take(MAX_CLIENT_MESSAGE_CHARS).collect();
    truncated.push_str("...");
    truncated
}
