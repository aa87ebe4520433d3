//! Common utilities

/// Longest stderr excerpt kept in a unit report
pub const MAX_MESSAGE_BYTES: usize = 2048;

/// Truncate string to max bytes, returning (truncated_string, was_truncated)
pub fn truncate_string(s: &str, max_bytes: usize) -> (String, bool) {
    if s.len() <= max_bytes {
        return (s.to_string(), false);
    }

    // Find a valid UTF-8 boundary
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    (s[..end].to_string(), true)
}

/// Shorten a diagnostic for inclusion in a report
pub fn clip_message(s: &str) -> String {
    let trimmed = s.trim();
    match truncate_string(trimmed, MAX_MESSAGE_BYTES) {
        (clipped, true) => format!("{}…", clipped),
        (whole, false) => whole,
    }
}

/// Check if a command is available in PATH
pub fn command_exists(cmd: &str) -> bool {
    std::process::Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
