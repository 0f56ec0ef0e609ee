/// Pure functions for formatting console feedback messages

/// Format a success message with emoji
pub fn format_success(message: &str) -> String {
    format!("✅ {}", message)
}

/// Format an error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format an info message with emoji
pub fn format_info(message: &str) -> String {
    format!("ℹ️ {}", message)
}
