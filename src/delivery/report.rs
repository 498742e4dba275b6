//! Markdown report sent alongside the image.

use super::types::Delivery;

/// Builds the markdown body for a delivery.
///
/// Notes are trimmed and the notes line is left out entirely when empty.
pub fn build_report(delivery: &Delivery) -> String {
    let title = delivery
        .context
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Unknown Page");

    let mut md = format!("**Screenshot from {}**\n\n", title);

    let notes = delivery.notes.trim();
    if !notes.is_empty() {
        md.push_str(&format!("**Notes:** {}\n\n", notes));
    }

    md.push_str("---\n**Context:**\n");
    md.push_str("| Field | Value |\n|-------|-------|\n");
    md.push_str(&format!(
        "| URL | {} |\n",
        delivery.context.url.as_deref().unwrap_or("Unknown")
    ));
    md.push_str(&format!(
        "| Image | {}x{} |\n",
        delivery.width, delivery.height
    ));
    md.push_str(&format!(
        "| Timestamp | {} |\n",
        delivery.created_at.to_rfc3339()
    ));

    md
}
