//! Delete confirmation.
//!
//! Both the one-shot `delete` command and the shell's `rm` funnel their
//! prompt answers through here, so the decision that gates the request is
//! testable without a terminal.

use shiori_application::Library;
use shiori_core::error::Result;

/// Returns true when the answer accepts the prompt (`y`/`yes`, any case).
pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Deletes the article only when the confirmation was affirmative.
///
/// Returns whether a delete was sent; a declined confirmation issues no
/// request at all.
pub(crate) async fn delete_if_confirmed(
    library: &Library,
    id: i64,
    confirmed: bool,
) -> Result<bool> {
    if !confirmed {
        return Ok(false);
    }
    library.delete(id).await?;
    Ok(true)
}
