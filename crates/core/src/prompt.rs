//! Edit-instruction text for the image provider.
//!
//! The provider is an *editing* API: the instruction must make it
//! restyle the supplied photo rather than synthesize a new room, and it
//! must keep the original camera framing so before/after images line up
//! in the UI.

use crate::plan::BudgetTier;

/// Build the single directive sent with the generation request.
pub fn edit_instruction(
    room_type: &str,
    style: &str,
    budget: &str,
    target_appearance: &str,
) -> String {
    let tier = BudgetTier::from_text(budget);
    format!(
        "Renovate this {room} photo in {style} style on a {tier} budget. \
         Target appearance: {target} \
         Edit the provided photo in place: keep the original camera angle, \
         framing, window positions, and room geometry exactly as they are. \
         Change only surfaces, fixtures, and furnishings. Do not generate \
         a different room.",
        room = room_type.trim(),
        style = style.trim(),
        tier = tier.label(),
        target = target_appearance.trim(),
    )
}

/// Composite cache key for instruction memoization.
pub fn cache_key(room_type: &str, style: &str, budget: &str) -> String {
    format!("{}|{}|{}", room_type.trim(), style.trim(), budget.trim())
}
