//! Preparation-time estimates.
//!
//! `minutes = max(3, floor(base * complexity + 2 * queue_depth))`

use crate::model::menu_item::clamp_multiplier;
use crate::model::MenuItemProfile;
use tracing::warn;

/// No estimate is ever shorter than this.
pub const MIN_PREP_MINUTES: u32 = 3;

/// Minutes added for every unit already waiting on the same preparation line.
pub const QUEUE_PENALTY_MINUTES: u32 = 2;

/// Estimates how long one more unit of the item will take, given its current queue.
pub fn estimate(profile: &MenuItemProfile) -> u32 {
    let intrinsic =
        f64::from(profile.base_prep_minutes) * clamp_multiplier(profile.complexity_multiplier);
    let contention = f64::from(profile.queue_depth) * f64::from(QUEUE_PENALTY_MINUTES);
    // Float-to-int casts saturate, so an absurd multiplier cannot wrap.
    let minutes = (intrinsic + contention).floor() as u32;
    minutes.max(MIN_PREP_MINUTES)
}

/// Like [`estimate`], but falls back to `default_minutes` when the profile is missing.
pub fn estimate_or_default(profile: Option<&MenuItemProfile>, default_minutes: u32) -> u32 {
    match profile {
        Some(profile) => estimate(profile),
        None => {
            warn!(default_minutes, "No menu item profile, using default prep time");
            default_minutes
        }
    }
}
