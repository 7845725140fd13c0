//! Custom actions for the menu actor.
//!
//! Every action answers with the item's [`MenuItemProfile`](crate::model::MenuItemProfile);
//! what that snapshot means depends on the action.

#[derive(Debug, Clone, PartialEq)]
pub enum MenuItemAction {
    /// Reads the current profile without changing it.
    Profile,
    /// Adds `n` units to the queue. Answers with the profile as it was *before* the increment.
    ReserveQueue(u32),
    /// Moves the queue by `delta`, clamped at zero. Answers with the profile afterwards.
    AdjustQueueDepth(i64),
}
