//! ActorEntity implementation for [`MenuItem`].

use super::actions::MenuItemAction;
use super::error::MenuError;
use crate::model::menu_item::clamp_multiplier;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemProfile, MenuItemUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;

fn validate_name(name: &str) -> Result<String, MenuError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MenuError::Validation("name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Highest accepted unit price, 100 000.00.
pub const MAX_PRICE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 2);

fn validate_price(price: Decimal) -> Result<Decimal, MenuError> {
    if price.is_sign_negative() {
        return Err(MenuError::Validation(format!("price must not be negative: {price}")));
    }
    if price > MAX_PRICE {
        return Err(MenuError::Validation(format!(
            "price {price} exceeds the maximum of {MAX_PRICE}"
        )));
    }
    Ok(price)
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = MenuItemAction;
    type ActionResult = MenuItemProfile;
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            stall_id: params.stall_id,
            name: validate_name(&params.name)?,
            price: validate_price(params.price)?,
            base_prep_minutes: params.base_prep_minutes,
            complexity_multiplier: clamp_multiplier(params.complexity_multiplier),
            queue_depth: 0,
        })
    }

    /// Applies owner edits. `queue_depth` is not reachable from here.
    async fn on_update(&mut self, update: MenuItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = validate_name(&name)?;
        }
        if let Some(price) = update.price {
            self.price = validate_price(price)?;
        }
        if let Some(minutes) = update.base_prep_minutes {
            self.base_prep_minutes = minutes;
        }
        if let Some(multiplier) = update.complexity_multiplier {
            self.complexity_multiplier = clamp_multiplier(multiplier);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: MenuItemAction,
        _ctx: &(),
    ) -> Result<MenuItemProfile, Self::Error> {
        match action {
            MenuItemAction::Profile => Ok(self.profile()),
            MenuItemAction::ReserveQueue(units) => {
                let before = self.profile();
                self.queue_depth = self.queue_depth.saturating_add(units);
                Ok(before)
            }
            MenuItemAction::AdjustQueueDepth(delta) => {
                let adjusted = (i64::from(self.queue_depth) + delta).clamp(0, i64::from(u32::MAX));
                self.queue_depth = u32::try_from(adjusted).unwrap_or(u32::MAX);
                Ok(self.profile())
            }
        }
    }
}
