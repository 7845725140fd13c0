//! # Menu Client
//!
//! Catalog edits plus the queue-counter actions used by allocation and readiness.
use crate::menu_actor::{MenuError, MenuItemAction};
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemProfile, MenuItemUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_menu_item(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        debug!(?params, "create_menu_item called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Current estimator inputs for the item.
    #[instrument(skip(self))]
    pub async fn profile(&self, id: MenuItemId) -> Result<MenuItemProfile, MenuError> {
        self.inner
            .perform_action(id, MenuItemAction::Profile)
            .await
            .map_err(Self::map_error)
    }

    /// Adds `units` to the item's queue and returns the profile from before the increment.
    #[instrument(skip(self))]
    pub async fn reserve_queue(&self, id: MenuItemId, units: u32) -> Result<MenuItemProfile, MenuError> {
        debug!("Reserving {} queue slots", units);
        self.inner
            .perform_action(id, MenuItemAction::ReserveQueue(units))
            .await
            .map_err(Self::map_error)
    }

    /// Moves the item's queue by `delta` (never below zero) and returns the new profile.
    #[instrument(skip(self))]
    pub async fn adjust_queue_depth(&self, id: MenuItemId, delta: i64) -> Result<MenuItemProfile, MenuError> {
        self.inner
            .perform_action(id, MenuItemAction::AdjustQueueDepth(delta))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<MenuError>() {
            Ok(menu_error) => menu_error,
            Err(FrameworkError::NotFound(id)) => MenuError::NotFound(id),
            Err(other) => MenuError::StoreUnavailable(other.to_string()),
        }
    }
}
