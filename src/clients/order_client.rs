//! # Order Client
//!
//! Placing an order runs allocation inside the order actor's `on_create` hook; this client
//! only sends the request and maps the outcome.
use crate::model::{Order, OrderCreate, OrderId, UserId};
use crate::order_actor::{OrderAction, OrderError, StatusChange};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(user_id = %params.user_id, lines = params.lines.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "place_order called");
        info!("Sending place_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Re-derives the order's status from its trackers.
    #[instrument(skip(self))]
    pub async fn recompute(&self, id: OrderId) -> Result<StatusChange, OrderError> {
        self.inner
            .perform_action(id, OrderAction::Recompute)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        self.inner
            .query(Filter::new(move |order: &Order| order.user_id == user_id))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(order_error) => order_error,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::StoreUnavailable(other.to_string()),
        }
    }
}
