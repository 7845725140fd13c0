//! # Tracker Client
//!
//! Batch creation for allocation, transitions, and the filtered reads the service and the
//! progression driver need.
use crate::model::{FoodTracker, OrderId, StallId, TrackerCreate, TrackerId, TrackerStatus};
use crate::tracker_actor::{TrackerAction, TrackerError};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the tracker actor.
#[derive(Clone)]
pub struct TrackerClient {
    inner: ResourceClient<FoodTracker>,
}

impl TrackerClient {
    pub fn new(inner: ResourceClient<FoodTracker>) -> Self {
        Self { inner }
    }

    /// Stores all trackers or none of them.
    #[instrument(skip(self, params), fields(count = params.len()))]
    pub async fn create_batch(&self, params: Vec<TrackerCreate>) -> Result<Vec<TrackerId>, TrackerError> {
        self.inner.create_batch(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn transition(&self, id: TrackerId, target: TrackerStatus) -> Result<FoodTracker, TrackerError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, TrackerAction::Transition(target))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn for_order(&self, order_id: OrderId) -> Result<Vec<FoodTracker>, TrackerError> {
        self.query(move |tracker| tracker.order_id == order_id).await
    }

    /// Trackers still waiting on the kitchen (`Queued` or `Preparing`).
    #[instrument(skip(self))]
    pub async fn active(&self) -> Result<Vec<FoodTracker>, TrackerError> {
        self.query(|tracker| tracker.status.is_active()).await
    }

    #[instrument(skip(self))]
    pub async fn for_stall(
        &self,
        stall_id: StallId,
        status: Option<TrackerStatus>,
    ) -> Result<Vec<FoodTracker>, TrackerError> {
        self.query(move |tracker| {
            tracker.stall_id == stall_id && status.map_or(true, |status| tracker.status == status)
        })
        .await
    }

    async fn query(
        &self,
        predicate: impl Fn(&FoodTracker) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<FoodTracker>, TrackerError> {
        self.inner
            .query(Filter::new(predicate))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<FoodTracker> for TrackerClient {
    type Error = TrackerError;

    fn inner(&self) -> &ResourceClient<FoodTracker> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<TrackerError>() {
            Ok(tracker_error) => tracker_error,
            Err(FrameworkError::NotFound(id)) => TrackerError::NotFound(id),
            Err(other) => TrackerError::StoreUnavailable(other.to_string()),
        }
    }
}
