//! # Generic Actor Server
//!
//! The `ResourceActor` owns every record of one entity type and processes requests one at a
//! time. Whatever a hook does between reading a record and writing it back happens while no
//! other request for that entity type can run, which is what makes a read-modify-write on a
//! record atomic.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// This is the server half: it owns the `store` and the receiving end of the channel.
/// Because requests are handled sequentially inside one task, the store needs no lock.
///
/// # Usage Pattern
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<MenuItem>::new(32);
/// let handle = tokio::spawn(actor.run(()));
/// let id = client.create(params).await?;
/// drop(client);        // closing every client stops the loop
/// handle.await?;
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the channel capacity; when it is full, client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn allocate_id(&mut self) -> T::Id {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;
        id
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// The `context` is handed to every hook of every record this actor owns.
    pub async fn run(mut self, context: T::Context) {
        // "Order" rather than "stall_tracker::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.allocate_id();
                    match Self::build(id.clone(), params, &context).await {
                        Ok(item) => {
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::CreateBatch { params, respond_to } => {
                    debug!(entity_type, count = params.len(), "CreateBatch");
                    self.create_batch(entity_type, params, &context, respond_to)
                        .await;
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items = self.query(&filter);
                    debug!(entity_type, matched = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        // Work on a copy so a failed hook leaves the stored record untouched
                        let mut draft = item.clone();
                        if let Err(e) = draft.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        *item = draft;
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let mut draft = item.clone();
                        let result = draft
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => {
                                *item = draft;
                                info!(entity_type, %id, "Action ok");
                            }
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn build(id: T::Id, params: T::Create, context: &T::Context) -> Result<T, T::Error> {
        let mut item = T::from_create_params(id, params)?;
        item.on_create(context).await?;
        Ok(item)
    }

    async fn create_batch(
        &mut self,
        entity_type: &str,
        params: Vec<T::Create>,
        context: &T::Context,
        respond_to: Response<Vec<T::Id>>,
    ) {
        let mut staged = Vec::with_capacity(params.len());
        for p in params {
            let id = self.allocate_id();
            match Self::build(id.clone(), p, context).await {
                Ok(item) => staged.push((id, item)),
                Err(e) => {
                    warn!(entity_type, %id, error = %e, staged = staged.len(), "CreateBatch failed, nothing stored");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
            }
        }

        let ids: Vec<T::Id> = staged.iter().map(|(id, _)| id.clone()).collect();
        self.store.extend(staged);
        info!(entity_type, created = ids.len(), size = self.store.len(), "Created batch");
        let _ = respond_to.send(Ok(ids));
    }

    fn query(&self, filter: &Filter<T>) -> Vec<T> {
        self.store
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }
}
