//! # Mock Clients
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of an actor. It lets a test run one real actor while the
//! actors it depends on are scripted, and it makes store failures easy to inject.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | scripted replies | real records |
//! | Error injection | `return_err(..)` | needs a specific state |
//! | Use case | logic around or between actors | the actor itself, full system |
//!
//! Expectations are consumed in order. A request that does not match the next expectation
//! panics the mock task, and the caller then sees `FrameworkError::ActorDropped`.
//!
//! ```rust,ignore
//! let mut menu = MockClient::<MenuItem>::new();
//! menu.expect_get(MenuItemId(1)).return_ok(Some(item));
//! menu.expect_action(MenuItemId(1)).return_err(FrameworkError::ActorClosed);
//!
//! let client = MenuClient::new(menu.client());
//! // ... exercise the code under test ...
//! menu.verify();
//! ```
//!
//! For tests that want to look at the request itself, [`create_mock_client`] returns the
//! raw receiver and [`expect_action`] pulls the next action off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Scripted reply for the next request.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    CreateBatch {
        response: Result<Vec<T::Id>, FrameworkError>,
    },
    Query {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<(Option<<T as ActorEntity>::Id>, Expectation<T>)>>>;

/// A mock client with expectation tracking.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let script = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = script.lock().unwrap().pop_front();
                let (expected_id, expectation) = match next {
                    Some(next) => next,
                    None => panic!("Unexpected request: no expectations left"),
                };

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Expectation::Get { response }) => {
                        check_id::<T>(expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Expectation::Create { response }) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::CreateBatch { respond_to, .. },
                        Expectation::CreateBatch { response },
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Query { respond_to, .. }, Expectation::Query { response }) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Expectation::Update { response },
                    ) => {
                        check_id::<T>(expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Expectation::Action { response },
                    ) => {
                        check_id::<T>(expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {:?}", kind(&request));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, id: Option<T::Id>, expectation: Expectation<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((id, expectation));
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, Some(id), |response| Expectation::Get { response })
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, None, |response| Expectation::Create { response })
    }

    /// Expects a `create_batch`.
    pub fn expect_create_batch(&mut self) -> ExpectationBuilder<'_, T, Vec<T::Id>> {
        ExpectationBuilder::new(self, None, |response| Expectation::CreateBatch { response })
    }

    /// Expects a `query` (any filter).
    pub fn expect_query(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, None, |response| Expectation::Query { response })
    }

    /// Expects an `update` for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Some(id), |response| Expectation::Update { response })
    }

    /// Expects an action on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, Some(id), |response| Expectation::Action { response })
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

fn check_id<T: ActorEntity>(expected: Option<T::Id>, actual: &T::Id) {
    if let Some(expected) = expected {
        assert_eq!(&expected, actual, "request addressed the wrong id");
    }
}

fn kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::CreateBatch { .. } => "CreateBatch",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::Query { .. } => "Query",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Action { .. } => "Action",
    }
}

/// Records the reply for one expected request.
pub struct ExpectationBuilder<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<'a, T: ActorEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> Self {
        Self { mock, id, wrap }
    }

    /// Replies with `value`.
    pub fn return_ok(self, value: R) {
        self.mock.push(self.id, (self.wrap)(Ok(value)));
    }

    /// Replies with `error`.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push(self.id, (self.wrap)(Err(error)));
    }
}

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Pulls the next request off `receiver` if it is an action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
