use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, FrameworkError};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use stall_tracker::clients::{MenuClient, OrderClient, TrackerClient};
use stall_tracker::clock::ManualClock;
use stall_tracker::events::{ChannelSink, TrackingEvent};
use stall_tracker::model::{
    FoodTracker, LineItemId, MenuItem, MenuItemId, OrderCreate, OrderId, OrderLine, OrderStatus,
    StallId, TrackerCreate, TrackerId, TrackerStatus, UserId,
};
use stall_tracker::order_actor::{OrderContext, OrderError, StatusChange};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

// Real order actor, scripted menu and tracker actors.

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn roti(queue_depth: u32) -> MenuItem {
    MenuItem {
        id: MenuItemId(1),
        stall_id: StallId(4),
        name: "Roti Canai".into(),
        price: Decimal::new(250, 2),
        base_prep_minutes: 4,
        complexity_multiplier: 1.0,
        queue_depth,
    }
}

fn tracker(id: u32, status: TrackerStatus) -> FoodTracker {
    let mut tracker = FoodTracker::new(
        TrackerId(id),
        TrackerCreate {
            order_id: OrderId(1),
            line_item_id: LineItemId(1),
            menu_item_id: MenuItemId(1),
            stall_id: StallId(4),
            item_name: "Roti Canai".into(),
            unit_index: id,
            queue_position: id,
            prep_duration_minutes: 4,
            estimated_ready_at: noon(),
            created_at: noon(),
        },
    );
    tracker.status = status;
    tracker
}

struct Fixture {
    menu: MockClient<MenuItem>,
    trackers: MockClient<FoodTracker>,
    orders: OrderClient,
    events: UnboundedReceiver<TrackingEvent>,
    handle: JoinHandle<()>,
}

/// Spawns the order actor; expectations must be queued on the mocks before the first call.
fn spawn_order_actor() -> Fixture {
    let menu = MockClient::<MenuItem>::new();
    let trackers = MockClient::<FoodTracker>::new();
    let (sink, events) = ChannelSink::new();

    let (actor, client) = stall_tracker::order_actor::new(8);
    let handle = tokio::spawn(actor.run(OrderContext {
        menu: MenuClient::new(menu.client()),
        trackers: TrackerClient::new(trackers.client()),
        sink: Arc::new(sink),
        clock: Arc::new(ManualClock::new(noon())),
        service_fee: Decimal::new(150, 2),
    }));

    Fixture {
        menu,
        trackers,
        orders: OrderClient::new(client),
        events,
        handle,
    }
}

fn two_rotis() -> OrderCreate {
    OrderCreate {
        user_id: UserId(1),
        lines: vec![OrderLine::new(MenuItemId(1), 2)],
    }
}

#[tokio::test]
async fn test_order_actor_with_mocked_dependencies() {
    let mut f = spawn_order_actor();

    // Order::on_create reads the item, reserves its queue, then stores the trackers
    f.menu.expect_get(MenuItemId(1)).return_ok(Some(roti(2)));
    f.menu.expect_action(MenuItemId(1)).return_ok(roti(2).profile());
    f.trackers
        .expect_create_batch()
        .return_ok(vec![TrackerId(10), TrackerId(11)]);

    let order_id = f.orders.place_order(two_rotis()).await.unwrap();
    let order = f.orders.get(order_id).await.unwrap().unwrap();

    assert_eq!(order.tracker_ids, vec![TrackerId(10), TrackerId(11)]);
    assert_eq!(order.status, OrderStatus::Accepted);
    assert_eq!(order.subtotal, Decimal::new(500, 2));
    assert_eq!(order.total_amount, Decimal::new(650, 2));
    assert_eq!(order.line_items[0].stall_id, StallId(4));
    // prep = 4 + 2 * 2 = 8, last unit at position 4: 8 + 8
    assert_eq!(order.estimated_completion_at, Some(noon() + Duration::minutes(16)));

    assert!(matches!(
        f.events.try_recv(),
        Ok(TrackingEvent::OrderConfirmed { order_id: confirmed, .. }) if confirmed == order_id
    ));

    f.menu.verify();
    f.trackers.verify();

    drop(f.orders);
    f.handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_tracker_batch_releases_reservation() {
    let mut f = spawn_order_actor();

    f.menu.expect_get(MenuItemId(1)).return_ok(Some(roti(0)));
    f.menu.expect_action(MenuItemId(1)).return_ok(roti(0).profile());
    f.trackers
        .expect_create_batch()
        .return_err(FrameworkError::ActorClosed);
    // Rollback of the reservation
    f.menu.expect_action(MenuItemId(1)).return_ok(roti(0).profile());

    let err = f.orders.place_order(two_rotis()).await.unwrap_err();
    assert!(matches!(err, OrderError::StoreUnavailable(_)), "{err}");

    assert!(f.orders.list().await.unwrap().is_empty());
    assert!(f.events.try_recv().is_err());
    f.menu.verify();
    f.trackers.verify();
}

#[tokio::test]
async fn test_unreachable_menu_stores_nothing() {
    let mut f = spawn_order_actor();

    f.menu
        .expect_get(MenuItemId(1))
        .return_err(FrameworkError::ActorDropped);

    let err = f.orders.place_order(two_rotis()).await.unwrap_err();
    assert!(matches!(err, OrderError::StoreUnavailable(_)));
    assert!(f.orders.list().await.unwrap().is_empty());
    f.menu.verify();
}

#[tokio::test]
async fn test_recompute_writes_only_on_change() {
    let mut f = spawn_order_actor();

    f.menu.expect_get(MenuItemId(1)).return_ok(Some(roti(0)));
    f.menu.expect_action(MenuItemId(1)).return_ok(roti(0).profile());
    f.trackers
        .expect_create_batch()
        .return_ok(vec![TrackerId(1), TrackerId(2)]);
    let order_id = f.orders.place_order(two_rotis()).await.unwrap();

    let snapshot = vec![
        tracker(1, TrackerStatus::Ready),
        tracker(2, TrackerStatus::Queued),
    ];
    f.trackers.expect_query().return_ok(snapshot.clone());
    f.trackers.expect_query().return_ok(snapshot);

    let first = f.orders.recompute(order_id).await.unwrap();
    assert_eq!(
        first,
        StatusChange {
            status: OrderStatus::PartiallyReady,
            changed: true,
        }
    );
    let stamped = f.orders.get(order_id).await.unwrap().unwrap().updated_at;
    assert!(stamped.is_some());

    let second = f.orders.recompute(order_id).await.unwrap();
    assert!(!second.changed);
    assert_eq!(f.orders.get(order_id).await.unwrap().unwrap().updated_at, stamped);

    f.trackers.verify();
}

#[tokio::test]
async fn test_recompute_keeps_status_when_trackers_unreachable() {
    let mut f = spawn_order_actor();

    f.menu.expect_get(MenuItemId(1)).return_ok(Some(roti(0)));
    f.menu.expect_action(MenuItemId(1)).return_ok(roti(0).profile());
    f.trackers
        .expect_create_batch()
        .return_ok(vec![TrackerId(1), TrackerId(2)]);
    let order_id = f.orders.place_order(two_rotis()).await.unwrap();

    f.trackers
        .expect_query()
        .return_err(FrameworkError::ActorClosed);
    let err = f.orders.recompute(order_id).await.unwrap_err();
    assert!(matches!(err, OrderError::StoreUnavailable(_)));

    let order = f.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Accepted);
    assert_eq!(order.updated_at, None);
}

#[tokio::test]
async fn test_recompute_unknown_order() {
    let f = spawn_order_actor();
    let err = f.orders.recompute(OrderId(77)).await.unwrap_err();
    assert_eq!(err, OrderError::NotFound("order_77".into()));
}

#[tokio::test]
async fn test_out_of_range_total_rolls_back_and_keeps_actor_alive() {
    let mut f = spawn_order_actor();

    // Prices are capped at creation; a record outside the cap must still not take the actor down
    let mut gold = roti(0);
    gold.price = Decimal::MAX;
    f.menu.expect_get(MenuItemId(1)).return_ok(Some(gold.clone()));
    f.menu.expect_action(MenuItemId(1)).return_ok(gold.profile());
    // Rollback of the reservation
    f.menu.expect_action(MenuItemId(1)).return_ok(gold.profile());

    let err = f.orders.place_order(two_rotis()).await.unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)), "{err}");
    f.menu.verify();
    f.trackers.verify();

    // The actor still serves requests
    f.menu.expect_get(MenuItemId(1)).return_ok(Some(roti(0)));
    f.menu.expect_action(MenuItemId(1)).return_ok(roti(0).profile());
    f.trackers
        .expect_create_batch()
        .return_ok(vec![TrackerId(1), TrackerId(2)]);
    let order_id = f.orders.place_order(two_rotis()).await.unwrap();
    assert_eq!(f.orders.list().await.unwrap().len(), 1);
    assert_eq!(
        f.orders.get(order_id).await.unwrap().unwrap().total_amount,
        Decimal::new(650, 2)
    );
    f.menu.verify();
    f.trackers.verify();
}
