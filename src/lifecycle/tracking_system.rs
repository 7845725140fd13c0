use super::SystemError;
use crate::clients::{MenuClient, OrderClient, TrackerClient};
use crate::clock::Clock;
use crate::config::TrackerConfig;
use crate::driver::ProgressionDriver;
use crate::events::NotificationSink;
use crate::order_actor::OrderContext;
use crate::tracker_actor::TrackerContext;
use crate::tracking::TrackingService;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Starts and stops the actors behind the tracking engine.
///
/// Three resource actors are spawned, each in its own task:
/// - **Menu**: menu items and their queue counters (no dependencies)
/// - **Tracker**: food trackers; releases queue slots through the menu client
/// - **Order**: orders; allocates through the menu and tracker clients
///
/// ```ignore
/// let system = TrackingSystem::new(TrackerConfig::from_env(), Arc::new(SystemClock), Arc::new(LogSink));
/// let order = system.service.place_order(params).await?;
///
/// let shutdown = CancellationToken::new();
/// let driver = tokio::spawn(system.driver(shutdown.clone()).run());
/// // ...
/// shutdown.cancel();
/// driver.await?;
/// system.shutdown().await?;
/// ```
pub struct TrackingSystem {
    pub menu: MenuClient,
    pub trackers: TrackerClient,
    pub orders: OrderClient,
    pub service: TrackingService,
    config: TrackerConfig,
    clock: Arc<dyn Clock>,
    /// In shutdown order: each actor's context holds clients of the ones after it.
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl TrackingSystem {
    /// Spawns the actors and wires their contexts. Must be called inside a Tokio runtime.
    pub fn new(
        config: TrackerConfig,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        // 1. Create actors
        let (menu_actor, menu_client) = crate::menu_actor::new(config.actor_buffer);
        let (tracker_actor, tracker_client) = crate::tracker_actor::new(config.actor_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.actor_buffer);

        let menu = MenuClient::new(menu_client);
        let trackers = TrackerClient::new(tracker_client);
        let orders = OrderClient::new(order_client);

        // 2. Start actors with injected context
        let menu_handle = tokio::spawn(menu_actor.run(()));
        let tracker_handle = tokio::spawn(tracker_actor.run(TrackerContext {
            menu: menu.clone(),
            sink: sink.clone(),
            clock: clock.clone(),
        }));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            menu: menu.clone(),
            trackers: trackers.clone(),
            sink,
            clock: clock.clone(),
            service_fee: config.service_fee,
        }));

        let service = TrackingService::new(
            menu.clone(),
            trackers.clone(),
            orders.clone(),
            config.default_prep_minutes,
        );
        info!(?config, "Tracking system started");

        Self {
            menu,
            trackers,
            orders,
            service,
            config,
            clock,
            handles: vec![
                ("order", order_handle),
                ("tracker", tracker_handle),
                ("menu", menu_handle),
            ],
        }
    }

    /// A progression driver over this system, stopping when `shutdown` is cancelled.
    pub fn driver(&self, shutdown: CancellationToken) -> ProgressionDriver {
        ProgressionDriver::new(
            self.service.clone(),
            self.clock.clone(),
            self.config.sweep_interval(),
            shutdown,
        )
    }

    /// Closes every client and waits for the actors to drain.
    ///
    /// Any driver or service clone still alive keeps its actors running, so stop drivers
    /// first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down tracking system...");
        drop(self.service);
        drop(self.orders);
        drop(self.trackers);
        drop(self.menu);

        for (actor, handle) in self.handles {
            if let Err(e) = handle.await {
                error!(actor, error = %e, "Actor task failed");
                return Err(SystemError::ActorTask { actor, source: e });
            }
        }

        info!("Tracking system shutdown complete.");
        Ok(())
    }
}
