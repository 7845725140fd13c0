use actor_framework::tracing::setup_tracing;
use rust_decimal::Decimal;
use stall_tracker::clock::SystemClock;
use stall_tracker::config::TrackerConfig;
use stall_tracker::events::LogSink;
use stall_tracker::lifecycle::TrackingSystem;
use stall_tracker::model::{MenuItemCreate, OrderCreate, OrderLine, StallId, UserId};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = TrackerConfig::from_env();
    let system = TrackingSystem::new(config, Arc::new(SystemClock), Arc::new(LogSink));

    let span = tracing::info_span!("menu_setup");
    let (laksa, satay) = async {
        info!("Seeding menu");
        let laksa = system
            .service
            .create_menu_item(MenuItemCreate {
                stall_id: StallId(1),
                name: "Curry Laksa".into(),
                price: Decimal::new(750, 2),
                base_prep_minutes: 8,
                complexity_multiplier: 1.25,
            })
            .await?;
        let satay = system
            .service
            .create_menu_item(MenuItemCreate {
                stall_id: StallId(2),
                name: "Chicken Satay (10 sticks)".into(),
                price: Decimal::new(900, 2),
                base_prep_minutes: 5,
                complexity_multiplier: 1.0,
            })
            .await?;
        Ok::<_, Box<dyn std::error::Error>>((laksa, satay))
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("order_processing");
    let order = system
        .service
        .place_order(OrderCreate {
            user_id: UserId(1),
            lines: vec![OrderLine::new(laksa, 2), OrderLine::new(satay, 1)],
        })
        .instrument(span)
        .await?;
    info!(
        order_id = %order.id,
        trackers = order.tracker_ids.len(),
        eta = ?order.estimated_completion_at,
        "Order accepted"
    );

    let shutdown = CancellationToken::new();
    let driver = tokio::spawn(system.driver(shutdown.clone()).run());

    info!("Progression driver running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    shutdown.cancel();
    driver.await?;
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
