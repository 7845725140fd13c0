//! Turns an order's requested lines into priced line items and one tracker per unit.
//!
//! Runs inside the order's `on_create`, before the order is stored. For each line the item's
//! queue is reserved in one step, which yields the depth before this order joined it; every
//! unit of the line is then estimated from that snapshot:
//!
//! ```text
//! queue_position     = depth_before + unit_index
//! estimated_ready_at = now + prep_minutes + 2 * queue_position minutes
//! ```
//!
//! All trackers are stored with one `create_batch`. If anything fails, the reservations made
//! so far are released and the order is not created.

use super::error::OrderError;
use super::OrderContext;
use crate::clients::MenuClient;
use crate::model::{
    LineItem, LineItemId, MenuItem, MenuItemId, Order, OrderLine, TrackerCreate,
};
use crate::prep_time::{self, QUEUE_PENALTY_MINUTES};
use actor_framework::ActorClient;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

pub(crate) fn validate_lines(lines: &[OrderLine]) -> Result<(), OrderError> {
    if lines.is_empty() {
        return Err(OrderError::Validation("order has no line items".into()));
    }
    if let Some(line) = lines.iter().find(|line| line.quantity == 0) {
        return Err(OrderError::Validation(format!(
            "quantity for {} must be at least 1",
            line.menu_item_id
        )));
    }
    Ok(())
}

struct Allocation {
    line_items: Vec<LineItem>,
    trackers: Vec<TrackerCreate>,
}

/// Allocates `order` in place. On error nothing has been stored and no queue stays reserved.
pub(crate) async fn allocate(order: &mut Order, ctx: &OrderContext) -> Result<(), OrderError> {
    let lines = std::mem::take(&mut order.requested);
    validate_lines(&lines)?;

    // Every item must exist before any queue is touched
    let items = fetch_items(&lines, &ctx.menu).await?;
    let now = ctx.clock.now();

    let mut reserved = Vec::with_capacity(lines.len());
    let allocation = match plan(order, &lines, &items, now, ctx, &mut reserved).await {
        Ok(allocation) => allocation,
        Err(e) => {
            release(&reserved, &ctx.menu).await;
            return Err(e);
        }
    };

    let estimated_completion_at = allocation
        .trackers
        .iter()
        .map(|tracker| tracker.estimated_ready_at)
        .max();

    let subtotal = match charges(&allocation.line_items, ctx.service_fee) {
        Ok(subtotal) => subtotal,
        Err(e) => {
            release(&reserved, &ctx.menu).await;
            return Err(e);
        }
    };

    let tracker_ids = match ctx.trackers.create_batch(allocation.trackers).await {
        Ok(ids) => ids,
        Err(e) => {
            release(&reserved, &ctx.menu).await;
            return Err(e.into());
        }
    };

    order.set_charges(subtotal, ctx.service_fee);
    order.line_items = allocation.line_items;
    order.tracker_ids = tracker_ids;
    order.estimated_completion_at = estimated_completion_at;
    order.created_at = now;
    debug!(order_id = %order.id, trackers = order.tracker_ids.len(), "Allocated trackers");
    Ok(())
}

/// The order subtotal, once it is known that adding the fee cannot overflow.
fn charges(line_items: &[LineItem], service_fee: Decimal) -> Result<Decimal, OrderError> {
    let overflow = || OrderError::Validation("order total is out of range".into());
    let subtotal = line_items
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.total_price))
        .ok_or_else(overflow)?;
    subtotal.checked_add(service_fee).ok_or_else(overflow)?;
    Ok(subtotal)
}

async fn fetch_items(lines: &[OrderLine], menu: &MenuClient) -> Result<Vec<MenuItem>, OrderError> {
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        match menu.get(line.menu_item_id).await? {
            Some(item) => items.push(item),
            None => return Err(OrderError::NotFound(line.menu_item_id.to_string())),
        }
    }
    Ok(items)
}

async fn plan(
    order: &Order,
    lines: &[OrderLine],
    items: &[MenuItem],
    now: DateTime<Utc>,
    ctx: &OrderContext,
    reserved: &mut Vec<(MenuItemId, u32)>,
) -> Result<Allocation, OrderError> {
    let mut line_items = Vec::with_capacity(lines.len());
    let mut trackers = Vec::new();

    for (line_id, (line, item)) in (1u32..).zip(lines.iter().zip(items)) {
        let before = ctx.menu.reserve_queue(line.menu_item_id, line.quantity).await?;
        reserved.push((line.menu_item_id, line.quantity));

        let prep_minutes = prep_time::estimate(&before);
        for unit_index in 1..=line.quantity {
            let queue_position = before.queue_depth.saturating_add(unit_index);
            let wait = i64::from(prep_minutes)
                + i64::from(queue_position) * i64::from(QUEUE_PENALTY_MINUTES);
            trackers.push(TrackerCreate {
                order_id: order.id,
                line_item_id: LineItemId(line_id),
                menu_item_id: item.id,
                stall_id: item.stall_id,
                item_name: item.name.clone(),
                unit_index,
                queue_position,
                prep_duration_minutes: prep_minutes,
                estimated_ready_at: now + Duration::minutes(wait),
                created_at: now,
            });
        }

        let total_price = item
            .price
            .checked_mul(Decimal::from(line.quantity))
            .ok_or_else(|| {
                OrderError::Validation(format!("line total for {} is out of range", item.id))
            })?;
        line_items.push(LineItem {
            id: LineItemId(line_id),
            menu_item_id: item.id,
            stall_id: item.stall_id,
            item_name: item.name.clone(),
            quantity: line.quantity,
            unit_price: item.price,
            total_price,
        });
    }

    Ok(Allocation {
        line_items,
        trackers,
    })
}

async fn release(reserved: &[(MenuItemId, u32)], menu: &MenuClient) {
    for (menu_item_id, units) in reserved.iter().rev() {
        if let Err(e) = menu.adjust_queue_depth(*menu_item_id, -i64::from(*units)).await {
            warn!(%menu_item_id, units, error = %e, "Failed to release queue reservation");
        }
    }
}
