//! Read-time order pricing.
//!
//! Prices are looked up from the catalog whenever an order is read, so totals
//! follow the current catalog price rather than the price at checkout. Each
//! distinct product is looked up once per call; lookups run concurrently and
//! nothing is cached between calls.

use futures::future::try_join_all;
use std::collections::{HashMap, HashSet};
use tracing::instrument;
use uuid::Uuid;

use crate::catalog::ProductPrices;
use crate::error::{OrderError, OrderResult};
use crate::models::{Order, PricedItem, PricedOrder};

/// Prices every order in `orders`. Fails as a whole with `InvalidProduct` if
/// any referenced product is missing.
#[instrument(skip_all, fields(orders = orders.len()))]
pub async fn price_orders(
    prices: &dyn ProductPrices,
    orders: Vec<Order>,
) -> OrderResult<Vec<PricedOrder>> {
    let distinct: HashSet<Uuid> = orders
        .iter()
        .flat_map(|order| order.items.iter().map(|item| item.product_id))
        .collect();

    let lookups = distinct.into_iter().map(|product_id| async move {
        match prices.price_of(product_id).await? {
            Some(price) => Ok::<_, OrderError>((product_id, price)),
            None => {
                tracing::info!(%product_id, "Order references a missing product");
                Err(OrderError::InvalidProduct)
            }
        }
    });
    let price_table: HashMap<Uuid, f64> = try_join_all(lookups).await?.into_iter().collect();

    orders
        .into_iter()
        .map(|order| apply_prices(order, &price_table))
        .collect()
}

pub async fn price_order(prices: &dyn ProductPrices, order: Order) -> OrderResult<PricedOrder> {
    price_orders(prices, vec![order])
        .await?
        .pop()
        .ok_or(OrderError::InvalidProduct)
}

fn apply_prices(order: Order, price_table: &HashMap<Uuid, f64>) -> OrderResult<PricedOrder> {
    let items = order
        .items
        .iter()
        .map(|item| {
            let unit_price = *price_table
                .get(&item.product_id)
                .ok_or(OrderError::InvalidProduct)?;
            Ok(PricedItem {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price,
                line_total: unit_price * item.quantity as f64,
            })
        })
        .collect::<OrderResult<Vec<_>>>()?;

    let total_price = items.iter().map(|item| item.line_total).sum();

    Ok(PricedOrder {
        id: order.id,
        user_id: order.user_id,
        items,
        status: order.status,
        total_price,
        created_at: order.created_at,
        updated_at: order.updated_at,
    })
}
