//! Order Service - checkout, owner-scoped reads and status changes

use axum_helpers::Clock;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::catalog::ProductPrices;
use crate::error::{OrderError, OrderResult};
use crate::models::{
    CreateOrder, Order, OrderFilter, OrderItem, OrderList, OrderStatus, PricedOrder,
};
use crate::pricing::{price_order, price_orders};
use crate::repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
    prices: Arc<dyn ProductPrices>,
    clock: Clock,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R, prices: Arc<dyn ProductPrices>, clock: Clock) -> Self {
        Self {
            repository: Arc::new(repository),
            prices,
            clock,
        }
    }

    /// Stores a pending order. Stock is neither checked nor reserved here.
    ///
    /// The order is priced before it is written, so an unknown product fails
    /// the request with nothing stored.
    #[instrument(skip(self, input), fields(items = input.items.len()))]
    pub async fn create_order(
        &self,
        user_id: Option<Uuid>,
        input: CreateOrder,
    ) -> OrderResult<PricedOrder> {
        let user_id = user_id.ok_or(OrderError::Forbidden)?;

        if input.items.is_empty() {
            return Err(OrderError::InvalidItems);
        }

        let items = input
            .items
            .iter()
            .map(|item| {
                let product_id = item.product_id.trim();
                if product_id.is_empty() {
                    return Err(OrderError::InvalidProduct);
                }
                let product_id =
                    Uuid::parse_str(product_id).map_err(|_| OrderError::InvalidProduct)?;
                if item.quantity <= 0 {
                    return Err(OrderError::InvalidQuantity);
                }
                Ok(OrderItem {
                    product_id,
                    quantity: item.quantity,
                })
            })
            .collect::<OrderResult<Vec<_>>>()?;

        let now = (self.clock)();
        let order = Order {
            id: Uuid::now_v7(),
            user_id,
            items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let priced = price_order(self.prices.as_ref(), order.clone()).await?;

        let created = self.repository.create(order).await?;
        tracing::info!(order_id = %created.id, %user_id, "Order created");

        Ok(priced)
    }

    /// Own orders for users, every order for admins
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        user_id: Uuid,
        is_admin: bool,
        filter: OrderFilter,
    ) -> OrderResult<OrderList> {
        filter
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        let owner = (!is_admin).then_some(user_id);
        let orders = self.repository.list(owner, &filter).await?;
        let total = self.repository.count(owner).await?;

        let items = price_orders(self.prices.as_ref(), orders).await?;

        Ok(OrderList {
            items,
            total,
            offset: filter.offset,
            limit: filter.limit,
        })
    }

    /// Another user's order reads as not found
    #[instrument(skip(self))]
    pub async fn get_order(
        &self,
        id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> OrderResult<PricedOrder> {
        let owner = (!is_admin).then_some(user_id);
        let order = self
            .repository
            .get_by_id(id, owner)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        price_order(self.prices.as_ref(), order).await
    }

    /// Admin lookup by a raw id string
    #[instrument(skip(self))]
    pub async fn find_order(&self, order_id: &str) -> OrderResult<PricedOrder> {
        let trimmed = order_id.trim();
        let id =
            Uuid::parse_str(trimmed).map_err(|_| OrderError::InvalidId(trimmed.to_string()))?;

        let order = self
            .repository
            .get_by_id(id, None)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        price_order(self.prices.as_ref(), order).await
    }

    /// Prices the current order first; a status change is only written for
    /// an order that can be priced.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> OrderResult<PricedOrder> {
        let current = self
            .repository
            .get_by_id(id, None)
            .await?
            .ok_or(OrderError::NotFound(id))?;
        let mut priced = price_order(self.prices.as_ref(), current).await?;

        let updated = self
            .repository
            .update_status(id, status, (self.clock)())
            .await?
            .ok_or(OrderError::NotFound(id))?;

        tracing::info!(order_id = %id, %status, "Order status updated");
        priced.status = updated.status;
        priced.updated_at = updated.updated_at;
        Ok(priced)
    }
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            prices: Arc::clone(&self.prices),
            clock: Arc::clone(&self.clock),
        }
    }
}
