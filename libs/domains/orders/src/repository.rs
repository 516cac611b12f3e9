use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{Order, OrderFilter, OrderStatus};

/// Data access for orders.
///
/// `owner` restricts every read to one user's orders; `None` reads all of them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: Order) -> OrderResult<Order>;

    /// Page sorted newest first
    async fn list(&self, owner: Option<Uuid>, filter: &OrderFilter) -> OrderResult<Vec<Order>>;

    async fn count(&self, owner: Option<Uuid>) -> OrderResult<u64>;

    async fn get_by_id(&self, id: Uuid, owner: Option<Uuid>) -> OrderResult<Option<Order>>;

    /// Returns the updated order, `None` if absent
    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> OrderResult<Option<Order>>;
}
