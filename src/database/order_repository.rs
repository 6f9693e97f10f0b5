use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use super::error::{StoreError, StoreResult};
use crate::payments::types::{Order, OrderId};

/// Order lookup and persistence used by gateways
pub trait OrderRepository: Send + Sync {
    fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>>;

    /// Persist the order, assigning an id if it has none. Returns the id.
    fn save_order(&self, order: &mut Order) -> StoreResult<OrderId>;
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    inner: RwLock<Orders>,
}

#[derive(Debug, Default)]
struct Orders {
    next_id: OrderId,
    by_id: BTreeMap<OrderId, Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let orders = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("orders"))?;
        Ok(orders.by_id.get(&id).cloned())
    }

    fn save_order(&self, order: &mut Order) -> StoreResult<OrderId> {
        let mut orders = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("orders"))?;

        if order.id() == 0 {
            orders.next_id += 1;
            order.assign_id(orders.next_id);
        }
        order.touch();
        orders.by_id.insert(order.id(), order.clone());

        debug!(order_id = order.id(), status = %order.status(), "order saved");
        Ok(order.id())
    }
}
