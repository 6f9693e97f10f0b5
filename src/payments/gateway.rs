use tracing::{debug, info};

use crate::database::OrderRepository;
use crate::payments::capabilities::CapabilitySet;
use crate::payments::error::{PaymentError, PaymentResult};
use crate::payments::refunds;
use crate::payments::types::{Order, OrderId, OrderStatus, PaymentOutcome};

/// Whether a gateway has everything it needs to talk to its processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    MissingCredentials(Vec<&'static str>),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

pub trait PaymentGateway: Send + Sync {
    /// Identifier recorded as the payment method on orders paid through this gateway
    fn id(&self) -> &str;

    /// Title shown to customers at checkout
    fn title(&self) -> &str;

    /// Title shown to store staff
    fn method_title(&self) -> &str;

    fn is_enabled(&self) -> bool;

    fn capabilities(&self) -> &CapabilitySet;

    fn capabilities_mut(&mut self) -> &mut CapabilitySet;

    fn supports(&self, capability: &str) -> bool {
        self.capabilities().supports(capability)
    }

    fn add_capability(&mut self, capability: &str) {
        if self.capabilities_mut().add(capability) {
            debug!(gateway = self.id(), capability, "capability added");
        }
    }

    fn remove_capability(&mut self, capability: &str) {
        if self.capabilities_mut().remove(capability) {
            debug!(gateway = self.id(), capability, "capability removed");
        }
    }

    fn readiness(&self) -> Readiness {
        Readiness::Ready
    }

    fn can_refund_order(&self, order: &Order) -> bool {
        refunds::can_refund_order(self, order)
    }

    /// Take payment for an order at checkout.
    fn process_payment(
        &self,
        _order_id: OrderId,
        _orders: &dyn OrderRepository,
    ) -> PaymentResult<PaymentOutcome> {
        Err(PaymentError::Unsupported {
            gateway: self.id().to_string(),
            operation: "process_payment",
        })
    }

    /// Fragment appended to the order confirmation page for an order paid
    /// through this gateway.
    fn thankyou_fragment(&self, _order: &Order) -> PaymentResult<String> {
        Ok(String::new())
    }

    /// Order confirmation fragment for `order_id`; empty when the order is
    /// unknown or was paid through another gateway.
    fn render_thankyou(
        &self,
        order_id: OrderId,
        orders: &dyn OrderRepository,
    ) -> PaymentResult<String> {
        let Some(order) = orders.get_order(order_id)? else {
            return Ok(String::new());
        };
        if order.payment_method() != self.id() {
            return Ok(String::new());
        }
        self.thankyou_fragment(&order)
    }
}

/// Checkout for gateways settled outside the store: the order waits on-hold
/// until staff confirm the money arrived.
pub(crate) fn hold_for_manual_payment<G: PaymentGateway + ?Sized>(
    gateway: &G,
    order_id: OrderId,
    orders: &dyn OrderRepository,
) -> PaymentResult<PaymentOutcome> {
    let mut order = orders
        .get_order(order_id)?
        .ok_or(PaymentError::OrderNotFound { order_id })?;

    order.set_payment_method(gateway.id(), gateway.title());
    order.set_status(OrderStatus::OnHold);
    orders.save_order(&mut order)?;

    info!(
        gateway = gateway.id(),
        order_id,
        status = %order.status(),
        "order awaiting manual payment"
    );
    Ok(PaymentOutcome::order_received(order_id, order.status()))
}
