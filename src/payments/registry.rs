use std::sync::Arc;

use tracing::{debug, info};

use crate::config::GatewaysConfig;
use crate::database::{OptionStore, OrderRepository};
use crate::payments::error::PaymentResult;
use crate::payments::gateway::PaymentGateway;
use crate::payments::providers::{BankTransferGateway, ChequeGateway, PayPalGateway};
use crate::payments::refunds::{refund_eligibility, RefundEligibility};
use crate::payments::types::{Order, OrderId};

/// The store's gateways, looked up by the id recorded on orders
#[derive(Default)]
pub struct GatewayRegistry {
    gateways: Vec<Box<dyn PaymentGateway>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every known gateway, enabled or not according to `config`.
    pub fn from_config(
        config: &GatewaysConfig,
        store: Arc<dyn OptionStore>,
    ) -> PaymentResult<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(BankTransferGateway::from_config(
            config,
            store.clone(),
        )));
        registry.register(Box::new(ChequeGateway::from_config(config)));
        registry.register(Box::new(PayPalGateway::from_config(config, store)?));

        let enabled: Vec<&str> = registry.available().iter().map(|g| g.id()).collect();
        info!(
            registered = registry.gateways.len(),
            enabled = ?enabled,
            "payment gateways loaded"
        );
        Ok(registry)
    }

    /// Add a gateway, replacing any registered under the same id.
    pub fn register(&mut self, gateway: Box<dyn PaymentGateway>) {
        match self.gateways.iter().position(|g| g.id() == gateway.id()) {
            Some(position) => {
                debug!(gateway = gateway.id(), "replacing registered gateway");
                self.gateways[position] = gateway;
            }
            None => self.gateways.push(gateway),
        }
    }

    pub fn get(&self, id: &str) -> Option<&dyn PaymentGateway> {
        self.gateways
            .iter()
            .find(|g| g.id() == id)
            .map(|g| g.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Box<dyn PaymentGateway>> {
        self.gateways.iter_mut().find(|g| g.id() == id)
    }

    /// Enabled gateways in registration order
    pub fn available(&self) -> Vec<&dyn PaymentGateway> {
        self.gateways
            .iter()
            .filter(|g| g.is_enabled())
            .map(|g| g.as_ref())
            .collect()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.gateways.iter().map(|g| g.id()).collect()
    }

    /// Gateway the order was paid through, if registered
    pub fn for_order(&self, order: &Order) -> Option<&dyn PaymentGateway> {
        self.get(order.payment_method())
    }

    /// `None` when no registered gateway matches the order's payment method.
    pub fn refund_eligibility(&self, order: &Order) -> Option<RefundEligibility> {
        self.for_order(order)
            .map(|gateway| refund_eligibility(gateway, order))
    }

    pub fn can_refund_order(&self, order: &Order) -> bool {
        self.refund_eligibility(order)
            .is_some_and(|eligibility| eligibility.is_eligible())
    }

    /// Confirmation fragment from whichever gateway took the order.
    pub fn render_thankyou(
        &self,
        order_id: OrderId,
        orders: &dyn OrderRepository,
    ) -> PaymentResult<String> {
        let Some(order) = orders.get_order(order_id)? else {
            return Ok(String::new());
        };
        match self.for_order(&order) {
            Some(gateway) => gateway.thankyou_fragment(&order),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{InMemoryOptionStore, InMemoryOrderRepository};
    use crate::payments::capabilities::REFUNDS;

    fn registry(config: &GatewaysConfig) -> GatewayRegistry {
        GatewayRegistry::from_config(config, Arc::new(InMemoryOptionStore::new()))
            .expect("registry should build")
    }

    #[test]
    fn registers_all_known_gateways() {
        let registry = registry(&GatewaysConfig::default());
        assert_eq!(registry.ids(), vec!["bacs", "cheque", "paypal"]);
        assert_eq!(registry.available().len(), 3);
    }

    #[test]
    fn disabled_gateways_are_not_available() {
        let config = GatewaysConfig {
            enabled: vec!["paypal".to_string()],
            ..Default::default()
        };
        let registry = registry(&config);
        let available: Vec<&str> = registry.available().iter().map(|g| g.id()).collect();
        assert_eq!(available, vec!["paypal"]);
        assert!(registry.get("bacs").is_some());
    }

    #[test]
    fn register_replaces_same_id() {
        let mut registry = GatewayRegistry::new();
        registry.register(Box::new(ChequeGateway::new()));
        registry.register(Box::new(ChequeGateway::new().with_instructions("new")));
        assert_eq!(registry.ids(), vec!["cheque"]);
    }

    #[test]
    fn refund_dispatch_uses_order_payment_method() {
        let mut registry = registry(&GatewaysConfig::default());
        let mut order = Order::new("cheque");
        order.set_transaction_id("chq-1");

        assert!(registry.refund_eligibility(&order).is_some());
        assert!(!registry.can_refund_order(&order));

        registry
            .get_mut("cheque")
            .expect("cheque registered")
            .add_capability(REFUNDS);
        assert!(registry.can_refund_order(&order));

        order.set_payment_method("unknown", "");
        assert!(registry.refund_eligibility(&order).is_none());
        assert!(!registry.can_refund_order(&order));
    }

    #[test]
    fn thankyou_dispatches_to_paying_gateway() {
        let registry = registry(&GatewaysConfig::default());
        let orders = InMemoryOrderRepository::new();
        let mut order = Order::new("bacs");
        let id = orders.save_order(&mut order).unwrap();

        let html = registry.render_thankyou(id, &orders).unwrap();
        assert!(html.contains(r#"<section class="storefront-bacs-bank-details">"#));

        let mut other = Order::new("stripe");
        let other_id = orders.save_order(&mut other).unwrap();
        assert!(registry.render_thankyou(other_id, &orders).unwrap().is_empty());
    }
}
