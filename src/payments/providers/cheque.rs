use tracing::debug;

use crate::config::GatewaysConfig;
use crate::database::OrderRepository;
use crate::payments::capabilities::{CapabilitySet, PRODUCTS};
use crate::payments::error::PaymentResult;
use crate::payments::gateway::{hold_for_manual_payment, PaymentGateway};
use crate::payments::render::paragraphs;
use crate::payments::types::{Order, OrderId, PaymentOutcome};

pub const GATEWAY_ID: &str = "cheque";

/// Payment by posted cheque, settled outside the store
pub struct ChequeGateway {
    capabilities: CapabilitySet,
    enabled: bool,
    title: String,
    instructions: String,
}

impl Default for ChequeGateway {
    fn default() -> Self {
        Self {
            capabilities: [PRODUCTS].into_iter().collect(),
            enabled: true,
            title: "Check payments".to_string(),
            instructions: String::new(),
        }
    }
}

impl ChequeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &GatewaysConfig) -> Self {
        Self {
            enabled: config.is_enabled(GATEWAY_ID),
            instructions: config.cheque_instructions.clone(),
            ..Self::default()
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }
}

impl PaymentGateway for ChequeGateway {
    fn id(&self) -> &str {
        GATEWAY_ID
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn method_title(&self) -> &str {
        "Check payments"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    fn capabilities_mut(&mut self) -> &mut CapabilitySet {
        &mut self.capabilities
    }

    fn process_payment(
        &self,
        order_id: OrderId,
        orders: &dyn OrderRepository,
    ) -> PaymentResult<PaymentOutcome> {
        hold_for_manual_payment(self, order_id, orders)
    }

    fn thankyou_fragment(&self, order: &Order) -> PaymentResult<String> {
        debug!(gateway = GATEWAY_ID, order_id = order.id(), "rendering cheque instructions");
        Ok(paragraphs(&self.instructions, "cheque-instructions"))
    }
}
