//! Payment gateway layer for a storefront: capability flags, refund gating,
//! bank transfer account details and order confirmation fragments.

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod payments;

pub use database::{
    InMemoryOptionStore, InMemoryOrderRepository, OptionStore, OptionStoreExt, OrderRepository,
    StoreError,
};
pub use payments::capabilities::CapabilitySet;
pub use payments::error::{PaymentError, PaymentResult};
pub use payments::gateway::{PaymentGateway, Readiness};
pub use payments::refunds::{
    can_refund_order, ensure_refundable, refund_eligibility, IneligibleReason, RefundEligibility,
};
pub use payments::registry::GatewayRegistry;
pub use payments::types::{BankAccountRecord, Order, OrderStatus};
