//! Refund gating. Every check is recomputed from the current gateway and order
//! state; nothing is cached between calls.

use std::fmt;

use tracing::debug;

use crate::payments::capabilities::REFUNDS;
use crate::payments::error::{PaymentError, PaymentResult};
use crate::payments::gateway::{PaymentGateway, Readiness};
use crate::payments::types::Order;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
    RefundsNotSupported,
    PaymentMethodMismatch { expected: String, actual: String },
    MissingTransactionReference,
    GatewayNotReady { missing: Vec<&'static str> },
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibleReason::RefundsNotSupported => write!(f, "gateway does not support refunds"),
            IneligibleReason::PaymentMethodMismatch { expected, actual } => write!(
                f,
                "order was paid with {:?}, not {:?}",
                actual, expected
            ),
            IneligibleReason::MissingTransactionReference => {
                write!(f, "order has no transaction reference")
            }
            IneligibleReason::GatewayNotReady { missing } => {
                write!(f, "gateway is missing {}", missing.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundEligibility {
    Eligible,
    Ineligible(IneligibleReason),
}

impl RefundEligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, RefundEligibility::Eligible)
    }
}

/// Decide whether `order` may be refunded through `gateway`, reporting the
/// first failing condition.
pub fn refund_eligibility<G: PaymentGateway + ?Sized>(
    gateway: &G,
    order: &Order,
) -> RefundEligibility {
    let reason = if !gateway.supports(REFUNDS) {
        IneligibleReason::RefundsNotSupported
    } else if order.payment_method() != gateway.id() {
        IneligibleReason::PaymentMethodMismatch {
            expected: gateway.id().to_string(),
            actual: order.payment_method().to_string(),
        }
    } else if order.transaction_id().is_empty() {
        IneligibleReason::MissingTransactionReference
    } else if let Readiness::MissingCredentials(missing) = gateway.readiness() {
        IneligibleReason::GatewayNotReady { missing }
    } else {
        return RefundEligibility::Eligible;
    };

    debug!(
        gateway = gateway.id(),
        order_id = order.id(),
        reason = %reason,
        "order not refundable"
    );
    RefundEligibility::Ineligible(reason)
}

pub fn can_refund_order<G: PaymentGateway + ?Sized>(gateway: &G, order: &Order) -> bool {
    refund_eligibility(gateway, order).is_eligible()
}

/// Gate for callers about to move money: ineligibility becomes an error.
pub fn ensure_refundable<G: PaymentGateway + ?Sized>(
    gateway: &G,
    order: &Order,
) -> PaymentResult<()> {
    match refund_eligibility(gateway, order) {
        RefundEligibility::Eligible => Ok(()),
        RefundEligibility::Ineligible(reason) => Err(PaymentError::RefundNotAllowed {
            gateway: gateway.id().to_string(),
            reason: reason.to_string(),
        }),
    }
}
