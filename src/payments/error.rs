use thiserror::Error;

use crate::database::StoreError;
use crate::payments::types::OrderId;

pub type PaymentResult<T> = Result<T, PaymentError>;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Refund not allowed: gateway={gateway}, reason={reason}")]
    RefundNotAllowed { gateway: String, reason: String },

    #[error("Unsupported operation: gateway={gateway}, operation={operation}")]
    Unsupported {
        gateway: String,
        operation: &'static str,
    },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl PaymentError {
    pub fn is_retryable(&self) -> bool {
        match self {
            PaymentError::RefundNotAllowed { .. } => false,
            PaymentError::Unsupported { .. } => false,
            PaymentError::OrderNotFound { .. } => false,
            PaymentError::Storage(err) => err.is_retryable(),
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            PaymentError::RefundNotAllowed { .. } => 409,
            PaymentError::Unsupported { .. } => 405,
            PaymentError::OrderNotFound { .. } => 404,
            PaymentError::Storage(_) => 503,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            PaymentError::RefundNotAllowed { .. } => {
                "This order cannot be refunded through its payment gateway".to_string()
            }
            PaymentError::Unsupported { .. } => {
                "This payment method does not support the requested action".to_string()
            }
            PaymentError::OrderNotFound { .. } => "Order not found".to_string(),
            PaymentError::Storage(_) => {
                "Payment settings are temporarily unavailable. Please retry shortly".to_string()
            }
        }
    }
}
