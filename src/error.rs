//! Unified error type for hosts embedding the gateways.

use thiserror::Error;

use crate::config::ConfigError;
use crate::database::StoreError;
use crate::payments::error::PaymentError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl AppError {
    /// HTTP status a host should answer with
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Config(_) => 500,
            AppError::Payment(err) => err.http_status_code(),
            AppError::Storage(_) => 503,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(_) => "Payment gateways are misconfigured".to_string(),
            AppError::Payment(err) => err.user_message(),
            AppError::Storage(_) => {
                "Payment settings are temporarily unavailable. Please retry shortly".to_string()
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Config(_) => false,
            AppError::Payment(err) => err.is_retryable(),
            AppError::Storage(err) => err.is_retryable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_errors_keep_their_status() {
        let err: AppError = PaymentError::OrderNotFound { order_id: 3 }.into();
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.user_message(), "Order not found");
        assert!(!err.is_retryable());
    }

    #[test]
    fn config_errors_are_server_errors() {
        let err: AppError = ConfigError::InvalidValue("LOG_LEVEL".to_string()).into();
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(
            err.to_string(),
            "Invalid value for configuration: LOG_LEVEL"
        );
    }

    #[test]
    fn storage_errors_are_retryable_when_backend_fails() {
        let err: AppError = StoreError::Backend("connection reset".to_string()).into();
        assert_eq!(err.http_status_code(), 503);
        assert!(err.is_retryable());
    }
}
