pub mod bank_transfer;
pub mod cheque;
pub mod paypal;

pub use bank_transfer::BankTransferGateway;
pub use cheque::ChequeGateway;
pub use paypal::PayPalGateway;
