use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type OrderId = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    OnHold,
    Processing,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order as seen by the gateways. Owned by the order repository; gateways only
/// read it, apart from offline gateways moving it on-hold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    id: OrderId,
    payment_method: String,
    payment_method_title: String,
    transaction_id: String,
    status: OrderStatus,
    date_created: DateTime<Utc>,
    date_modified: Option<DateTime<Utc>>,
}

impl Order {
    /// New unsaved order; the repository assigns the id on first save.
    pub fn new(payment_method: impl Into<String>) -> Self {
        Self {
            id: 0,
            payment_method: payment_method.into(),
            payment_method_title: String::new(),
            transaction_id: String::new(),
            status: OrderStatus::Pending,
            date_created: Utc::now(),
            date_modified: None,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    pub fn payment_method_title(&self) -> &str {
        &self.payment_method_title
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }

    pub fn date_modified(&self) -> Option<DateTime<Utc>> {
        self.date_modified
    }

    pub fn set_payment_method(&mut self, method: impl Into<String>, title: impl Into<String>) {
        self.payment_method = method.into();
        self.payment_method_title = title.into();
    }

    pub fn set_transaction_id(&mut self, transaction_id: impl Into<String>) {
        self.transaction_id = transaction_id.into();
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub(crate) fn assign_id(&mut self, id: OrderId) {
        self.id = id;
    }

    pub(crate) fn touch(&mut self) {
        self.date_modified = Some(Utc::now());
    }
}

/// One bank account a customer can pay into.
///
/// `index` is the record's position in the stored list and is not persisted;
/// it is reassigned from position on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankAccountRecord {
    #[serde(skip)]
    pub index: usize,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub sort_code: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub bic: String,
}

impl BankAccountRecord {
    pub fn is_blank(&self) -> bool {
        [
            &self.account_name,
            &self.account_number,
            &self.bank_name,
            &self.sort_code,
            &self.iban,
            &self.bic,
        ]
        .iter()
        .all(|v| v.trim().is_empty())
    }
}

/// Which credential set a gateway uses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GatewayMode {
    Test,
    Live,
}

/// Result of handing an order to a gateway at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub redirect: String,
}

impl PaymentOutcome {
    pub fn order_received(order_id: OrderId, status: OrderStatus) -> Self {
        Self {
            order_id,
            status,
            redirect: format!("/checkout/order-received/{}", order_id),
        }
    }
}
