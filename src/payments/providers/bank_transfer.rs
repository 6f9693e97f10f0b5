//! Direct bank transfer. Customers pay into one of the store's bank accounts
//! and the order waits on-hold until the money is seen.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::GatewaysConfig;
use crate::database::{OptionStore, OptionStoreExt, OrderRepository};
use crate::payments::capabilities::{CapabilitySet, PRODUCTS};
use crate::payments::error::PaymentResult;
use crate::payments::form::{field_value, input_name, AccountDetailsForm, ACCOUNT_FIELDS};
use crate::payments::gateway::{hold_for_manual_payment, PaymentGateway};
use crate::payments::render::{
    detail_item, escape_html, indexed_text_input, paragraphs, table_header,
};
use crate::payments::types::{BankAccountRecord, Order, OrderId, PaymentOutcome};

pub const GATEWAY_ID: &str = "bacs";
/// Option key holding the account list
pub const ACCOUNTS_OPTION: &str = "bacs_accounts";
/// Class on the bank details section of the order confirmation page
pub const BANK_DETAILS_MARKER: &str = "storefront-bacs-bank-details";

pub struct BankTransferGateway {
    capabilities: CapabilitySet,
    enabled: bool,
    title: String,
    instructions: String,
    country: Option<String>,
    store: Arc<dyn OptionStore>,
}

impl BankTransferGateway {
    pub fn new(store: Arc<dyn OptionStore>) -> Self {
        Self {
            capabilities: [PRODUCTS].into_iter().collect(),
            enabled: true,
            title: "Direct bank transfer".to_string(),
            instructions: String::new(),
            country: None,
            store,
        }
    }

    pub fn from_config(config: &GatewaysConfig, store: Arc<dyn OptionStore>) -> Self {
        Self {
            enabled: config.is_enabled(GATEWAY_ID),
            instructions: config.bacs_instructions.clone(),
            country: config.store_country.clone(),
            ..Self::new(store)
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = country;
        self
    }

    /// Replace the stored account list with the submitted one. No input stores
    /// an empty list.
    pub fn save_account_details(&self, input: Option<&AccountDetailsForm>) -> PaymentResult<()> {
        let records = input.map(AccountDetailsForm::records).unwrap_or_default();
        self.store.set_typed(ACCOUNTS_OPTION, &records)?;
        info!(gateway = GATEWAY_ID, accounts = records.len(), "account details saved");
        Ok(())
    }

    pub fn load_account_details(&self) -> PaymentResult<Vec<BankAccountRecord>> {
        let mut records: Vec<BankAccountRecord> = self
            .store
            .get_typed(ACCOUNTS_OPTION)?
            .unwrap_or_default();
        for (index, record) in records.iter_mut().enumerate() {
            record.index = index;
        }
        Ok(records)
    }

    /// Editable account table; inputs are named `bacs_<field>[<index>]` so the
    /// submitted form maps back onto the same records.
    pub fn render_account_details_html(&self) -> PaymentResult<String> {
        let records = self.load_account_details()?;
        let sort_code = sort_code_label(self.country.as_deref());

        let mut html = String::from(r#"<table class="bacs-accounts">"#);
        html.push_str(&table_header(&[
            "Account name",
            "Account number",
            "Bank name",
            sort_code,
            "IBAN",
            "BIC / Swift",
        ]));
        html.push_str(r#"<tbody class="accounts">"#);
        for record in &records {
            html.push_str(r#"<tr class="account">"#);
            for field in ACCOUNT_FIELDS {
                html.push_str("<td>");
                html.push_str(&indexed_text_input(
                    &input_name(field),
                    record.index,
                    field_value(record, field),
                ));
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        Ok(html)
    }

    fn bank_details_html(&self) -> PaymentResult<String> {
        let records = self.load_account_details()?;
        let sort_code = sort_code_label(self.country.as_deref());

        let mut html = format!(
            r#"<section class="{marker}"><h2 class="{marker}-heading">Our bank details</h2>"#,
            marker = BANK_DETAILS_MARKER
        );
        for record in records.iter().filter(|r| !r.is_blank()) {
            if !record.account_name.trim().is_empty() {
                html.push_str(&format!(
                    r#"<h3 class="bacs-account-name">{}:</h3>"#,
                    escape_html(&record.account_name)
                ));
            }
            html.push_str(r#"<ul class="bacs-details order-details">"#);
            html.push_str(&detail_item("bank_name", "Bank", &record.bank_name));
            html.push_str(&detail_item(
                "account_number",
                "Account number",
                &record.account_number,
            ));
            html.push_str(&detail_item("sort_code", sort_code, &record.sort_code));
            html.push_str(&detail_item("iban", "IBAN", &record.iban));
            html.push_str(&detail_item("bic", "BIC", &record.bic));
            html.push_str("</ul>");
        }
        html.push_str("</section>");
        Ok(html)
    }
}

impl PaymentGateway for BankTransferGateway {
    fn id(&self) -> &str {
        GATEWAY_ID
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn method_title(&self) -> &str {
        "Direct bank transfer"
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
        debug!(gateway = GATEWAY_ID, order_id = order.id(), "rendering bank details");
        let mut html = paragraphs(&self.instructions, "bacs-instructions");
        html.push_str(&self.bank_details_html()?);
        Ok(html)
    }
}

/// Local name for the branch routing code
pub fn sort_code_label(country: Option<&str>) -> &'static str {
    match country.map(str::to_uppercase).as_deref() {
        Some("AU") => "BSB",
        Some("CA") => "Bank transit number",
        Some("IN") => "IFSC",
        Some("IT") => "Branch sort",
        Some("NZ") | Some("SE") => "Bank code",
        Some("US") => "Routing number",
        Some("ZA") => "Branch code",
        _ => "Sort code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{InMemoryOptionStore, InMemoryOrderRepository};
    use crate::payments::types::OrderStatus;

    fn gateway() -> BankTransferGateway {
        BankTransferGateway::new(Arc::new(InMemoryOptionStore::new()))
    }

    fn one_account_form() -> AccountDetailsForm {
        AccountDetailsForm::from_pairs([
            ("bacs_account_name[0]", "test"),
            ("bacs_account_number[0]", "123"),
            ("bacs_bank_name[0]", "bank"),
            ("bacs_sort_code[0]", "123"),
            ("bacs_iban[0]", "123"),
            ("bacs_bic[0]", "123"),
        ])
    }

    #[test]
    fn nothing_stored_loads_empty() {
        assert!(gateway().load_account_details().unwrap().is_empty());
    }

    #[test]
    fn save_without_input_stores_empty_list() {
        let gateway = gateway();
        gateway.save_account_details(Some(&one_account_form())).unwrap();
        gateway.save_account_details(None).unwrap();
        assert!(gateway.load_account_details().unwrap().is_empty());
    }

    #[test]
    fn save_replaces_whole_list() {
        let gateway = gateway();
        let two = AccountDetailsForm::from_pairs([
            ("bacs_account_name[0]", "a"),
            ("bacs_account_name[1]", "b"),
        ]);
        gateway.save_account_details(Some(&two)).unwrap();
        gateway.save_account_details(Some(&one_account_form())).unwrap();

        let records = gateway.load_account_details().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].account_name, "test");
    }

    #[test]
    fn loaded_records_are_indexed_by_position() {
        let gateway = gateway();
        let form = AccountDetailsForm::from_pairs([
            ("bacs_iban[0]", "GB01"),
            ("bacs_iban[1]", "GB02"),
            ("bacs_iban[2]", "GB03"),
        ]);
        gateway.save_account_details(Some(&form)).unwrap();
        let indexes: Vec<usize> = gateway
            .load_account_details()
            .unwrap()
            .iter()
            .map(|r| r.index)
            .collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn account_table_uses_country_label() {
        let gateway = gateway().with_country(Some("AU".to_string()));
        gateway.save_account_details(Some(&one_account_form())).unwrap();
        let html = gateway.render_account_details_html().unwrap();
        assert!(html.contains("<th>BSB</th>"));
        assert!(html.contains(r#"name="bacs_sort_code[0]""#));
    }

    #[test]
    fn account_table_is_deterministic() {
        let gateway = gateway();
        gateway.save_account_details(Some(&one_account_form())).unwrap();
        assert_eq!(
            gateway.render_account_details_html().unwrap(),
            gateway.render_account_details_html().unwrap()
        );
    }

    #[test]
    fn bank_details_skip_blank_fields_and_records() {
        let gateway = gateway();
        let form = AccountDetailsForm::from_pairs([
            ("bacs_account_name[0]", "Main"),
            ("bacs_iban[0]", "GB29NWBK60161331926819"),
            ("bacs_account_name[2]", "Spare"),
        ]);
        gateway.save_account_details(Some(&form)).unwrap();

        let html = gateway.bank_details_html().unwrap();
        assert!(html.contains("Main:"));
        assert!(html.contains("IBAN: <strong>GB29NWBK60161331926819</strong>"));
        assert!(!html.contains("BIC:"));
        assert_eq!(html.matches("<ul ").count(), 2);
    }

    #[test]
    fn thankyou_includes_instructions_and_marker() {
        let orders = InMemoryOrderRepository::new();
        let gateway = gateway().with_instructions("Use your order number as reference.");
        let mut order = Order::new(GATEWAY_ID);
        let id = orders.save_order(&mut order).unwrap();

        let html = gateway.render_thankyou(id, &orders).unwrap();
        assert!(html.starts_with(r#"<p class="bacs-instructions">"#));
        assert!(html.contains(BANK_DETAILS_MARKER));
    }

    #[test]
    fn marker_is_namespaced_to_the_storefront() {
        assert_eq!(BANK_DETAILS_MARKER, "storefront-bacs-bank-details");

        let orders = InMemoryOrderRepository::new();
        let mut order = Order::new(GATEWAY_ID);
        let id = orders.save_order(&mut order).unwrap();
        let html = gateway().render_thankyou(id, &orders).unwrap();
        assert!(html.contains(r#"<section class="storefront-bacs-bank-details">"#));
    }

    #[test]
    fn process_payment_holds_order() {
        let orders = InMemoryOrderRepository::new();
        let mut order = Order::new(GATEWAY_ID);
        let id = orders.save_order(&mut order).unwrap();

        let outcome = gateway().process_payment(id, &orders).unwrap();
        assert_eq!(outcome.status, OrderStatus::OnHold);
        assert_eq!(outcome.redirect, format!("/checkout/order-received/{}", id));
    }

    #[test]
    fn sort_code_labels() {
        assert_eq!(sort_code_label(None), "Sort code");
        assert_eq!(sort_code_label(Some("gb")), "Sort code");
        assert_eq!(sort_code_label(Some("us")), "Routing number");
        assert_eq!(sort_code_label(Some("IN")), "IFSC");
    }

    #[test]
    fn bank_transfer_does_not_refund() {
        let gateway = gateway();
        let mut order = Order::new(GATEWAY_ID);
        order.set_transaction_id("abc");
        assert!(!gateway.can_refund_order(&order));
    }
}
