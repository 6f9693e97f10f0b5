//! Submitted bank account fields, one list per field with one entry per account.

use std::collections::HashMap;

use tracing::warn;

use crate::payments::types::BankAccountRecord;

/// Prefix of every account details input name
pub const FIELD_PREFIX: &str = "bacs_";

/// Record fields in display order
pub const ACCOUNT_FIELDS: [&str; 6] = [
    "account_name",
    "account_number",
    "bank_name",
    "sort_code",
    "iban",
    "bic",
];

/// Highest account index accepted from flat request pairs
pub const MAX_ACCOUNTS: usize = 256;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountDetailsForm {
    fields: HashMap<String, Vec<String>>,
}

impl AccountDetailsForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values for one input, e.g. `bacs_sort_code`.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.fields.insert(name.into(), values);
    }

    pub fn with(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.insert(name, values);
        self
    }

    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Build from flat request pairs such as `("bacs_iban[1]", "GB00...")`.
    /// Gaps between indices are padded with empty strings and names outside
    /// the account fields are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (key, value) in pairs {
            let Some((name, index)) = parse_indexed_name(key.as_ref()) else {
                continue;
            };
            if !is_account_field(name) {
                continue;
            }
            if index >= MAX_ACCOUNTS {
                warn!(field = name, index, "account index out of range, ignoring");
                continue;
            }

            let values = form.fields.entry(name.to_string()).or_default();
            if values.len() <= index {
                values.resize(index + 1, String::new());
            }
            values[index] = value.into();
        }
        form
    }

    /// The form that, submitted unchanged, would reproduce `records`.
    pub fn from_records(records: &[BankAccountRecord]) -> Self {
        let mut form = Self::new();
        for field in ACCOUNT_FIELDS {
            let values = records
                .iter()
                .map(|record| field_value(record, field).to_string())
                .collect();
            form.insert(input_name(field), values);
        }
        form
    }

    /// Reassemble the submitted lists into records. The record count is the
    /// longest list; missing entries become empty strings.
    pub fn records(&self) -> Vec<BankAccountRecord> {
        let count = ACCOUNT_FIELDS
            .iter()
            .filter_map(|field| self.fields.get(&input_name(field)))
            .map(Vec::len)
            .max()
            .unwrap_or(0);

        (0..count)
            .map(|index| {
                let value = |field: &str| {
                    self.fields
                        .get(&input_name(field))
                        .and_then(|values| values.get(index))
                        .cloned()
                        .unwrap_or_default()
                };
                BankAccountRecord {
                    index,
                    account_name: value("account_name"),
                    account_number: value("account_number"),
                    bank_name: value("bank_name"),
                    sort_code: value("sort_code"),
                    iban: value("iban"),
                    bic: value("bic"),
                }
            })
            .collect()
    }
}

pub fn input_name(field: &str) -> String {
    format!("{}{}", FIELD_PREFIX, field)
}

pub(crate) fn field_value<'a>(record: &'a BankAccountRecord, field: &str) -> &'a str {
    match field {
        "account_name" => &record.account_name,
        "account_number" => &record.account_number,
        "bank_name" => &record.bank_name,
        "sort_code" => &record.sort_code,
        "iban" => &record.iban,
        "bic" => &record.bic,
        _ => "",
    }
}

fn is_account_field(name: &str) -> bool {
    name.strip_prefix(FIELD_PREFIX)
        .is_some_and(|field| ACCOUNT_FIELDS.contains(&field))
}

fn parse_indexed_name(key: &str) -> Option<(&str, usize)> {
    let (name, rest) = key.split_once('[')?;
    let index = rest.strip_suffix(']')?.parse().ok()?;
    Some((name, index))
}
