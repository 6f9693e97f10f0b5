//! PayPal standard. Refunds go through the PayPal API, so they need the API
//! credentials for whichever environment the gateway is pointed at.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{parse_flag, ConfigError, GatewaysConfig};
use crate::database::{OptionStore, OptionStoreExt};
use crate::logging::mask_secret;
use crate::payments::capabilities::{CapabilitySet, PRODUCTS, REFUNDS};
use crate::payments::error::PaymentResult;
use crate::payments::gateway::{PaymentGateway, Readiness};
use crate::payments::types::GatewayMode;

pub const GATEWAY_ID: &str = "paypal";
/// Option key for [`PayPalSettings`], used for both reads and writes
pub const SETTINGS_OPTION: &str = "paypal_settings";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPalSettings {
    pub testmode: bool,
    pub email: String,
    pub api_username: String,
    pub api_password: String,
    pub api_signature: String,
    pub sandbox_api_username: String,
    pub sandbox_api_password: String,
    pub sandbox_api_signature: String,
}

impl PayPalSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let var = |name: &str| std::env::var(name).unwrap_or_default();

        Ok(Self {
            testmode: parse_flag("PAYPAL_TESTMODE", &var("PAYPAL_TESTMODE"))?,
            email: var("PAYPAL_EMAIL"),
            api_username: var("PAYPAL_API_USERNAME"),
            api_password: var("PAYPAL_API_PASSWORD"),
            api_signature: var("PAYPAL_API_SIGNATURE"),
            sandbox_api_username: var("PAYPAL_SANDBOX_API_USERNAME"),
            sandbox_api_password: var("PAYPAL_SANDBOX_API_PASSWORD"),
            sandbox_api_signature: var("PAYPAL_SANDBOX_API_SIGNATURE"),
        })
    }

    pub fn mode(&self) -> GatewayMode {
        if self.testmode {
            GatewayMode::Test
        } else {
            GatewayMode::Live
        }
    }

    /// API credentials for the active mode, keyed by setting name
    pub fn active_credentials(&self) -> [(&'static str, &str); 3] {
        match self.mode() {
            GatewayMode::Test => [
                ("sandbox_api_username", self.sandbox_api_username.as_str()),
                ("sandbox_api_password", self.sandbox_api_password.as_str()),
                ("sandbox_api_signature", self.sandbox_api_signature.as_str()),
            ],
            GatewayMode::Live => [
                ("api_username", self.api_username.as_str()),
                ("api_password", self.api_password.as_str()),
                ("api_signature", self.api_signature.as_str()),
            ],
        }
    }

    pub fn missing_credentials(&self) -> Vec<&'static str> {
        self.active_credentials()
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}

pub struct PayPalGateway {
    capabilities: CapabilitySet,
    enabled: bool,
    settings: PayPalSettings,
    store: Arc<dyn OptionStore>,
}

impl PayPalGateway {
    /// Build from the persisted settings; defaults when nothing is stored.
    pub fn from_store(store: Arc<dyn OptionStore>) -> PaymentResult<Self> {
        let settings: PayPalSettings = store.get_typed(SETTINGS_OPTION)?.unwrap_or_default();
        Ok(Self::with_settings(settings, store))
    }

    /// Persisted settings win over the environment.
    pub fn from_config(config: &GatewaysConfig, store: Arc<dyn OptionStore>) -> PaymentResult<Self> {
        let settings: PayPalSettings = store
            .get_typed(SETTINGS_OPTION)?
            .unwrap_or_else(|| config.paypal.clone());
        let mut gateway = Self::with_settings(settings, store);
        gateway.enabled = config.is_enabled(GATEWAY_ID);
        Ok(gateway)
    }

    fn with_settings(settings: PayPalSettings, store: Arc<dyn OptionStore>) -> Self {
        let gateway = Self {
            capabilities: [PRODUCTS, REFUNDS].into_iter().collect(),
            enabled: true,
            settings,
            store,
        };
        gateway.log_settings("paypal settings loaded");
        gateway
    }

    pub fn settings(&self) -> &PayPalSettings {
        &self.settings
    }

    pub fn save_settings(&mut self, settings: PayPalSettings) -> PaymentResult<()> {
        self.store.set_typed(SETTINGS_OPTION, &settings)?;
        self.settings = settings;
        self.log_settings("paypal settings saved");
        Ok(())
    }

    fn log_settings(&self, message: &str) {
        let username = self.settings.active_credentials()[0].1;
        info!(
            gateway = GATEWAY_ID,
            mode = ?self.settings.mode(),
            api_username = %mask_secret(username),
            missing = self.settings.missing_credentials().len(),
            "{}",
            message
        );
    }
}

impl PaymentGateway for PayPalGateway {
    fn id(&self) -> &str {
        GATEWAY_ID
    }

    fn title(&self) -> &str {
        "PayPal"
    }

    fn method_title(&self) -> &str {
        "PayPal Standard"
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

    fn readiness(&self) -> Readiness {
        let missing = self.settings.missing_credentials();
        if missing.is_empty() {
            Readiness::Ready
        } else {
            Readiness::MissingCredentials(missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryOptionStore;

    fn sandbox_settings() -> PayPalSettings {
        PayPalSettings {
            testmode: true,
            sandbox_api_username: "test".to_string(),
            sandbox_api_password: "test".to_string(),
            sandbox_api_signature: "test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_live_mode_without_credentials() {
        let gateway = PayPalGateway::from_store(Arc::new(InMemoryOptionStore::new())).unwrap();
        assert_eq!(gateway.settings().mode(), GatewayMode::Live);
        assert_eq!(
            gateway.readiness(),
            Readiness::MissingCredentials(vec!["api_username", "api_password", "api_signature"])
        );
    }

    #[test]
    fn sandbox_credentials_satisfy_test_mode_only() {
        let mut settings = sandbox_settings();
        assert!(settings.missing_credentials().is_empty());

        settings.testmode = false;
        assert_eq!(settings.missing_credentials().len(), 3);
    }

    #[test]
    fn only_empty_credentials_count_as_missing() {
        let mut settings = sandbox_settings();
        settings.sandbox_api_signature = "  ".to_string();
        assert!(settings.missing_credentials().is_empty());

        settings.sandbox_api_signature.clear();
        assert_eq!(settings.missing_credentials(), vec!["sandbox_api_signature"]);
    }

    #[test]
    fn saved_settings_are_read_back_by_new_gateway() {
        let store: Arc<dyn OptionStore> = Arc::new(InMemoryOptionStore::new());
        let mut gateway = PayPalGateway::from_store(store.clone()).unwrap();
        gateway.save_settings(sandbox_settings()).unwrap();
        assert!(gateway.readiness().is_ready());

        let reloaded = PayPalGateway::from_store(store).unwrap();
        assert_eq!(reloaded.settings(), &sandbox_settings());
    }

    #[test]
    fn stored_settings_win_over_config() {
        let store: Arc<dyn OptionStore> = Arc::new(InMemoryOptionStore::new());
        store.set_typed(SETTINGS_OPTION, &sandbox_settings()).unwrap();

        let config = GatewaysConfig::default();
        let gateway = PayPalGateway::from_config(&config, store).unwrap();
        assert!(gateway.settings().testmode);
        assert!(gateway.is_enabled());
    }

    #[test]
    fn config_settings_used_when_nothing_stored() {
        let config = GatewaysConfig {
            paypal: sandbox_settings(),
            ..Default::default()
        };
        let gateway =
            PayPalGateway::from_config(&config, Arc::new(InMemoryOptionStore::new())).unwrap();
        assert!(gateway.readiness().is_ready());
    }

    #[test]
    fn settings_tolerate_partial_documents() {
        let settings: PayPalSettings =
            serde_json::from_value(serde_json::json!({"testmode": true})).unwrap();
        assert!(settings.testmode);
        assert!(settings.sandbox_api_username.is_empty());
    }
}
