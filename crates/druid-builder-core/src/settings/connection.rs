//! Connection tab: endpoint, retries, auth and TLS
//!
//! Plain settings live in `jsonData` under `connection.*`. Secrets live in
//! `secureJsonData`, and once saved the host only returns a presence flag
//! for each of them in `secureJsonFields`.

use super::{from_bag, to_bag};
use crate::editor::fields::{coerce_number, NumberInput};
use crate::model::SettingsBag;
use druid_builder_core_types::Sensitive;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// User name the Polaris API key is sent with
pub const POLARIS_API_KEY_USER: &str = "APIKEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable_retry_max: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable_retry_wait_min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable_retry_wait_max: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_tls: Option<bool>,
    #[serde(rename = "mTLS", default, skip_serializing_if = "Option::is_none")]
    pub mtls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polaris_auth: Option<bool>,
    #[serde(flatten)]
    pub extra: SettingsBag,
}

impl ConnectionSettings {
    pub fn from_bag(bag: &SettingsBag) -> Self {
        from_bag(bag, "connection")
    }

    pub fn to_bag(&self) -> SettingsBag {
        to_bag(self, "connection")
    }
}

/// Secret connection values. Formatting never shows them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSecretSettings {
    #[serde(rename = "basicAuthPassword", default, skip_serializing_if = "Option::is_none")]
    pub basic_auth_password: Option<Sensitive<String>>,
    #[serde(rename = "mTLSCert", default, skip_serializing_if = "Option::is_none")]
    pub mtls_cert: Option<Sensitive<String>>,
    #[serde(rename = "mTLSKey", default, skip_serializing_if = "Option::is_none")]
    pub mtls_key: Option<Sensitive<String>>,
    #[serde(rename = "mTLSCa", default, skip_serializing_if = "Option::is_none")]
    pub mtls_ca: Option<Sensitive<String>>,
}

impl ConnectionSecretSettings {
    pub fn from_bag(bag: &SettingsBag) -> Self {
        from_bag(bag, "connection secrets")
    }

    pub fn to_bag(&self) -> SettingsBag {
        to_bag(self, "connection secrets")
    }

    pub fn get(&self, field: SecretField) -> Option<&Sensitive<String>> {
        match field {
            SecretField::BasicAuthPassword => self.basic_auth_password.as_ref(),
            SecretField::MtlsCert => self.mtls_cert.as_ref(),
            SecretField::MtlsKey => self.mtls_key.as_ref(),
            SecretField::MtlsCa => self.mtls_ca.as_ref(),
        }
    }

    fn slot(&mut self, field: SecretField) -> &mut Option<Sensitive<String>> {
        match field {
            SecretField::BasicAuthPassword => &mut self.basic_auth_password,
            SecretField::MtlsCert => &mut self.mtls_cert,
            SecretField::MtlsKey => &mut self.mtls_key,
            SecretField::MtlsCa => &mut self.mtls_ca,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretField {
    BasicAuthPassword,
    MtlsCert,
    MtlsKey,
    MtlsCa,
}

impl SecretField {
    pub const ALL: [SecretField; 4] = [
        SecretField::BasicAuthPassword,
        SecretField::MtlsCert,
        SecretField::MtlsKey,
        SecretField::MtlsCa,
    ];

    /// Key in the secret bag and the presence-flag bag
    pub fn key(&self) -> &'static str {
        match self {
            SecretField::BasicAuthPassword => "basicAuthPassword",
            SecretField::MtlsCert => "mTLSCert",
            SecretField::MtlsKey => "mTLSKey",
            SecretField::MtlsCa => "mTLSCa",
        }
    }
}

/// One change made in the connection tab
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEdit {
    Url(String),
    /// Numeric inputs carry the raw text typed
    RetryMax(String),
    RetryWaitMin(String),
    RetryWaitMax(String),
    BasicAuth(bool),
    BasicAuthUser(String),
    SkipTls(bool),
    Mtls(bool),
    PolarisAuth(bool),
    SetSecret {
        field: SecretField,
        value: Sensitive<String>,
    },
    /// Forget a saved secret: clears its value and its presence flag
    ResetSecret(SecretField),
    PolarisApiKey(Sensitive<String>),
    ResetPolarisApiKey,
}

impl ConnectionEdit {
    /// Name for log events; secret values never appear
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionEdit::Url(_) => "url",
            ConnectionEdit::RetryMax(_) => "retryableRetryMax",
            ConnectionEdit::RetryWaitMin(_) => "retryableRetryWaitMin",
            ConnectionEdit::RetryWaitMax(_) => "retryableRetryWaitMax",
            ConnectionEdit::BasicAuth(_) => "basicAuth",
            ConnectionEdit::BasicAuthUser(_) => "basicAuthUser",
            ConnectionEdit::SkipTls(_) => "skipTls",
            ConnectionEdit::Mtls(_) => "mTLS",
            ConnectionEdit::PolarisAuth(_) => "polarisAuth",
            ConnectionEdit::SetSecret { field, .. } | ConnectionEdit::ResetSecret(field) => field.key(),
            ConnectionEdit::PolarisApiKey(_) | ConnectionEdit::ResetPolarisApiKey => "apiKey",
        }
    }
}

/// What the connection tab edits: plain settings, secrets and their presence flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionSettingsOptions {
    pub settings: ConnectionSettings,
    pub secret_settings: ConnectionSecretSettings,
    pub secret_settings_fields: SettingsBag,
}

impl ConnectionSettingsOptions {
    /// Whether the host reports a saved value for `field`
    pub fn is_configured(&self, field: SecretField) -> bool {
        self.secret_settings_fields
            .get(field.key())
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn apply(&mut self, edit: ConnectionEdit) {
        match edit {
            ConnectionEdit::Url(url) => self.settings.url = Some(url),
            ConnectionEdit::RetryMax(raw) => set_number(&mut self.settings.retryable_retry_max, &raw),
            ConnectionEdit::RetryWaitMin(raw) => set_number(&mut self.settings.retryable_retry_wait_min, &raw),
            ConnectionEdit::RetryWaitMax(raw) => set_number(&mut self.settings.retryable_retry_wait_max, &raw),
            ConnectionEdit::BasicAuth(on) => self.settings.basic_auth = Some(on),
            ConnectionEdit::BasicAuthUser(user) => self.settings.basic_auth_user = Some(user),
            ConnectionEdit::SkipTls(on) => self.settings.skip_tls = Some(on),
            ConnectionEdit::Mtls(on) => self.settings.mtls = Some(on),
            ConnectionEdit::PolarisAuth(on) => self.settings.polaris_auth = Some(on),
            ConnectionEdit::SetSecret { field, value } => *self.secret_settings.slot(field) = Some(value),
            ConnectionEdit::ResetSecret(field) => self.reset_secret(field),
            ConnectionEdit::PolarisApiKey(key) => {
                self.settings.basic_auth_user = Some(POLARIS_API_KEY_USER.to_string());
                self.secret_settings.basic_auth_password = Some(key);
            }
            ConnectionEdit::ResetPolarisApiKey => {
                self.settings.basic_auth_user = Some(String::new());
                self.reset_secret(SecretField::BasicAuthPassword);
            }
        }
    }

    fn reset_secret(&mut self, field: SecretField) {
        *self.secret_settings.slot(field) = Some(Sensitive::new(String::new()));
        self.secret_settings_fields
            .insert(field.key().to_string(), Value::Bool(false));
    }
}

fn set_number(target: &mut Option<Number>, raw: &str) {
    match coerce_number(raw) {
        NumberInput::Valid(n) => *target = Some(n),
        NumberInput::Empty => *target = None,
        NumberInput::Invalid => {
            tracing::debug!(input = raw, "connection number input does not parse, unchanged");
        }
    }
}
