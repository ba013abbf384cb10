//! Session defaults read from an optional config file and `LEASECALC_*`
//! environment variables. Command-line flags and keys set in an input
//! document take precedence over both.

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use lease_pricing_core::quote::format::QuoteLocale;

pub const ENV_PREFIX: &str = "LEASECALC";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub days_per_month: Option<Decimal>,
    pub term_months: Option<u32>,
    pub under15_diff: Option<Decimal>,
    pub deposit: Option<Decimal>,
    pub locale: Option<QuoteLocale>,
}

impl Settings {
    /// Layer the config file (if any) under the environment.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&str>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Fill keys an input document leaves out with these defaults.
    ///
    /// Pricing defaults go into the document's `parameters` object. The locale
    /// is only added to quote documents (those naming a client).
    pub fn fill_document(&self, document: &mut Value) {
        let Some(root) = document.as_object_mut() else {
            return;
        };

        if let Some(params) = root.get_mut("parameters").and_then(Value::as_object_mut) {
            fill_key(params, "days_per_month", self.days_per_month.map(decimal_value));
            fill_key(params, "term_months", self.term_months.map(Value::from));
            fill_key(params, "under15_diff", self.under15_diff.map(decimal_value));
            fill_key(params, "deposit", self.deposit.map(decimal_value));
        }

        if root.contains_key("client_name") {
            fill_key(root, "locale", self.locale.map(|l| Value::String(l.to_string())));
        }
    }
}

fn decimal_value(value: Decimal) -> Value {
    Value::String(value.to_string())
}

fn fill_key(object: &mut Map<String, Value>, key: &str, default: Option<Value>) {
    if let Some(default) = default {
        object.entry(key).or_insert(default);
    }
}
