//! # Demo Configuration
//!
//! Configuration for the demo session: slot capacity, supported coin
//! denominations, and the seed float.
//!
//! Defaults are baked in; setting `VENDO_DEMO_CONFIG` to a JSON object
//! overrides them, e.g.:
//!
//! ```text
//! VENDO_DEMO_CONFIG='{"slotCapacity":4,"coins":["0.25","1.00"],"float":{"0.25":8}}'
//! ```

use std::collections::BTreeMap;
use std::env;

use serde::Deserialize;

use vendo_core::{Money, ValidationError};

/// Environment variable holding a JSON override of [`DemoConfig`].
const CONFIG_ENV_VAR: &str = "VENDO_DEMO_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoConfig {
    /// Number of product slots in the demo machine.
    pub slot_capacity: usize,

    /// Supported coin denominations, as two-decimal-place strings.
    pub coins: Vec<String>,

    /// Seed float: denomination → starting count. Denominations not listed
    /// start at zero.
    pub float: BTreeMap<String, u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            slot_capacity: 10,
            coins: ["0.10", "0.20", "0.50", "1.00"]
                .map(String::from)
                .to_vec(),
            float: [("0.10", 3), ("0.20", 2), ("0.50", 7), ("1.00", 1)]
                .into_iter()
                .map(|(coin, count)| (coin.to_string(), count))
                .collect(),
        }
    }
}

impl DemoConfig {
    /// Loads the configuration: defaults, overridden by the
    /// `VENDO_DEMO_CONFIG` environment variable when present.
    pub fn load() -> Result<Self, serde_json::Error> {
        match env::var(CONFIG_ENV_VAR) {
            Ok(raw) => serde_json::from_str(&raw),
            Err(_) => Ok(DemoConfig::default()),
        }
    }

    /// The denomination set, parsed.
    pub fn denominations(&self) -> Result<Vec<Money>, ValidationError> {
        self.coins.iter().map(|coin| Money::parse(coin)).collect()
    }

    /// The seed float, parsed.
    pub fn float(&self) -> Result<Vec<(Money, u64)>, ValidationError> {
        self.float
            .iter()
            .map(|(coin, &count)| Ok((Money::parse(coin)?, count)))
            .collect()
    }
}
