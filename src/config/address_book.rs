use crate::domain::model::Address;
use crate::utils::error::{PackingError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_ADDRESS_CONFIG: &str = "config.json";

/// Ship-from and ship-to addresses printed on every packing slip.
///
/// JSON files use the `FROM_ADDRESS`/`TO_ADDRESS` keys; TOML files use
/// `[from]` and `[to]` tables. Either spelling is accepted in both formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressBook {
    #[serde(rename = "FROM_ADDRESS", alias = "from", default)]
    pub from: Address,
    #[serde(rename = "TO_ADDRESS", alias = "to", default)]
    pub to: Address,
}

impl AddressBook {
    /// Built-in addresses used when no usable configuration exists.
    pub fn placeholder() -> Self {
        let mut from_locality = serde_json::Map::new();
        from_locality.insert("city".into(), "Default City".into());
        from_locality.insert("country".into(), "Default Country".into());

        let mut to_locality = serde_json::Map::new();
        to_locality.insert("city_province".into(), "Default Province".into());
        to_locality.insert("area".into(), "Default Area".into());

        Self {
            from: Address {
                name: "Default From Name".to_string(),
                line1: "Default From Line 1".to_string(),
                line2: None,
                locality: from_locality,
                postcode: "00000".to_string(),
            },
            to: Address {
                name: "Default To Name".to_string(),
                line1: "Default To Line 1".to_string(),
                line2: None,
                locality: to_locality,
                postcode: "00000".to_string(),
            },
        }
    }

    /// Reads the address book, picking TOML or JSON by file extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        serde_json::from_str(&processed).map_err(|e| PackingError::ConfigError {
            message: format!("JSON parsing error: {}", e),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| PackingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads the address book, falling back to [`placeholder`](Self::placeholder)
    /// when the file is missing or unusable. Never fails.
    pub fn load_or_placeholder<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(book) => {
                tracing::debug!("Loaded addresses from {}", path.display());
                book
            }
            Err(PackingError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "{} not found; using placeholder addresses",
                    path.display()
                );
                Self::placeholder()
            }
            Err(e) => {
                tracing::error!(
                    "Could not load {}: {}; using placeholder addresses",
                    path.display(),
                    e
                );
                Self::placeholder()
            }
        }
    }
}

/// Replaces `${VAR}` with the environment value; unset variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}
