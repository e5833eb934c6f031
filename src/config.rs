use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::DEFAULT_REGISTRY_FILE;
use crate::validation::{PhoneRule, Rules};

/// What registration does when the entered Id is already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Re-prompt for another Id
    #[default]
    Reject,
    /// Replace the stored record once the new one validates
    Overwrite,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            other => Err(format!("Unknown duplicate policy: {other}")),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub registry_file: PathBuf,
    pub phone_rule: PhoneRule,
    pub enforce_luhn: bool,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_file: PathBuf::from(DEFAULT_REGISTRY_FILE),
            phone_rule: PhoneRule::default(),
            enforce_luhn: false,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let registry_file = env::var("REGISTRY_FILE")
            .unwrap_or_else(|_| DEFAULT_REGISTRY_FILE.to_string())
            .into();

        let phone_rule = env::var("PHONE_RULE")
            .unwrap_or_else(|_| "digits".to_string())
            .parse()?;

        let enforce_luhn = parse_bool(
            &env::var("ENFORCE_LUHN").unwrap_or_else(|_| "false".to_string()),
        )
        .ok_or("Invalid ENFORCE_LUHN")?;

        let duplicate_policy = env::var("DUPLICATE_POLICY")
            .unwrap_or_else(|_| "reject".to_string())
            .parse()?;

        Ok(Config {
            registry_file,
            phone_rule,
            enforce_luhn,
            duplicate_policy,
        })
    }

    /// Field rules derived from this configuration
    pub fn rules(&self) -> Rules {
        Rules {
            phone_rule: self.phone_rule,
            enforce_luhn: self.enforce_luhn,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
