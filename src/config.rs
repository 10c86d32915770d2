use tracing::{debug, warn};

use crate::error::AppError;

/// Runtime settings, read from the environment (and a `.env` file if present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Capacity of each repository actor's request channel.
    pub channel_buffer: usize,
    /// Base of public image links; the bucket name and object path are appended.
    pub storage_public_url: String,
    pub image_bucket: String,
    /// Load the demo categories and colleges at startup.
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 100,
            storage_public_url: "http://localhost:54321/storage/v1/object/public".to_string(),
            image_bucket: "product-images".to_string(),
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!(error = %e, "No .env file loaded");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("CHANNEL_BUFFER") {
            config.channel_buffer = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "CHANNEL_BUFFER must be a positive integer, got '{}'",
                        raw
                    ))
                })?;
        }
        if let Some(raw) = lookup("STORAGE_PUBLIC_URL") {
            let url = raw.trim();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(format!(
                    "STORAGE_PUBLIC_URL must be an http(s) URL, got '{}'",
                    raw
                )));
            }
            config.storage_public_url = url.to_string();
        }
        if let Some(raw) = lookup("IMAGE_BUCKET") {
            if raw.trim().is_empty() {
                return Err(AppError::Config("IMAGE_BUCKET cannot be empty".to_string()));
            }
            config.image_bucket = raw.trim().to_string();
        }
        if let Some(raw) = lookup("SEED_DEMO_DATA") {
            config.seed_demo_data = match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    warn!(value = %raw, "Unrecognised SEED_DEMO_DATA value");
                    return Err(AppError::Config(format!(
                        "SEED_DEMO_DATA must be true or false, got '{}'",
                        raw
                    )));
                }
            };
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("CHANNEL_BUFFER", "8"),
            ("STORAGE_PUBLIC_URL", "https://cdn.example.com/public"),
            ("IMAGE_BUCKET", "listings"),
            ("SEED_DEMO_DATA", "false"),
        ]))
        .unwrap();
        assert_eq!(config.channel_buffer, 8);
        assert_eq!(config.storage_public_url, "https://cdn.example.com/public");
        assert_eq!(config.image_bucket, "listings");
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for pairs in [
            [("CHANNEL_BUFFER", "0")],
            [("CHANNEL_BUFFER", "lots")],
            [("STORAGE_PUBLIC_URL", "ftp://x")],
            [("IMAGE_BUCKET", " ")],
            [("SEED_DEMO_DATA", "maybe")],
        ] {
            assert!(matches!(AppConfig::from_lookup(lookup(&pairs)), Err(AppError::Config(_))));
        }
    }
}
