use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FolioError, Result};

#[derive(Deserialize, Serialize, Default, Debug, PartialEq)]
pub struct Config {
    /// Project URL, e.g. https://abcd.supabase.co
    pub url: Option<String>,
    pub anon_key: Option<String>,
    #[serde(default)]
    pub buckets: Buckets,
}

/// Storage bucket names used for uploads.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Buckets {
    pub logo: String,
    pub hero_images: String,
    pub resume: String,
}

impl Default for Buckets {
    fn default() -> Self {
        Self {
            logo: "logo".to_string(),
            hero_images: "debs_hero".to_string(),
            resume: "resume".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| FolioError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| FolioError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "folio")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(FolioError::NoConfigDir)
    }

    /// Backend URL with env var taking precedence over config file
    pub fn url(&self) -> Result<Url> {
        let raw = std::env::var("FOLIO_URL")
            .ok()
            .or_else(|| self.url.clone())
            .ok_or(FolioError::MissingUrl)?;

        Url::parse(raw.trim_end_matches('/')).map_err(|_| FolioError::InvalidUrl(raw))
    }

    /// Anon key with env var taking precedence over config file
    pub fn anon_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var("FOLIO_ANON_KEY") {
            return Ok(key);
        }

        self.anon_key.clone().ok_or(FolioError::MissingAnonKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config_uses_default_buckets() {
        let config = Config::parse(
            r#"
url = "https://abcd.supabase.co"
anon_key = "public-anon"
"#,
        )
        .unwrap();
        assert_eq!(config.url.as_deref(), Some("https://abcd.supabase.co"));
        assert_eq!(config.buckets, Buckets::default());
        assert_eq!(config.buckets.hero_images, "debs_hero");
    }

    #[test]
    fn test_parse_bucket_override() {
        let config = Config::parse(
            r#"
[buckets]
logo = "project-logos"
"#,
        )
        .unwrap();
        assert_eq!(config.buckets.logo, "project-logos");
        assert_eq!(config.buckets.resume, "resume");
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config {
            url: Some("https://x.supabase.co".into()),
            anon_key: Some("k".into()),
            buckets: Buckets::default(),
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }
}
