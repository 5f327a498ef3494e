use std::fmt;

use crate::error::{Error, Result};

pub const BASE_URL_VAR: &str = "PASSWORK_BASE_URL";
pub const API_KEY_VAR: &str = "PASSWORK_API_KEY";
pub const FZF_BIN_VAR: &str = "FZF_BIN";
pub const CLIP_BIN_VAR: &str = "CLIP_BIN";

const DEFAULT_FZF_BIN: &str = "fzf";

/// Settings for one run, read once from the environment.
#[derive(Clone, PartialEq)]
pub struct Config {
    /// API root without the trailing slash.
    pub base_url: String,
    pub api_key: String,
    pub fzf_bin: String,
    /// Clipboard command line, split on whitespace. `None` means autodetect.
    pub clip_bin: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = get(BASE_URL_VAR)
            .ok_or_else(|| missing(BASE_URL_VAR))?
            .trim_end_matches('/')
            .to_owned();
        let api_key = get(API_KEY_VAR).ok_or_else(|| missing(API_KEY_VAR))?;

        let fzf_bin = match get(FZF_BIN_VAR) {
            Some(bin) => expand(FZF_BIN_VAR, &bin)?,
            None => DEFAULT_FZF_BIN.to_owned(),
        };
        let clip_bin = match get(CLIP_BIN_VAR) {
            Some(bin) => Some(
                expand(CLIP_BIN_VAR, &bin)?
                    .split_whitespace()
                    .map(str::to_owned)
                    .collect(),
            ),
            None => None,
        };

        Ok(Config {
            base_url,
            api_key,
            fzf_bin,
            clip_bin,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("fzf_bin", &self.fzf_bin)
            .field("clip_bin", &self.clip_bin)
            .finish()
    }
}

fn missing(name: &str) -> Error {
    Error::Config(format!("{} environment variable is not set", name))
}

fn expand(name: &str, value: &str) -> Result<String> {
    shellexpand::full(value)
        .map(|v| v.into_owned())
        .map_err(|e| Error::Config(format!("{} is invalid: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = config(&[
            (BASE_URL_VAR, "https://passwork.example.com/api/v4/"),
            (API_KEY_VAR, "key"),
        ])
        .unwrap();
        assert_eq!(config.base_url, "https://passwork.example.com/api/v4");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.fzf_bin, "fzf");
        assert_eq!(config.clip_bin, None);
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = config(&[(BASE_URL_VAR, "https://p.example.com")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn blank_base_url_is_a_config_error() {
        let err = config(&[(BASE_URL_VAR, "  "), (API_KEY_VAR, "key")]).unwrap_err();
        assert!(err.to_string().contains(BASE_URL_VAR));
    }

    #[test]
    fn clip_bin_keeps_its_arguments() {
        let config = config(&[
            (BASE_URL_VAR, "https://p.example.com"),
            (API_KEY_VAR, "key"),
            (FZF_BIN_VAR, "/opt/fzf/bin/fzf"),
            (CLIP_BIN_VAR, "xclip -selection clipboard"),
        ])
        .unwrap();
        assert_eq!(config.fzf_bin, "/opt/fzf/bin/fzf");
        assert_eq!(
            config.clip_bin,
            Some(vec![
                "xclip".to_owned(),
                "-selection".to_owned(),
                "clipboard".to_owned()
            ])
        );
    }

    #[test]
    fn debug_hides_api_key() {
        let config = config(&[
            (BASE_URL_VAR, "https://p.example.com"),
            (API_KEY_VAR, "super-secret-key"),
        ])
        .unwrap();
        assert!(!format!("{:?}", config).contains("super-secret-key"));
    }
}
