// Process-wide configuration. Constants are fixed at compile time; the
// only runtime knobs are a couple of environment overrides read once in
// `Config::from_env`.

/// Base URL of the Google Keep REST API.
pub const API_BASE: &str = "https://keep.googleapis.com/v1";

/// OAuth scopes the access token must carry.
pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/keep"];

/// Environment variable consulted when the credential helper yields nothing.
pub const TOKEN_ENV_VAR: &str = "GOOGLE_ACCESS_TOKEN";

/// Credential helper invoked to print an access token.
pub const DEFAULT_TOKEN_COMMAND: &[&str] = &["gcloud", "auth", "print-access-token"];

/// Role granted by `share` when `--role` is not given.
pub const DEFAULT_ROLE: &str = "WRITER";

const API_BASE_ENV_VAR: &str = "KEEP_API_BASE";
const TOKEN_COMMAND_ENV_VAR: &str = "KEEP_TOKEN_COMMAND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub token_env_var: String,
    pub token_command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: API_BASE.to_string(),
            token_env_var: TOKEN_ENV_VAR.to_string(),
            token_command: DEFAULT_TOKEN_COMMAND.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Build the configuration, honouring `KEEP_API_BASE` and
    /// `KEEP_TOKEN_COMMAND` when they are set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(base) = lookup(API_BASE_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }

        if let Some(cmd) = lookup(TOKEN_COMMAND_ENV_VAR) {
            let parts: Vec<String> = cmd.split_whitespace().map(str::to_string).collect();
            if !parts.is_empty() {
                config.token_command = parts;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_keep() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.api_base, "https://keep.googleapis.com/v1");
        assert_eq!(config.token_env_var, "GOOGLE_ACCESS_TOKEN");
        assert_eq!(config.token_command, vec!["gcloud", "auth", "print-access-token"]);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("KEEP_API_BASE", "http://127.0.0.1:9000/v1/"),
            ("KEEP_TOKEN_COMMAND", "  my-helper  --print "),
        ]));
        assert_eq!(config.api_base, "http://127.0.0.1:9000/v1");
        assert_eq!(config.token_command, vec!["my-helper", "--print"]);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let config = Config::from_lookup(lookup_from(&[
            ("KEEP_API_BASE", "   "),
            ("KEEP_TOKEN_COMMAND", ""),
        ]));
        assert_eq!(config, Config::default());
    }
}
