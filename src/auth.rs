// Bearer token resolution. The credential helper is tried first; any
// failure there (missing binary, non-zero exit, blank output) silently
// falls through to the environment variable. Nothing is cached: every
// call to `resolve` runs the whole chain again.

use crate::config::Config;
use crate::error::{KeepError, Result};
use log::debug;
use std::process::{Command, Stdio};

#[derive(Debug, Clone)]
pub struct TokenProvider {
    helper: Vec<String>,
    env_var: String,
}

impl TokenProvider {
    /// `helper` is a program followed by its arguments; an empty vector
    /// disables the helper entirely.
    pub fn new(helper: Vec<String>, env_var: impl Into<String>) -> Self {
        TokenProvider {
            helper,
            env_var: env_var.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.token_command.clone(), config.token_env_var.clone())
    }

    /// Return a non-empty access token or `KeepError::NoToken`.
    pub fn resolve(&self) -> Result<String> {
        if let Some(token) = self.from_helper() {
            debug!("using access token from credential helper `{}`", self.helper[0]);
            return Ok(token);
        }

        match std::env::var(&self.env_var) {
            Ok(token) if !token.trim().is_empty() => {
                debug!("using access token from ${}", self.env_var);
                Ok(token.trim().to_string())
            }
            _ => Err(KeepError::NoToken {
                env_var: self.env_var.clone(),
            }),
        }
    }

    fn from_helper(&self) -> Option<String> {
        let (program, args) = self.helper.split_first()?;
        let output = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                debug!("credential helper `{}` unavailable: {}", program, e);
                return None;
            }
        };

        if !output.status.success() {
            debug!("credential helper `{}` exited with {}", program, output.status);
            return None;
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            debug!("credential helper `{}` printed no token", program);
            return None;
        }
        Some(token)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn helper(cmd: &[&str]) -> Vec<String> {
        cmd.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn helper_output_is_trimmed() {
        let provider = TokenProvider::new(helper(&["echo", "  ya29.helper  "]), "KEEP_CLI_UNIT_UNSET_1");
        assert_eq!(provider.resolve().unwrap(), "ya29.helper");
    }

    #[test]
    fn failing_helper_falls_back_to_env() {
        std::env::set_var("KEEP_CLI_UNIT_TOKEN_2", "ya29.env");
        let provider = TokenProvider::new(helper(&["false"]), "KEEP_CLI_UNIT_TOKEN_2");
        assert_eq!(provider.resolve().unwrap(), "ya29.env");
    }

    #[test]
    fn blank_helper_output_falls_back_to_env() {
        std::env::set_var("KEEP_CLI_UNIT_TOKEN_3", "ya29.env3");
        let provider = TokenProvider::new(helper(&["true"]), "KEEP_CLI_UNIT_TOKEN_3");
        assert_eq!(provider.resolve().unwrap(), "ya29.env3");
    }

    #[test]
    fn missing_helper_and_unset_env_is_a_credential_error() {
        let provider = TokenProvider::new(
            helper(&["keep-cli-no-such-helper-binary"]),
            "KEEP_CLI_UNIT_UNSET_4",
        );
        let err = provider.resolve().unwrap_err();
        assert!(matches!(err, KeepError::NoToken { .. }));
        let msg = err.to_string();
        assert!(msg.contains("gcloud auth application-default login"));
        assert!(msg.contains("KEEP_CLI_UNIT_UNSET_4"));
    }

    #[test]
    fn empty_helper_uses_env_only() {
        std::env::set_var("KEEP_CLI_UNIT_TOKEN_5", "ya29.only-env");
        let provider = TokenProvider::new(Vec::new(), "KEEP_CLI_UNIT_TOKEN_5");
        assert_eq!(provider.resolve().unwrap(), "ya29.only-env");
    }
}
