use anyhow::{Context, Result};
use clap::Parser;
use std::{env, fmt};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Shared secret every upload request must present.
    pub upload_password: String,
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    /// S3-compatible endpoint the presigned URLs point at.
    pub endpoint: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Pre-signed upload URL issuer for R2")]
pub struct Args {
    /// Host to bind to (overrides UPLOAD_URL_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides UPLOAD_URL_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Storage endpoint (overrides R2_ENDPOINT and the account-derived default)
    #[arg(long)]
    pub endpoint: Option<String>,
}

impl AppConfig {
    /// Parse CLI args and the process environment into an AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::from_sources(Args::parse(), |name| env::var(name).ok())
    }

    /// Build the config from parsed args and an environment lookup.
    pub fn from_sources<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .with_context(|| format!("missing required environment variable {}", name))
        };

        // --- Environment fallback ---
        let env_host = lookup("UPLOAD_URL_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let env_port = match lookup("UPLOAD_URL_PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing UPLOAD_URL_PORT value `{}`", value))?,
            None => 8787,
        };

        let account_id = required("ACCOUNT_ID")?;
        let env_endpoint = lookup("R2_ENDPOINT")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| r2_endpoint(&account_id));

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            upload_password: required("UPLOAD_PASSWORD")?,
            access_key_id: required("R2_ACCESS_KEY_ID")?,
            secret_access_key: required("R2_SECRET_ACCESS_KEY")?,
            bucket_name: required("BUCKET_NAME")?,
            endpoint: args.endpoint.unwrap_or(env_endpoint),
            account_id,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Account-scoped R2 endpoint.
pub fn r2_endpoint(account_id: &str) -> String {
    format!("https://{}.r2.cloudflarestorage.com", account_id)
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("upload_password", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("bucket_name", &self.bucket_name)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env_of(&[
            ("UPLOAD_PASSWORD", "hunter2"),
            ("ACCOUNT_ID", "abc123"),
            ("R2_ACCESS_KEY_ID", "AKID"),
            ("R2_SECRET_ACCESS_KEY", "very-secret"),
            ("BUCKET_NAME", "uploads"),
        ])
    }

    #[test]
    fn defaults_and_account_endpoint() {
        let env = full_env();
        let cfg = AppConfig::from_sources(Args::default(), |k| env.get(k).cloned()).unwrap();

        assert_eq!(cfg.addr(), "0.0.0.0:8787");
        assert_eq!(cfg.endpoint, "https://abc123.r2.cloudflarestorage.com");
        assert_eq!(cfg.bucket_name, "uploads");
        assert_eq!(cfg.upload_password, "hunter2");
    }

    #[test]
    fn args_override_environment() {
        let mut env = full_env();
        env.insert("UPLOAD_URL_PORT".into(), "9000".into());
        env.insert("R2_ENDPOINT".into(), "http://localhost:9001".into());
        let args = Args {
            host: Some("127.0.0.1".into()),
            port: Some(4000),
            endpoint: None,
        };

        let cfg = AppConfig::from_sources(args, |k| env.get(k).cloned()).unwrap();

        assert_eq!(cfg.addr(), "127.0.0.1:4000");
        assert_eq!(cfg.endpoint, "http://localhost:9001");
    }

    #[test]
    fn missing_secret_is_an_error() {
        let mut env = full_env();
        env.remove("UPLOAD_PASSWORD");

        let err = AppConfig::from_sources(Args::default(), |k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("UPLOAD_PASSWORD"));
    }

    #[test]
    fn bad_port_is_an_error() {
        let mut env = full_env();
        env.insert("UPLOAD_URL_PORT".into(), "eighty".into());

        let err = AppConfig::from_sources(Args::default(), |k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("UPLOAD_URL_PORT"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let env = full_env();
        let cfg = AppConfig::from_sources(Args::default(), |k| env.get(k).cloned()).unwrap();
        let rendered = format!("{:?}", cfg);

        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("AKID"));
    }
}
