use std::path::PathBuf;

use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, always ending in `/`.
    pub api_url: Url,
    /// Where the access/refresh pair is persisted between invocations.
    pub session_file: PathBuf,
    /// Total request timeout. Unset by default; the backend owns timeout policy.
    /// Set via QUICKCARE_TIMEOUT_SECS.
    pub timeout_secs: Option<u64>,
    /// Set via QUICKCARE_CONNECT_TIMEOUT_SECS. Default: 5.
    pub connect_timeout_secs: u64,
}

impl Config {
    /// Replace the backend URL (e.g. from `--api-url`).
    pub fn with_api_url(mut self, raw: &str) -> anyhow::Result<Self> {
        self.api_url = parse_base_url(raw)?;
        Ok(self)
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    from_lookup(|key| std::env::var(key).ok())
}

/// Build the config from any key lookup. `load` passes the process environment.
pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let api_url = parse_base_url(
        &lookup("QUICKCARE_API_URL").unwrap_or_else(|| "http://localhost:8000".into()),
    )?;

    let session_file = match lookup("QUICKCARE_SESSION_FILE") {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => lookup("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quickcare")
            .join("session.json"),
    };

    Ok(Config {
        api_url,
        session_file,
        timeout_secs: lookup("QUICKCARE_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0),
        connect_timeout_secs: lookup("QUICKCARE_CONNECT_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(5),
    })
}

fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| anyhow::anyhow!("QUICKCARE_API_URL '{}' is not a valid URL: {}", raw, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("QUICKCARE_API_URL must be http or https, got '{}'", url.scheme());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
