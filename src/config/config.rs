use crate::service::pipeline::PipelineConfig;
use crate::service::retry::RetryConfig;
use dotenv::dotenv;
use std::fmt::Debug;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://www.sofascore.com/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Plain HTTPS against the API, JSON body as-is.
    Direct,
    /// Scraping proxy that wraps the upstream answer in a base64 envelope.
    Proxy,
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(TransportKind::Direct),
            "proxy" => Ok(TransportKind::Proxy),
            other => Err(format!("unknown transport '{other}', expected 'direct' or 'proxy'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub kind: TransportKind,
    pub proxy_api_url: Option<String>,
    pub proxy_api_key: Option<String>,
    pub requests_per_second: f64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_ca_file: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    /// Reverse proxy whose forwarded headers are trusted when throttling the trigger.
    pub trusted_proxy_ip: Option<IpAddr>,
    pub api_base_url: String,
    pub transport: TransportKind,
    pub proxy_api_url: Option<String>,
    pub proxy_api_key: Option<String>,
    pub requests_per_second: f64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub request_timeout_secs: u64,
    pub statistics_page_limit: i64,
    pub seed_club_ids: Vec<i32>,
    pub seed_league_id: i32,
    pub crawl_rounds: u32,
}

impl Config {
    pub fn init() -> Config {
        dotenv().ok();
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let transport: TransportKind = env_or("TRANSPORT", TransportKind::Direct);

        let proxy_api_url = non_empty_var("PROXY_API_URL");
        let proxy_api_key = non_empty_var("PROXY_API_KEY");
        if transport == TransportKind::Proxy {
            assert!(proxy_api_url.is_some(), "PROXY_API_URL must be set when TRANSPORT=proxy");
            assert!(proxy_api_key.is_some(), "PROXY_API_KEY must be set when TRANSPORT=proxy");
        }

        Config {
            database_url,
            database_ca_file: non_empty_var("DATABASE_CA_FILE"),
            server_host: env_or("SERVER_HOST", "127.0.0.1".to_string()),
            server_port: env_or("SERVER_PORT", 8080),
            trusted_proxy_ip: non_empty_var("TRUSTED_PROXY_IP").map(|ip| {
                ip.trim()
                    .parse()
                    .unwrap_or_else(|e| panic!("Failed to parse TRUSTED_PROXY_IP: {e:?}"))
            }),
            api_base_url: env_or("API_BASE_URL", DEFAULT_API_BASE_URL.to_string()),
            transport,
            proxy_api_url,
            proxy_api_key,
            requests_per_second: env_or("REQUESTS_PER_SECOND", 0.5),
            max_retries: env_or("MAX_RETRIES", 2),
            retry_backoff_ms: env_or("RETRY_BACKOFF_MS", 5000),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            statistics_page_limit: env_or("STATISTICS_PAGE_LIMIT", 10),
            seed_club_ids: parse_club_ids(&std::env::var("SEED_CLUB_IDS").unwrap_or_default()),
            seed_league_id: env_or("SEED_LEAGUE_ID", 1),
            crawl_rounds: env_or("CRAWL_ROUNDS", 1),
        }
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            kind: self.transport,
            proxy_api_url: self.proxy_api_url.clone(),
            proxy_api_key: self.proxy_api_key.clone(),
            requests_per_second: self.requests_per_second,
        }
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            backoff: Duration::from_millis(self.retry_backoff_ms),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            api_base_url: self.api_base_url.trim_end_matches('/').to_string(),
            statistics_page_limit: self.statistics_page_limit.max(1),
            seed_club_ids: self.seed_club_ids.clone(),
            seed_league_id: self.seed_league_id,
            crawl_rounds: self.crawl_rounds.max(1),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match non_empty_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .unwrap_or_else(|e| panic!("Failed to parse {key}: {e:?}")),
        None => default,
    }
}

/// Parses a comma separated list of upstream team ids, skipping blanks and junk.
pub fn parse_club_ids(raw: &str) -> Vec<i32> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<i32>() {
            Ok(id) if !ids.contains(&id) => ids.push(id),
            Ok(_) => {}
            Err(_) => log::warn!("Ignoring invalid club id '{}' in SEED_CLUB_IDS", part),
        }
    }
    ids
}
