pub mod rate_limiter;
pub mod real_ip_key_extractor;
pub mod run_guard;
