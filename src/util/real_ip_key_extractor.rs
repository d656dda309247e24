use crate::AppState;
use actix_governor::{KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::web;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Throttling key for the trigger endpoint: the peer address, or the forwarded client address
/// when the peer is the configured reverse proxy.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RealIpKeyExtractor;

impl KeyExtractor for RealIpKeyExtractor {
    type Key = IpAddr;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let trusted_proxy_ip = req
            .app_data::<web::Data<AppState>>()
            .and_then(|data| data.trusted_proxy_ip);
        let peer_ip = req.peer_addr().map(|socket| socket.ip()).ok_or_else(|| {
            SimpleKeyExtractionError::new("Could not extract peer IP address from request")
        })?;

        if trusted_proxy_ip != Some(peer_ip) {
            return Ok(peer_ip);
        }

        let forwarded = req
            .connection_info()
            .realip_remote_addr()
            .and_then(parse_ip);
        forwarded.ok_or_else(|| {
            SimpleKeyExtractionError::new("Could not extract real IP address from request")
        })
    }
}

fn parse_ip(addr: &str) -> Option<IpAddr> {
    SocketAddr::from_str(addr)
        .map(|socket| socket.ip())
        .or_else(|_| IpAddr::from_str(addr))
        .ok()
}
