//! Resource URI Construction
//!
//! Rebuilds absolute resource URLs from the request context, honoring the
//! forwarding headers set by SBI proxies (SCP/SEPP) in front of the NRF.

use crate::constants::header;
use crate::message::SbiRequest;

/// Detect the effective scheme of a request.
///
/// Preference order: `X-Forwarded-Proto`, `X-Forwarded-Scheme`, then the
/// transport the connection actually arrived on.
pub fn detect_scheme(request: &SbiRequest) -> String {
    if let Some(proto) = request.header(header::X_FORWARDED_PROTO) {
        if !proto.is_empty() {
            return proto.to_string();
        }
    }
    if let Some(scheme) = request.header(header::X_FORWARDED_SCHEME) {
        if !scheme.is_empty() {
            return scheme.to_string();
        }
    }
    if request.tls {
        "https".to_string()
    } else {
        "http".to_string()
    }
}

/// Detect the effective authority (host[:port]) of a request.
///
/// `X-Forwarded-Host` wins; otherwise the Host header is completed with the
/// scheme's default port, falling back to the local listener's port.
pub fn detect_authority(request: &SbiRequest) -> String {
    if let Some(forwarded) = request.header(header::X_FORWARDED_HOST) {
        if !forwarded.is_empty() {
            return forwarded.to_string();
        }
    }
    let mut host = request.header(header::HOST).unwrap_or_default().to_string();
    if !host.contains(':') {
        match detect_scheme(request).as_str() {
            "http" => host.push_str(":80"),
            "https" => host.push_str(":443"),
            _ => host.push_str(&format!(":{}", request.local_port)),
        }
    }
    host
}

/// Form an absolute resource location:
/// `scheme://authority/apiName/apiVersion/resource/identity`.
pub fn form_location(
    request: &SbiRequest,
    api_name: &str,
    api_version: &str,
    resource: &str,
    identity: &str,
) -> String {
    format!(
        "{}://{}/{}/{}/{}/{}",
        detect_scheme(request),
        detect_authority(request),
        api_name,
        api_version,
        resource,
        identity
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_host(host: &str) -> SbiRequest {
        SbiRequest::new("PUT", "/nnrf-nfm/v1/nf-instances/x").with_header("Host", host)
    }

    #[test]
    fn test_scheme_from_forwarded_proto() {
        let request = request_with_host("nrf:7777").with_header("X-Forwarded-Proto", "https");
        assert_eq!(detect_scheme(&request), "https");
    }

    #[test]
    fn test_scheme_from_forwarded_scheme() {
        let request = request_with_host("nrf:7777").with_header("X-Forwarded-Scheme", "http");
        assert_eq!(detect_scheme(&request), "http");
    }

    #[test]
    fn test_scheme_from_transport() {
        let mut request = request_with_host("nrf:7777");
        assert_eq!(detect_scheme(&request), "http");
        request.tls = true;
        assert_eq!(detect_scheme(&request), "https");
    }

    #[test]
    fn test_authority_prefers_forwarded_host() {
        let request = request_with_host("127.0.0.1:7777")
            .with_header("X-Forwarded-Host", "nrf.5gc.example:443");
        assert_eq!(detect_authority(&request), "nrf.5gc.example:443");
    }

    #[test]
    fn test_authority_completes_default_port() {
        let request = request_with_host("nrf.5gc.example");
        assert_eq!(detect_authority(&request), "nrf.5gc.example:80");

        let mut tls_request = request_with_host("nrf.5gc.example");
        tls_request.tls = true;
        assert_eq!(detect_authority(&tls_request), "nrf.5gc.example:443");
    }

    #[test]
    fn test_authority_falls_back_to_listener_port() {
        let mut request =
            request_with_host("nrf.5gc.example").with_header("X-Forwarded-Proto", "coap");
        request.local_port = 7777;
        assert_eq!(detect_authority(&request), "nrf.5gc.example:7777");
    }

    #[test]
    fn test_form_location() {
        let request = request_with_host("127.0.0.1:7777");
        let location = form_location(
            &request,
            "nnrf-nfm",
            "v1",
            "nf-instances",
            "331a1fb2-3ac1-43df-a7d0-882d0ee44b7d",
        );
        assert_eq!(
            location,
            "http://127.0.0.1:7777/nnrf-nfm/v1/nf-instances/331a1fb2-3ac1-43df-a7d0-882d0ee44b7d"
        );
    }
}
