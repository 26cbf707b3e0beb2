//! NRF SBI (Service Based Interface) Library
//!
//! Plumbing for the Nnrf service-based interface: the OpenAPI data model and
//! its validators, request/response message structures, content coding,
//! entity tags, resource URI construction and TLS configuration.
//!
//! # Modules
//!
//! - [`types`] - NF types, NF status values and URI schemes
//! - [`constants`] - HTTP status codes, headers, content types, resources
//! - [`model`] - Nnrf-nfm OpenAPI message structures
//! - [`validate`] - identifier/attribute predicates and canonicalizers
//! - [`message`] - SBI request/response values for the middleware pipeline
//! - [`codec`] - gzip/deflate body coding
//! - [`etag`] - conditional-GET entity tags
//! - [`uri`] - absolute resource URL construction
//! - [`tls`] - rustls configuration for server-TLS and mutual-TLS
//! - [`error`] - error types

pub mod codec;
pub mod constants;
pub mod error;
pub mod etag;
pub mod message;
pub mod model;
pub mod tls;
pub mod types;
pub mod uri;
pub mod validate;

pub use codec::{decode_body, encode_body, CodecError, ContentCoding};
pub use error::{SbiError, SbiResult};
pub use etag::{compare_etags, generate_etag, EtagConfig};
pub use message::{
    bad_request, error_kind, forbidden, internal_error, not_found, problem,
    registration_error, unsupported_media_type, SbiRequest, SbiResponse,
};
pub use model::{
    NfProfile, NfProfileRegistrationError, NfService, ProblemDetails, SharedData,
    SharedDataIdList, UriList,
};
pub use types::{NfStatus, NfType, UriScheme};
pub use uri::{detect_authority, detect_scheme, form_location};
pub use validate::{
    canonicalize_nf_instance_id, canonicalize_shared_data_id, check_heart_beat_timer,
    check_nf_instance_id, check_nf_status, check_nf_type, check_shared_data_id,
    ValidationError,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_validators_compose() {
        let profile = NfProfile {
            nf_instance_id: "331A1FB2-3AC1-43DF-A7D0-882D0EE44B7D".to_string(),
            nf_type: "AMF".to_string(),
            nf_status: "REGISTERED".to_string(),
            ..Default::default()
        };
        assert!(check_nf_instance_id(&profile.nf_instance_id).is_ok());
        assert!(check_nf_type(&profile.nf_type).is_ok());
        assert!(check_nf_status(&profile.nf_status).is_ok());
        assert_eq!(
            canonicalize_nf_instance_id(&profile.nf_instance_id),
            "331a1fb2-3ac1-43df-a7d0-882d0ee44b7d"
        );
    }
}
