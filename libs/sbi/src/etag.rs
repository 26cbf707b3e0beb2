//! Response Entity Tags
//!
//! SHA-1 entity tags for conditional GET. Strong tags are quoted hex
//! digests, weak tags carry the `W/` prefix.

use sha1::{Digest, Sha1};

/// Conditional-GET configuration.
#[derive(Debug, Clone, Copy)]
pub struct EtagConfig {
    /// Emit weak (`W/`) validators instead of strong ones.
    pub weak_validation: bool,
    /// Cache-Control max-age in seconds.
    pub cache_max_age: u32,
}

impl Default for EtagConfig {
    fn default() -> Self {
        Self {
            weak_validation: false,
            cache_max_age: 3600,
        }
    }
}

/// Compute the entity tag for a response body.
pub fn generate_etag(data: &[u8], weak: bool) -> String {
    let digest = hex::encode(Sha1::digest(data));
    if weak {
        format!("W/\"{digest}\"")
    } else {
        format!("\"{digest}\"")
    }
}

/// Strip the optional `W/` prefix and one surrounding quote pair.
fn clean_tag(tag: &str) -> &str {
    let tag = tag.strip_prefix("W/").unwrap_or(tag);
    if tag.len() >= 2 && tag.starts_with('"') && tag.ends_with('"') {
        &tag[1..tag.len() - 1]
    } else {
        tag
    }
}

/// Compare a client tag against the server tag. Strong comparison requires
/// the client tag not be a weak validator.
pub fn compare_etags(client_tag: &str, server_tag: &str, weak_compare: bool) -> bool {
    let client = clean_tag(client_tag);
    let server = clean_tag(server_tag);
    if weak_compare {
        client == server
    } else {
        client == server && !client_tag.starts_with("W/")
    }
}
