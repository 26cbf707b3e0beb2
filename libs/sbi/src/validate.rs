//! NF Identifier and Attribute Validation
//!
//! Pure predicates and canonicalizers for the values carried in NF profiles.
//! Error messages are embedded verbatim in the `detail` field of the
//! ProblemDetails returned to the client.

use thiserror::Error;
use uuid::Uuid;

use crate::types::{NfStatus, NfType};

/// Heart-beat interval bounds in seconds.
pub const HEART_BEAT_TIMER_MIN: i32 = 1;
pub const HEART_BEAT_TIMER_MAX: i32 = 3600;

/// Validation failure; the display string is the client-visible detail.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("NFInstanceId is invalid: {0}")]
    InvalidNfInstanceId(String),

    #[error("NFType is invalid")]
    InvalidNfType,

    #[error("NFStatus is invalid")]
    InvalidNfStatus,

    #[error("HeartBeatTimer is out of range")]
    InvalidHeartBeatTimer,

    #[error("{0} must be greater than or equal to 1")]
    InvalidQueryParameter(&'static str),
}

/// Check that an NF instance id is a syntactically valid UUID (any case).
pub fn check_nf_instance_id(nf_instance_id: &str) -> Result<(), ValidationError> {
    if nf_instance_id.is_empty() {
        return Err(ValidationError::Required("NFProfile.NFInstanceId"));
    }
    Uuid::parse_str(nf_instance_id)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidNfInstanceId(e.to_string()))
}

/// Canonical (lowercase) form of an NF instance id.
pub fn canonicalize_nf_instance_id(nf_instance_id: &str) -> String {
    nf_instance_id.to_lowercase()
}

/// Check membership in the closed set of NF type tokens.
pub fn check_nf_type(nf_type: &str) -> Result<(), ValidationError> {
    if nf_type.is_empty() {
        return Err(ValidationError::Required("NFProfile.NFType"));
    }
    NfType::from_str(nf_type)
        .map(|_| ())
        .ok_or(ValidationError::InvalidNfType)
}

/// Check membership in the NF status set.
pub fn check_nf_status(nf_status: &str) -> Result<(), ValidationError> {
    if nf_status.is_empty() {
        return Err(ValidationError::Required("NFProfile.NFStatus"));
    }
    NfStatus::from_str(nf_status)
        .map(|_| ())
        .ok_or(ValidationError::InvalidNfStatus)
}

/// Check the heart-beat interval. Zero means "not supplied" and bypasses the
/// range check.
pub fn check_heart_beat_timer(heart_beat_timer: i32) -> Result<(), ValidationError> {
    if heart_beat_timer == 0 {
        return Ok(());
    }
    if !(HEART_BEAT_TIMER_MIN..=HEART_BEAT_TIMER_MAX).contains(&heart_beat_timer) {
        return Err(ValidationError::InvalidHeartBeatTimer);
    }
    Ok(())
}

/// Check that a shared-data id is present.
pub fn check_shared_data_id(shared_data_id: &str) -> Result<(), ValidationError> {
    if shared_data_id.is_empty() {
        return Err(ValidationError::Required("SharedData.SharedDataId"));
    }
    Ok(())
}

/// Canonical (lowercase) form of a shared-data id.
pub fn canonicalize_shared_data_id(shared_data_id: &str) -> String {
    shared_data_id.to_lowercase()
}
