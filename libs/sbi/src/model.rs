//! Nnrf-nfm Data Model
//!
//! OpenAPI message structures for the NF management service, serialized with
//! the 3GPP camelCase wire names.

use serde::{Deserialize, Serialize};

/// NF profile as advertised by a network function and stored by the registry.
///
/// The mandatory fields (`nfInstanceId`, `nfType`, `nfStatus`) deserialize to
/// empty strings when absent; presence is enforced by the registration
/// validators so that a missing field surfaces as a ProblemDetails rather
/// than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NfProfile {
    pub nf_instance_id: String,
    pub nf_type: String,
    pub nf_status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nf_instance_name: String,
    /// Heart-beat interval in seconds; zero means "not supplied".
    pub heart_beat_timer: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nf_services: Vec<NfService>,
}

/// An endpoint advertised by an NF instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NfService {
    pub service_instance_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub supported_features: String,
}

/// Shared profile/service data addressable by its own identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedData {
    pub shared_data_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_profile_data: Option<NfProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_service_data: Option<NfService>,
}

/// RFC 7807 problem details envelope carried on every 4xx/5xx handler
/// response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: i32,
    pub detail: String,
    pub instance: String,
    pub cause: String,
}

impl ProblemDetails {
    pub fn with_status(status: i32) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = cause.into();
        self
    }
}

/// Shared-data identifiers referenced from a registration error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedDataIdList {
    pub shared_data_ids: Vec<String>,
}

/// Error envelope returned from the registration paths: problem details plus
/// the shared-data ids the profile referenced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NfProfileRegistrationError {
    pub problem_details: ProblemDetails,
    pub shared_data_id_list: SharedDataIdList,
}

impl NfProfileRegistrationError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            problem_details: ProblemDetails::with_status(400)
                .with_title("Bad Request")
                .with_detail(detail),
            shared_data_id_list: SharedDataIdList::default(),
        }
    }
}

/// Paginated listing response for `GET /nf-instances`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UriList {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    pub total_item_count: i32,
}
