//! Nnrf-nfm Handlers
//!
//! HTTP-facing operations of the NF management service: register-or-replace,
//! retrieve, deregister and paginated listing for NF instances, the
//! shared-data variants behind the `allowed_shared_data` gate, and the
//! OAuth2 token endpoint.

use nrf_sbi::constants::{api, content_type, header, param, resource};
use nrf_sbi::message::{
    self, error_kind, not_found, registration_error, SbiRequest, SbiResponse,
};
use nrf_sbi::model::{NfProfile, SharedData, UriList};
use nrf_sbi::validate::{
    canonicalize_nf_instance_id, canonicalize_shared_data_id, check_heart_beat_timer,
    check_nf_instance_id, check_nf_status, check_nf_type, check_shared_data_id,
    ValidationError,
};
use nrf_sbi::form_location;

use crate::config::NrfConf;
use crate::context::{Registry, Upsert};
use crate::oauth::{parse_form, OAuth2Service, TokenGrant};

/// Feature tokens accepted in a requester-features filter.
const REQUESTER_FEATURES: &[&str] = &["ipv4", "ipv6", "tls", "http2", "service-auth"];

/// The NRF application: registry, configuration and token service, built
/// once at startup and shared by every handler binding.
pub struct Nrf {
    pub registry: Registry,
    pub conf: NrfConf,
    pub oauth: OAuth2Service,
}

impl Nrf {
    pub fn new(conf: NrfConf) -> anyhow::Result<Self> {
        let oauth = OAuth2Service::new(
            conf.oauth2_client_id.clone(),
            conf.oauth2_client_secret.clone(),
        )?;
        Ok(Self {
            registry: Registry::new(),
            conf,
            oauth,
        })
    }

    /// PUT /nnrf-nfm/v1/nf-instances/{nfInstanceID}
    ///
    /// Register when the id is absent (201 + Location), replace the whole
    /// profile when it is present (200). The presence check and the write
    /// happen in one exclusive store section.
    pub fn handle_nf_register_or_replacement(
        &self,
        request: &SbiRequest,
        nf_instance_id: &str,
    ) -> SbiResponse {
        let nf_instance_id = canonicalize_nf_instance_id(nf_instance_id);
        log::info!("[{nf_instance_id}] NFRegister/NFProfileCompleteReplacement request");

        let mut profile: NfProfile = match serde_json::from_slice(&request.body) {
            Ok(profile) => profile,
            Err(e) => {
                log::error!("[{nf_instance_id}] NFRegister request body bind failed: {e}");
                return registration_error(&e.to_string());
            }
        };

        if let Err(e) = check_nf_register_ies(&profile) {
            log::error!("[{nf_instance_id}] NFRegister request check failed: {e}");
            return registration_error(&e.to_string());
        }

        handle_nf_register_ies(&mut profile, &self.conf);

        let instance = NfProfile {
            nf_instance_id: nf_instance_id.clone(),
            ..profile
        };

        match self.registry.upsert(instance.clone()) {
            Upsert::Created => {
                log::info!("[{nf_instance_id}] NF registered");
                let location = form_location(
                    request,
                    api::NNRF_NFM,
                    api::V1,
                    resource::NF_INSTANCES,
                    &nf_instance_id,
                );
                SbiResponse::with_status(201)
                    .with_header(header::LOCATION, location)
                    .with_json(&instance)
            }
            Upsert::Replaced => {
                log::info!("[{nf_instance_id}] NF profile replaced");
                SbiResponse::ok().with_json(&instance)
            }
        }
    }

    /// GET /nnrf-nfm/v1/nf-instances/{nfInstanceID}
    pub fn handle_nf_profile_retrieve(
        &self,
        request: &SbiRequest,
        nf_instance_id: &str,
    ) -> SbiResponse {
        let nf_instance_id = canonicalize_nf_instance_id(nf_instance_id);
        log::info!("[{nf_instance_id}] NFProfileRetrieve request");

        let Some(instance) = self.registry.find(&nf_instance_id) else {
            log::error!("[{nf_instance_id}] NFProfileRetrieve NFInstance not found");
            return not_found("NFInstanceId not found");
        };

        if let Some(required) = parse_requester_features(request) {
            let supported: Vec<&str> = instance
                .nf_services
                .iter()
                .map(|s| s.supported_features.as_str())
                .collect();
            if !match_features(&required, &supported) {
                log::error!("[{nf_instance_id}] NFProfileRetrieve features not supported");
                return message::forbidden("request Features not supported");
            }
        }

        SbiResponse::ok()
            .with_json(&instance)
            .with_header(header::CACHE_CONTROL, "no-cache")
    }

    /// DELETE /nnrf-nfm/v1/nf-instances/{nfInstanceID}
    pub fn handle_nf_deregister(&self, nf_instance_id: &str) -> SbiResponse {
        let nf_instance_id = canonicalize_nf_instance_id(nf_instance_id);
        log::info!("[{nf_instance_id}] NFDeregister request");

        if !self.registry.remove(&nf_instance_id) {
            log::error!("[{nf_instance_id}] NFDeregister NFInstanceId not found");
            return not_found("NFInstanceId not found");
        }
        log::info!("[{nf_instance_id}] NF deregistered");
        SbiResponse::no_content()
    }

    /// GET /nnrf-nfm/v1/nf-instances
    pub fn handle_nf_list_retrieve(&self, request: &SbiRequest) -> SbiResponse {
        log::info!("NFListRetrieve request");

        let nf_type = request.param(param::NF_TYPE).unwrap_or_default().to_string();
        if !nf_type.is_empty() {
            if let Err(e) = check_nf_type(&nf_type) {
                log::error!("NFListRetrieve query check failed: {e}");
                return message::bad_request(&e.to_string());
            }
        }

        let limit = match parse_list_param(request, param::LIMIT) {
            Ok(v) => v,
            Err(e) => return message::bad_request(&e.to_string()),
        };
        let page_number = match parse_list_param(request, param::PAGE_NUMBER) {
            Ok(v) => v,
            Err(e) => return message::bad_request(&e.to_string()),
        };
        let page_size = match parse_list_param(request, param::PAGE_SIZE) {
            Ok(v) => v,
            Err(e) => return message::bad_request(&e.to_string()),
        };

        let mut uri_list = UriList::default();
        if !nf_type.is_empty() {
            let page = match self.registry.list_page(&nf_type, page_number, page_size, limit) {
                Ok(page) => page,
                Err(e) => {
                    log::error!("NFListRetrieve query UriList not found: {e}");
                    return not_found(&format!("UriList not found:{e}"));
                }
            };
            uri_list.total_item_count = page.len() as i32;
            for instance in &page {
                uri_list.links.push(form_location(
                    request,
                    api::NNRF_NFM,
                    api::V1,
                    resource::NF_INSTANCES,
                    &instance.nf_instance_id,
                ));
            }
        }

        SbiResponse::ok().with_json_as(content_type::APPLICATION_3GPP_HAL_JSON, &uri_list)
    }

    /// PUT /nnrf-nfm/v1/shared-data/{sharedDataId}
    pub fn handle_shared_data_register_or_replacement(
        &self,
        request: &SbiRequest,
        shared_data_id: &str,
    ) -> SbiResponse {
        if let Some(denied) = self.shared_data_gate() {
            return denied;
        }

        let shared_data_id = canonicalize_shared_data_id(shared_data_id);
        log::info!("[{shared_data_id}] NFRegister (SharedData) request");

        let mut data: SharedData = match serde_json::from_slice(&request.body) {
            Ok(data) => data,
            Err(e) => {
                log::error!("[{shared_data_id}] SharedData request body bind failed: {e}");
                return message::bad_request(&e.to_string());
            }
        };

        if let Err(e) = check_shared_data_ies(&data) {
            log::error!("[{shared_data_id}] SharedData request check failed: {e}");
            return message::bad_request(&e.to_string());
        }

        handle_shared_data_ies(&mut data);

        let record = SharedData {
            shared_data_id: shared_data_id.clone(),
            ..data
        };

        match self.registry.shared_upsert(record.clone()) {
            Upsert::Created => {
                log::info!("[{shared_data_id}] SharedData registered");
                let location = form_location(
                    request,
                    api::NNRF_NFM,
                    api::V1,
                    resource::SHARED_DATA,
                    &shared_data_id,
                );
                SbiResponse::with_status(201)
                    .with_header(header::LOCATION, location)
                    .with_json(&record)
            }
            Upsert::Replaced => {
                log::info!("[{shared_data_id}] SharedData replaced");
                SbiResponse::ok().with_json(&record)
            }
        }
    }

    /// GET /nnrf-nfm/v1/shared-data/{sharedDataId}
    pub fn handle_shared_data_retrieve(
        &self,
        request: &SbiRequest,
        shared_data_id: &str,
    ) -> SbiResponse {
        if let Some(denied) = self.shared_data_gate() {
            return denied;
        }

        let shared_data_id = canonicalize_shared_data_id(shared_data_id);
        log::info!("[{shared_data_id}] NFSharedDataRetrieve request");

        let Some(record) = self.registry.shared_find(&shared_data_id) else {
            log::error!("[{shared_data_id}] NFSharedDataRetrieve SharedData not found");
            return not_found("SharedDataId not found");
        };

        if let Some(required) = parse_requester_features(request) {
            let supported: Vec<&str> = record
                .shared_profile_data
                .iter()
                .flat_map(|p| p.nf_services.iter())
                .map(|s| s.supported_features.as_str())
                .collect();
            if !match_features(&required, &supported) {
                log::error!("[{shared_data_id}] NFSharedDataRetrieve features not supported");
                return message::forbidden("request Features not supported");
            }
        }

        SbiResponse::ok()
            .with_json(&record)
            .with_header(header::CACHE_CONTROL, "no-cache")
    }

    /// DELETE /nnrf-nfm/v1/shared-data/{sharedDataId}
    pub fn handle_shared_data_deregister(&self, shared_data_id: &str) -> SbiResponse {
        if let Some(denied) = self.shared_data_gate() {
            return denied;
        }

        let shared_data_id = canonicalize_shared_data_id(shared_data_id);
        log::info!("[{shared_data_id}] NFDeregister (SharedData) request");

        if !self.registry.shared_remove(&shared_data_id) {
            log::error!("[{shared_data_id}] NFDeregister SharedDataId not found");
            return not_found("SharedDataId not found");
        }
        SbiResponse::no_content()
    }

    /// POST /oauth2/token
    pub fn handle_access_token(&self, request: &SbiRequest) -> SbiResponse {
        log::info!("AccessToken request");

        let fields = parse_form(&request.body);
        let client_id = fields.get("client_id").map(String::as_str).unwrap_or("");
        let client_secret = fields
            .get("client_secret")
            .map(String::as_str)
            .unwrap_or("");
        let grant_type = fields.get("grant_type").map(String::as_str).unwrap_or("");

        match self.oauth.grant(client_id, client_secret, grant_type) {
            TokenGrant::Issued {
                access_token,
                expires_in,
            } => SbiResponse::ok().with_json(&serde_json::json!({
                "access_token": access_token,
                "token_type": "Bearer",
                "expires_in": expires_in,
            })),
            TokenGrant::InvalidClient => error_kind(401, "invalid_client"),
            TokenGrant::UnsupportedGrantType => error_kind(400, "unsupported_grant_type"),
            TokenGrant::SigningFailed => error_kind(500, "failed_to_generate_token"),
        }
    }

    /// The shared-data master gate; evaluated before the store is consulted.
    fn shared_data_gate(&self) -> Option<SbiResponse> {
        if self.conf.allowed_shared_data {
            None
        } else {
            log::info!("SharedData request denied: feature not allowed");
            Some(error_kind(403, "SharedData feature not allowed"))
        }
    }
}

/// Mandatory and conditional IE checks for a registration body. The first
/// failing predicate decides the response.
fn check_nf_register_ies(profile: &NfProfile) -> Result<(), ValidationError> {
    log::debug!("Start CheckNFInstanceId: {}", profile.nf_instance_id);
    check_nf_instance_id(&profile.nf_instance_id)?;
    log::debug!("Start CheckNFType: {}", profile.nf_type);
    check_nf_type(&profile.nf_type)?;
    log::debug!("Start CheckNFStatus: {}", profile.nf_status);
    check_nf_status(&profile.nf_status)?;
    log::debug!("Start CheckHeartBeatTimer: {}", profile.heart_beat_timer);
    check_heart_beat_timer(profile.heart_beat_timer)?;
    Ok(())
}

/// Field handlers applied after validation: canonicalize the id and apply
/// the heart-beat acceptance policy.
fn handle_nf_register_ies(profile: &mut NfProfile, conf: &NrfConf) {
    profile.nf_instance_id = canonicalize_nf_instance_id(&profile.nf_instance_id);
    if !conf.accept_nf_heart_beat_timer || profile.heart_beat_timer == 0 {
        profile.heart_beat_timer = conf.default_heart_beat_timer;
    }
}

fn check_shared_data_ies(data: &SharedData) -> Result<(), ValidationError> {
    log::debug!("Start CheckSharedDataId: {}", data.shared_data_id);
    check_shared_data_id(&data.shared_data_id)?;
    Ok(())
}

fn handle_shared_data_ies(data: &mut SharedData) {
    data.shared_data_id = canonicalize_shared_data_id(&data.shared_data_id);
}

/// Parse the requester-features filter from the query. An absent parameter,
/// or one carrying any token outside the closed feature set, disables the
/// filter.
fn parse_requester_features(request: &SbiRequest) -> Option<Vec<String>> {
    let raw = request.param(param::REQUESTER_FEATURES)?;
    let features: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    if features.is_empty() || features.iter().any(|f| !REQUESTER_FEATURES.contains(&f.as_str()))
    {
        log::debug!("requester-features filter not applicable: {raw}");
        return None;
    }
    Some(features)
}

/// Every required feature must appear in the supported set.
fn match_features(required: &[String], supported: &[&str]) -> bool {
    required.iter().all(|r| supported.contains(&r.as_str()))
}

/// Parse a list query parameter: absent or zero defaults to 1, negatives
/// and non-integers are rejected.
fn parse_list_param(
    request: &SbiRequest,
    name: &'static str,
) -> Result<i32, ValidationError> {
    let Some(raw) = request.param(name) else {
        return Ok(1);
    };
    let value: i32 = raw
        .parse()
        .map_err(|_| ValidationError::InvalidQueryParameter(name))?;
    if value < 0 {
        return Err(ValidationError::InvalidQueryParameter(name));
    }
    if value == 0 {
        return Ok(1);
    }
    Ok(value)
}
