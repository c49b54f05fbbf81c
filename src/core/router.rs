//! Maps request values onto a CCB service name and its query parameters.

use crate::core::binder::XmlEntity;
use crate::domain::model::{
    CampusListResponse, CustomFieldLabelsResponse, IndividualProfilesResponse,
    LookupTableResponse, UpdateIndividualProfileResponse,
};
use crate::domain::request::{
    CampusListRequest, CustomFieldLabelsRequest, IndividualProfilesRequest, LookupTableRequest,
    UpdateIndividualProfileRequest,
};

/// Ordered key/value pairs; order is kept on the wire.
pub type Params = Vec<(String, String)>;

pub const INDIVIDUAL_PROFILE_FROM_ID: &str = "individual_profile_from_id";
pub const INDIVIDUAL_PROFILE_FROM_LOGIN_PASSWORD: &str = "individual_profile_from_login_password";
pub const INDIVIDUAL_PROFILE_FROM_MICR: &str = "individual_profile_from_micr";
pub const INDIVIDUAL_PROFILES: &str = "individual_profiles";
pub const CUSTOM_FIELD_LABELS: &str = "custom_field_labels";
pub const CAMPUS_LIST: &str = "campus_list";
pub const UPDATE_INDIVIDUAL: &str = "update_individual";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub operation: &'static str,
    pub params: Params,
}

impl Route {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }
}

/// A request the client knows how to send, and the payload it decodes into.
pub trait ApiRequest {
    type Response: XmlEntity;

    fn route(&self) -> Route;

    /// Form body fields sent with the POST.
    fn form(&self) -> Params {
        Vec::new()
    }
}

struct Selector {
    operation: &'static str,
    applies: fn(&IndividualProfilesRequest) -> bool,
    params: fn(&IndividualProfilesRequest) -> Params,
}

/// Evaluated top to bottom; the last entry always applies.
static PROFILE_SELECTORS: [Selector; 4] = [
    Selector {
        operation: INDIVIDUAL_PROFILE_FROM_ID,
        applies: has_id,
        params: id_params,
    },
    Selector {
        operation: INDIVIDUAL_PROFILE_FROM_LOGIN_PASSWORD,
        applies: has_login,
        params: login_params,
    },
    Selector {
        operation: INDIVIDUAL_PROFILE_FROM_MICR,
        applies: has_micr,
        params: micr_params,
    },
    Selector {
        operation: INDIVIDUAL_PROFILES,
        applies: always,
        params: listing_params,
    },
];

fn has_id(r: &IndividualProfilesRequest) -> bool {
    r.id != 0
}

fn id_params(r: &IndividualProfilesRequest) -> Params {
    vec![("individual_id".to_string(), r.id.to_string())]
}

fn has_login(r: &IndividualProfilesRequest) -> bool {
    r.login.is_some() && r.password.is_some()
}

fn login_params(r: &IndividualProfilesRequest) -> Params {
    vec![
        ("login".to_string(), r.login.clone().unwrap_or_default()),
        ("password".to_string(), r.password.clone().unwrap_or_default()),
    ]
}

fn has_micr(r: &IndividualProfilesRequest) -> bool {
    r.routing_number.is_some() && r.account_number.is_some()
}

fn micr_params(r: &IndividualProfilesRequest) -> Params {
    vec![
        (
            "routing_number".to_string(),
            r.routing_number.clone().unwrap_or_default(),
        ),
        (
            "account_number".to_string(),
            r.account_number.clone().unwrap_or_default(),
        ),
    ]
}

fn always(_: &IndividualProfilesRequest) -> bool {
    true
}

fn listing_params(r: &IndividualProfilesRequest) -> Params {
    let mut params = Params::new();
    if let Some(since) = r.modified_since {
        params.push((
            "modified_since".to_string(),
            since.format("%Y-%m-%d").to_string(),
        ));
    }
    if let Some(include) = r.include_inactive {
        params.push(("include_inactive".to_string(), include.to_string()));
    }
    if r.page != 0 {
        params.push(("page".to_string(), r.page.to_string()));
    }
    if r.per_page != 0 {
        params.push(("per_page".to_string(), r.per_page.to_string()));
    }
    params
}

/// Pick the profile service for a request. Never fails.
pub fn route_individual_profiles(request: &IndividualProfilesRequest) -> Route {
    let mut matching = PROFILE_SELECTORS.iter().filter(|s| (s.applies)(request));

    let selector = match matching.next() {
        Some(selector) => selector,
        None => &PROFILE_SELECTORS[PROFILE_SELECTORS.len() - 1],
    };

    let shadowed: Vec<&str> = matching
        .filter(|s| s.operation != INDIVIDUAL_PROFILES)
        .map(|s| s.operation)
        .collect();
    if !shadowed.is_empty() {
        tracing::debug!(
            "Request also matches {:?}; using {}",
            shadowed,
            selector.operation
        );
    }

    Route {
        operation: selector.operation,
        params: (selector.params)(request),
    }
}

impl ApiRequest for IndividualProfilesRequest {
    type Response = IndividualProfilesResponse;

    fn route(&self) -> Route {
        route_individual_profiles(self)
    }
}

impl ApiRequest for CustomFieldLabelsRequest {
    type Response = CustomFieldLabelsResponse;

    fn route(&self) -> Route {
        Route::new(CUSTOM_FIELD_LABELS)
    }
}

impl ApiRequest for CampusListRequest {
    type Response = CampusListResponse;

    fn route(&self) -> Route {
        Route::new(CAMPUS_LIST)
    }
}

impl ApiRequest for LookupTableRequest {
    type Response = LookupTableResponse;

    fn route(&self) -> Route {
        Route::new(self.table.service_name())
    }
}

impl ApiRequest for UpdateIndividualProfileRequest {
    type Response = UpdateIndividualProfileResponse;

    fn route(&self) -> Route {
        Route::new(UPDATE_INDIVIDUAL).param("individual_id", self.individual_id.to_string())
    }

    fn form(&self) -> Params {
        self.fields()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
