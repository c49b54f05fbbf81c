//! The client facade: route, compose, send, decode, check errors.

use crate::adapters::http::HttpTransport;
use crate::core::binder::{self, Envelope};
use crate::core::router::ApiRequest;
use crate::core::uri;
use crate::domain::model::{
    CampusListResponse, CustomFieldLabelsResponse, IndividualProfilesResponse,
    LookupTableResponse, UpdateIndividualProfileResponse,
};
use crate::domain::ports::{ConfigProvider, Transport};
use crate::domain::request::{
    CampusListRequest, CustomFieldLabelsRequest, IndividualProfilesRequest, LookupTableRequest,
    LookupTableType, UpdateIndividualProfileRequest,
};
use crate::utils::error::{CcbError, Result};
use std::io::BufReader;
use url::Url;

/// Client for one church's CCB API.
///
/// Holds only immutable configuration, so a single instance can serve
/// concurrent callers. Every call is one independent POST; nothing is
/// retried or cached here.
pub struct CcbClient<T: Transport> {
    api_base: Url,
    transport: T,
}

impl CcbClient<HttpTransport> {
    /// Client for `https://<church>.ccbchurch.com/api.php`.
    pub fn for_church(church: &str, username: &str, password: &str) -> Result<Self> {
        let api_base = church_api_base(church)?;
        let transport = HttpTransport::new(username, password)?;
        Ok(Self::new(api_base, transport))
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_base = config.api_base()?;
        let transport = HttpTransport::builder(config.username(), config.password())
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()?;
        Ok(Self::new(api_base, transport))
    }
}

impl<T: Transport> CcbClient<T> {
    pub fn new(api_base: Url, transport: T) -> Self {
        Self {
            api_base,
            transport,
        }
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Host of the API base, safe to log; the full URI may carry tokens.
    pub fn api_host(&self) -> &str {
        self.api_base.host_str().unwrap_or_default()
    }

    /// Send one request and decode its response.
    ///
    /// Fails with [`CcbError::ServiceError`] when the response carries a
    /// non-empty `<errors>` section, even if a payload is also present.
    pub async fn invoke<R: ApiRequest>(&self, request: &R) -> Result<Envelope<R::Response>> {
        let route = request.route();
        let uri = uri::compose(&self.api_base, route.operation, &route.params)?;
        let form = request.form();

        tracing::debug!(
            "Calling CCB service '{}' ({} query params, {} form fields)",
            route.operation,
            route.params.len(),
            form.len()
        );

        let stream = self.transport.send(&uri, &form).await?;
        // decode takes the reader by value, so the stream is dropped on every path.
        let envelope = binder::decode::<R::Response, _>(BufReader::new(stream))?;

        match envelope.errors {
            Some(errors) if !errors.is_empty() => {
                tracing::warn!(
                    "CCB service '{}' reported {} error(s)",
                    route.operation,
                    errors.len()
                );
                Err(CcbError::ServiceError { errors })
            }
            errors => Ok(Envelope {
                errors,
                payload: envelope.payload,
            }),
        }
    }

    /// One profile by id, login/password or MICR, or all profiles.
    ///
    /// See [`IndividualProfilesRequest`] for which selector wins when several
    /// are set.
    pub async fn get_individual_profiles(
        &self,
        request: &IndividualProfilesRequest,
    ) -> Result<Envelope<IndividualProfilesResponse>> {
        self.invoke(request).await
    }

    pub async fn get_custom_field_labels(&self) -> Result<Envelope<CustomFieldLabelsResponse>> {
        self.invoke(&CustomFieldLabelsRequest).await
    }

    pub async fn get_lookup_table(
        &self,
        table: LookupTableType,
    ) -> Result<Envelope<LookupTableResponse>> {
        self.invoke(&LookupTableRequest::new(table)).await
    }

    pub async fn update_individual_profile(
        &self,
        request: &UpdateIndividualProfileRequest,
    ) -> Result<Envelope<UpdateIndividualProfileResponse>> {
        if request.is_empty() {
            tracing::warn!(
                "Update for individual {} has no fields; CCB will only echo the profile",
                request.individual_id
            );
        }
        self.invoke(request).await
    }

    pub async fn get_campus_list(&self) -> Result<Envelope<CampusListResponse>> {
        self.invoke(&CampusListRequest).await
    }
}

pub fn church_api_base(church: &str) -> Result<Url> {
    if church.is_empty()
        || !church
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(CcbError::InvalidConfigValueError {
            field: "church".to_string(),
            value: church.to_string(),
            reason: "Church identifier may only contain letters, digits and '-'".to_string(),
        });
    }
    Ok(Url::parse(&format!("https://{}.ccbchurch.com/api.php", church))?)
}
