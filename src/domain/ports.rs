use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::Read;
use std::time::Duration;
use url::Url;

/// Response body handed back by a transport. Dropping it releases it.
pub type ResponseStream = Box<dyn Read + Send>;

/// Performs the HTTP exchange for the client.
///
/// Implementations POST `form` to `uri` and return the body of a 2xx
/// response. Connection reuse, TLS, timeouts and retries live here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, uri: &Url, form: &[(String, String)]) -> Result<ResponseStream>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> Result<Url>;
    fn username(&self) -> &str;
    fn password(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn user_agent(&self) -> Option<&str>;
}
