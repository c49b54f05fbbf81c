use crate::domain::ports::{ResponseStream, Transport};
use crate::utils::error::{CcbError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::io::Cursor;
use std::time::Duration;
use url::Url;

/// reqwest-backed transport using HTTP basic auth.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    username: String,
    password: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(username: &str, password: &str) -> Result<Self> {
        Self::builder(username, password).build()
    }

    pub fn builder(username: &str, password: &str) -> HttpTransportBuilder {
        HttpTransportBuilder {
            username: username.to_string(),
            password: password.to_string(),
            timeout: None,
            user_agent: None,
        }
    }
}

pub struct HttpTransportBuilder {
    username: String,
    password: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl HttpTransportBuilder {
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: Option<&str>) -> Self {
        self.user_agent = user_agent.map(str::to_string);
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        if self.username.is_empty() {
            return Err(CcbError::config("API username must not be empty"));
        }

        let mut builder = Client::builder().user_agent(
            self.user_agent
                .unwrap_or_else(|| format!("ccb-api/{}", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpTransport {
            client: builder.build()?,
            username: self.username,
            password: self.password,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, uri: &Url, form: &[(String, String)]) -> Result<ResponseStream> {
        let response = self
            .client
            .post(uri.clone())
            .basic_auth(&self.username, Some(&self.password))
            .form(form)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());

        let body = response.error_for_status()?.bytes().await?;
        tracing::trace!("Read {} response bytes", body.len());

        Ok(Box::new(Cursor::new(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::io::Read;

    #[tokio::test]
    async fn test_send_posts_form_with_basic_auth() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .query_param("srv", "update_individual")
                // "api:secret"
                .header("authorization", "Basic YXBpOnNlY3JldA==")
                .header("content-type", "application/x-www-form-urlencoded")
                .body("first_name=Bob&last_name=Smith");
            then.status(200).body("<ccb_api/>");
        });

        let transport = HttpTransport::new("api", "secret").unwrap();
        let uri = Url::parse(&server.url("/api.php?srv=update_individual")).unwrap();
        let form = vec![
            ("first_name".to_string(), "Bob".to_string()),
            ("last_name".to_string(), "Smith".to_string()),
        ];

        let mut stream = transport.send(&uri, &form).await.unwrap();
        let mut body = String::new();
        stream.read_to_string(&mut body).unwrap();

        api_mock.assert();
        assert_eq!(body, "<ccb_api/>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_http_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api.php");
            then.status(503);
        });

        let transport = HttpTransport::builder("api", "secret")
            .timeout(Some(Duration::from_secs(5)))
            .build()
            .unwrap();
        let uri = Url::parse(&server.url("/api.php")).unwrap();

        let err = transport.send(&uri, &[]).await.err().unwrap();

        api_mock.assert();
        assert!(matches!(err, CcbError::HttpError(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_empty_username_is_rejected() {
        let err = HttpTransport::new("", "secret").unwrap_err();
        assert!(matches!(err, CcbError::ConfigError { .. }));
    }

    #[test]
    fn test_debug_hides_password() {
        let transport = HttpTransport::new("api", "secret").unwrap();
        assert!(!format!("{:?}", transport).contains("secret"));
    }
}
