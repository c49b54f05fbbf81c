use crate::core::client::church_api_base;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CcbError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 教會識別碼，例如 `demo` 代表 https://demo.ccbchurch.com/api.php
    pub church: Option<String>,
    /// 完整的 API 位址；設定時優先於 `church`
    pub base_url: Option<String>,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CcbError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CcbError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CCB_API_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CcbError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        match (&self.api.base_url, &self.api.church) {
            (Some(base_url), _) => validation::validate_url("api.base_url", base_url)?,
            (None, Some(church)) => {
                church_api_base(church)?;
            }
            (None, None) => {
                return Err(CcbError::ConfigError {
                    message: "either api.church or api.base_url must be set".to_string(),
                })
            }
        }

        validation::validate_non_empty_string("api.username", &self.api.username)?;
        validation::validate_substituted("api.username", &self.api.username)?;
        validation::validate_substituted("api.password", &self.api.password)?;

        if let Some(timeout) = self.http.as_ref().and_then(|h| h.timeout_seconds) {
            validation::validate_positive_number("http.timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}

impl ConfigProvider for ClientConfig {
    fn api_base(&self) -> Result<Url> {
        match (&self.api.base_url, &self.api.church) {
            (Some(base_url), _) => Ok(Url::parse(base_url)?),
            (None, Some(church)) => church_api_base(church),
            (None, None) => Err(CcbError::ConfigError {
                message: "either api.church or api.base_url must be set".to_string(),
            }),
        }
    }

    fn username(&self) -> &str {
        &self.api.username
    }

    fn password(&self) -> &str {
        &self.api.password
    }

    fn timeout(&self) -> Option<Duration> {
        self.http
            .as_ref()
            .and_then(|h| h.timeout_seconds)
            .map(Duration::from_secs)
    }

    fn user_agent(&self) -> Option<&str> {
        self.http.as_ref().and_then(|h| h.user_agent.as_deref())
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_church_config() {
        let toml_content = r#"
[api]
church = "demo"
username = "api_user"
password = "api_pass"

[http]
timeout_seconds = 30
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(
            config.api_base().unwrap().as_str(),
            "https://demo.ccbchurch.com/api.php"
        );
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.user_agent(), None);
    }

    #[test]
    fn test_base_url_takes_precedence() {
        let toml_content = r#"
[api]
church = "demo"
base_url = "http://localhost:8080/api.php?church=demo"
username = "api_user"
password = "api_pass"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.api_base().unwrap().as_str(),
            "http://localhost:8080/api.php?church=demo"
        );
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_CCB_PASSWORD", "from-env");

        let toml_content = r#"
[api]
church = "demo"
username = "api_user"
password = "${TEST_CCB_PASSWORD}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.password(), "from-env");

        std::env::remove_var("TEST_CCB_PASSWORD");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[api]
church = "demo"
username = "api_user"
password = "${TEST_CCB_UNSET_PASSWORD_VAR}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let missing_target = r#"
[api]
username = "api_user"
password = "api_pass"
"#;
        let config = ClientConfig::from_toml_str(missing_target).unwrap();
        assert!(config.validate().is_err());
        assert!(config.api_base().is_err());

        let bad_url = r#"
[api]
base_url = "invalid-url"
username = "api_user"
password = "api_pass"
"#;
        let config = ClientConfig::from_toml_str(bad_url).unwrap();
        assert!(config.validate().is_err());

        let zero_timeout = r#"
[api]
church = "demo"
username = "api_user"
password = "api_pass"

[http]
timeout_seconds = 0
"#;
        let config = ClientConfig::from_toml_str(zero_timeout).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
church = "file-test"
username = "api_user"
password = "api_pass"

[http]
user_agent = "parish-sync/1.0"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.church.as_deref(), Some("file-test"));
        assert_eq!(config.user_agent(), Some("parish-sync/1.0"));
    }
}
