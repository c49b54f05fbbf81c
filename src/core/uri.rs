use crate::utils::error::{CcbError, Result};
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Query key that selects the CCB service.
pub const SERVICE_KEY: &str = "srv";

/// Build the request URI for one service call.
///
/// The base URI's own query string is kept verbatim and extended with
/// `srv=<operation>` followed by `params` in the order given. Scheme,
/// authority, path and fragment are not touched.
pub fn compose(base: &Url, operation: &str, params: &[(String, String)]) -> Result<Url> {
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(CcbError::config(format!(
            "API base URI '{}' cannot carry a query string",
            base
        )));
    }
    if operation.is_empty() {
        return Err(CcbError::config("operation name must not be empty"));
    }

    let mut query = match base.query() {
        Some(existing) if !existing.is_empty() => format!("{}&", existing),
        _ => String::new(),
    };
    query.push_str(SERVICE_KEY);
    query.push('=');
    query.push_str(&encode(operation));

    for (key, value) in params {
        query.push('&');
        query.push_str(&encode(key));
        query.push('=');
        query.push_str(&encode(value));
    }

    let mut uri = base.clone();
    uri.set_query(Some(&query));

    // The assembled URI must survive a parse; anything else is a setup defect.
    Url::parse(uri.as_str()).map_err(|e| {
        CcbError::config(format!("could not construct API URI for '{}': {}", operation, e))
    })
}

fn encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_compose_without_base_query() {
        let base = Url::parse("https://demo.ccbchurch.com/api.php").unwrap();
        let uri = compose(&base, "individual_profile_from_id", &params(&[("individual_id", "48")]))
            .unwrap();
        assert_eq!(
            uri.as_str(),
            "https://demo.ccbchurch.com/api.php?srv=individual_profile_from_id&individual_id=48"
        );
    }

    #[test]
    fn test_compose_preserves_base_query() {
        let base = Url::parse("https://host/api.php?a=1").unwrap();
        let uri = compose(&base, "x", &[]).unwrap();
        assert!(uri.query().unwrap().starts_with("a=1&srv=x"));
        assert_eq!(uri.scheme(), "https");
        assert_eq!(uri.host_str(), Some("host"));
        assert_eq!(uri.path(), "/api.php");
    }

    #[test]
    fn test_compose_keeps_authority_port_and_fragment() {
        let base = Url::parse("http://user@localhost:8080/sub/api.php?token=a%20b#frag").unwrap();
        let uri = compose(&base, "campus_list", &params(&[("page", "2")])).unwrap();
        assert_eq!(
            uri.as_str(),
            "http://user@localhost:8080/sub/api.php?token=a%20b&srv=campus_list&page=2#frag"
        );
    }

    #[test]
    fn test_compose_encodes_values() {
        let base = Url::parse("https://host/api.php").unwrap();
        let uri = compose(
            &base,
            "individual_profile_from_login_password",
            &params(&[("login", "bob smith"), ("password", "p&ss=word")]),
        )
        .unwrap();
        assert_eq!(
            uri.query(),
            Some("srv=individual_profile_from_login_password&login=bob+smith&password=p%26ss%3Dword")
        );

        let pairs: Vec<(String, String)> = uri.query_pairs().into_owned().collect();
        assert_eq!(pairs[2], ("password".to_string(), "p&ss=word".to_string()));
    }

    #[test]
    fn test_compose_empty_base_query() {
        let base = Url::parse("https://host/api.php?").unwrap();
        let uri = compose(&base, "x", &[]).unwrap();
        assert_eq!(uri.query(), Some("srv=x"));
    }

    #[test]
    fn test_compose_rejects_unusable_base() {
        let base = Url::parse("mailto:admin@example.com").unwrap();
        let err = compose(&base, "x", &[]).unwrap_err();
        assert!(matches!(err, CcbError::ConfigError { .. }));

        let base = Url::parse("https://host/api.php").unwrap();
        assert!(compose(&base, "", &[]).is_err());
    }
}
