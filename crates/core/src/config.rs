use crate::ConfigError;
use url::Url;

pub const DEFAULT_INDEX: &str = "calles_numero_de_puerta";

/// Static basic-auth credentials for the search service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parses `username:password`, splitting on the first colon.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.split_once(':') {
            Some((username, password)) if !username.is_empty() => {
                Ok(Self::new(username, password))
            }
            _ => Err(ConfigError::InvalidCredentials),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Index field names the query is built against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFields {
    pub department: String,
    pub province: String,
    pub district: String,
    pub street_name: String,
    pub house_numbers_path: String,
    pub house_number: String,
}

impl Default for IndexFields {
    fn default() -> Self {
        Self {
            department: "cod_departament.keyword".to_string(),
            province: "cod_province.keyword".to_string(),
            district: "cod_district.keyword".to_string(),
            street_name: "name".to_string(),
            house_numbers_path: "housenumbers".to_string(),
            house_number: "housenumbers.number.keyword".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchServiceConfig {
    pub endpoint: String,
    pub index: String,
    pub credentials: Option<Credentials>,
    /// `None` keeps the HTTP client's default.
    pub timeout_secs: Option<u64>,
    pub fields: IndexFields,
}

impl SearchServiceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            index: DEFAULT_INDEX.to_string(),
            credentials: None,
            timeout_secs: None,
            fields: IndexFields::default(),
        }
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn with_fields(mut self, fields: IndexFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn search_url(&self) -> Result<Url, ConfigError> {
        let base = Url::parse(&format!("{}/", self.endpoint.trim_end_matches('/')))?;
        Ok(base.join(&format!("{}/_search", self.index))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_split_on_first_colon() {
        let credentials = Credentials::parse("elastic:pa:ss").unwrap();
        assert_eq!(credentials.username, "elastic");
        assert_eq!(credentials.password, "pa:ss");
    }

    #[test]
    fn credentials_without_colon_are_rejected() {
        assert!(matches!(
            Credentials::parse("elastic"),
            Err(ConfigError::InvalidCredentials)
        ));
        assert!(Credentials::parse(":secret").is_err());
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", Credentials::new("elastic", "changeme"));
        assert!(!rendered.contains("changeme"));
    }

    #[test]
    fn search_url_joins_index_with_trailing_slash_tolerance() {
        let config = SearchServiceConfig::new("http://localhost:9200/");
        assert_eq!(
            config.search_url().unwrap().as_str(),
            "http://localhost:9200/calles_numero_de_puerta/_search"
        );

        let config = SearchServiceConfig::new("https://es.example.com/proxy").with_index("streets");
        assert_eq!(
            config.search_url().unwrap().as_str(),
            "https://es.example.com/proxy/streets/_search"
        );
    }
}
