use serde::Deserialize;

/// Per-connector endpoint settings.
#[allow(missing_docs)]
#[derive(Debug, Deserialize, Clone)]
pub struct Connectors {
    pub pagarme: ConnectorParams,
}

/// struct ConnectorParams
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectorParams {
    /// base url, ending with `/` so that endpoint paths can be appended
    pub base_url: String,
    /// how the API key is sent to the connector
    #[serde(default)]
    pub auth_method: AuthMethod,
}

/// Placement of the API key on outgoing requests.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// `api_key` field in the JSON body, or in the query string for `GET` requests
    #[default]
    BodyField,
    /// HTTP Basic authentication with the key as username and an empty password
    BasicAuth,
}
