//! Outgoing HTTP request model handed to the transport collaborator.

use masking::Maskable;
use serde::{Deserialize, Serialize};

/// Header list; values that carry credentials are stored as [`Maskable::Masked`].
pub type Headers = std::collections::HashSet<(String, Maskable<String>)>;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

/// Body or query payload of a request, already encoded from the connector's wire structs.
pub enum RequestContent {
    /// JSON object body
    Json(serde_json::Value),
    /// URL query string pairs
    Query(Vec<(String, String)>),
}

impl std::fmt::Debug for RequestContent {
    // the payload may contain card data and the api key, so only the kind is printed
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
            Self::Query(_) => "QueryParameters",
        })
    }
}

impl RequestContent {
    /// Borrow the JSON body, if this is a body payload
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Query(_) => None,
        }
    }

    /// Borrow the query pairs, if this is a query payload
    pub fn as_query(&self) -> Option<&[(String, String)]> {
        match self {
            Self::Json(_) => None,
            Self::Query(pairs) => Some(pairs),
        }
    }
}

#[derive(Debug)]
#[allow(missing_docs)]
pub struct Request {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub query: Option<RequestContent>,
    pub body: Option<RequestContent>,
}

impl Request {
    /// Creates a new instance of HttpRequest with the specified HTTP method and URL.
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: String::from(url),
            headers: std::collections::HashSet::new(),
            query: None,
            body: None,
        }
    }

    /// Sets the body of the request.
    pub fn set_body(&mut self, body: RequestContent) {
        self.body.replace(body);
    }

    /// Sets the query parameters of the request.
    pub fn set_query(&mut self, query: RequestContent) {
        self.query.replace(query);
    }

    /// Adds a new header to the headers set.
    pub fn add_header(&mut self, header: &str, value: Maskable<String>) {
        self.headers.insert((String::from(header), value));
    }

    /// Looks a header up by name, case-insensitively.
    pub fn get_header(&self, header: &str) -> Option<&Maskable<String>> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(header))
            .map(|(_, value)| value)
    }
}

/// Builder for [`Request`]
#[derive(Debug)]
pub struct RequestBuilder {
    url: String,
    headers: Headers,
    method: Method,
    query: Option<RequestContent>,
    body: Option<RequestContent>,
}

impl RequestBuilder {
    #[allow(clippy::new_without_default)]
    /// Creates a builder for a `GET` request with no URL.
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(1024),
            headers: std::collections::HashSet::new(),
            query: None,
            body: None,
        }
    }

    /// Sets the target URL.
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Appends headers.
    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the query payload, if any.
    pub fn set_optional_query(mut self, query: Option<RequestContent>) -> Self {
        self.query = query;
        self
    }

    /// Sets the body payload, if any.
    pub fn set_optional_body(mut self, body: Option<RequestContent>) -> Self {
        self.body = body;
        self
    }

    /// Finishes the request.
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            query: self.query,
            body: self.body,
        }
    }
}
