//! Description of one REST call: method, templated path, query and JSON body.

use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
enum Body {
    Json(serde_json::Value),
    // Serialization failed while building; reported when the call is dispatched.
    Invalid(String),
}

/// A logical API call.
///
/// Paths are relative to the transport's base address and may contain `{name}`
/// placeholders, each filling a whole segment:
///
/// ```rust
/// use chancafe_client::client::ApiRequest;
///
/// let req = ApiRequest::get("clients/{id}/quotes").path_param("id", 42);
/// assert_eq!(req.segments().unwrap(), vec!["clients", "42", "quotes"]);
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    template: String,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Body>,
    authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, template: impl Into<String>) -> Self {
        Self {
            method,
            template: template.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
            authenticated: true,
        }
    }

    pub fn get(template: impl Into<String>) -> Self {
        Self::new(Method::Get, template)
    }

    pub fn post(template: impl Into<String>) -> Self {
        Self::new(Method::Post, template)
    }

    pub fn put(template: impl Into<String>) -> Self {
        Self::new(Method::Put, template)
    }

    pub fn patch(template: impl Into<String>) -> Self {
        Self::new(Method::Patch, template)
    }

    pub fn delete(template: impl Into<String>) -> Self {
        Self::new(Method::Delete, template)
    }

    pub fn path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.push((name.into(), value.to_string()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(match serde_json::to_value(body) {
            Ok(v) => Body::Json(v),
            Err(e) => Body::Invalid(e.to_string()),
        });
        self
    }

    /// Marks a call that is valid without a session (`login`, `register`).
    ///
    /// Only annotates the dispatch log (`session_required`). The bearer header is still
    /// attached whenever the session holds a non-empty token.
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn requires_session(&self) -> bool {
        self.authenticated
    }

    pub(crate) fn json_body(&self) -> Result<Option<&serde_json::Value>> {
        match &self.body {
            None => Ok(None),
            Some(Body::Json(v)) => Ok(Some(v)),
            Some(Body::Invalid(msg)) => Err(Error::validation(
                format!("request body could not be serialized: {}", msg),
                ErrorContext::at("api_request").field(self.template.as_str()),
            )),
        }
    }

    /// Path segments with every placeholder substituted.
    pub fn segments(&self) -> Result<Vec<String>> {
        self.template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|seg| match seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => self
                    .path_params
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.clone())
                    .ok_or_else(|| {
                        Error::validation(
                            format!("missing path parameter `{}`", name),
                            ErrorContext::at("api_request").field(self.template.as_str()),
                        )
                    }),
                None => Ok(seg.to_string()),
            })
            .collect()
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}
