use crate::services::settings::PortalSettings;
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE, REFERER, USER_AGENT,
};
use reqwest::Url;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum PortalError {
    #[error("invalid portal url {url}: {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("{0} must not be empty")]
    EmptyCredential(&'static str),
    #[error("{0} contains characters that cannot be sent as a cookie value")]
    InvalidCredential(&'static str),
    #[error("invalid value for header {0}")]
    InvalidHeader(&'static str),
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Session cookies copied from a logged-in browser session.
#[derive(Clone)]
pub struct Credentials {
    csrf_token: String,
    session_id: String,
}

impl Credentials {
    pub fn new(
        csrf_token: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Result<Self, PortalError> {
        let csrf_token = csrf_token.into().trim().to_string();
        let session_id = session_id.into().trim().to_string();
        check_cookie_value("csrf token", &csrf_token)?;
        check_cookie_value("session id", &session_id)?;
        Ok(Self {
            csrf_token,
            session_id,
        })
    }

    fn cookie_header(&self) -> Result<HeaderValue, PortalError> {
        let mut value = HeaderValue::from_str(&format!(
            "csrftoken={}; sessionid={}",
            self.csrf_token, self.session_id
        ))
        .map_err(|_| PortalError::InvalidHeader("cookie"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("csrf_token", &"<redacted>")
            .field("session_id", &"<redacted>")
            .finish()
    }
}

fn check_cookie_value(name: &'static str, value: &str) -> Result<(), PortalError> {
    if value.is_empty() {
        return Err(PortalError::EmptyCredential(name));
    }
    if value
        .chars()
        .any(|c| !c.is_ascii_graphic() || matches!(c, ';' | ',' | '"' | '\\'))
    {
        return Err(PortalError::InvalidCredential(name));
    }
    Ok(())
}

/// Outcome of one document lookup. Every variant must be handled by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Success(Value),
    EmptyData,
    HttpError {
        status: Option<u16>,
        message: String,
    },
    DecodeError {
        message: String,
    },
}

pub trait DocumentSource {
    fn fetch(&self, document_id: &str, credentials: &Credentials) -> FetchResult;
}

pub struct PortalClient {
    client: Client,
    endpoint: Url,
    vendor_id: String,
    status: String,
    order: String,
}

impl PortalClient {
    pub fn new(settings: &PortalSettings) -> Result<Self, PortalError> {
        let base = settings.base_url.trim().trim_end_matches('/');
        let endpoint = Url::parse(&format!("{}/detailpo", base)).map_err(|e| {
            PortalError::BaseUrl {
                url: settings.base_url.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&format!("{}/purchase_order", base))
                .map_err(|_| PortalError::InvalidHeader("referer"))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent)
                .map_err(|_| PortalError::InvalidHeader("user-agent"))?,
        );
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-dest"),
            HeaderValue::from_static("empty"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-mode"),
            HeaderValue::from_static("cors"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-site"),
            HeaderValue::from_static("same-origin"),
        );

        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            vendor_id: settings.vendor_id.clone(),
            status: settings.status.clone(),
            order: settings.order.clone(),
        })
    }

    pub fn document_url(&self, document_id: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("u", &self.vendor_id)
            .append_pair("d", document_id)
            .append_pair("s", &self.status)
            .append_pair("o", &self.order);
        url
    }

    fn fetch_document_text(&self, url: Url, cookie: HeaderValue) -> Result<String, reqwest::Error> {
        let resp = self
            .client
            .get(url)
            .header(COOKIE, cookie)
            .send()?
            .error_for_status()?;
        resp.text()
    }
}

impl DocumentSource for PortalClient {
    fn fetch(&self, document_id: &str, credentials: &Credentials) -> FetchResult {
        let cookie = match credentials.cookie_header() {
            Ok(c) => c,
            Err(e) => {
                return FetchResult::HttpError {
                    status: None,
                    message: e.to_string(),
                }
            }
        };
        let url = self.document_url(document_id);
        tracing::debug!(document_id, "requesting document");
        match self.fetch_document_text(url, cookie) {
            Ok(body) => classify_body(&body),
            Err(e) => FetchResult::HttpError {
                status: e.status().map(|s| s.as_u16()),
                message: e.without_url().to_string(),
            },
        }
    }
}

/// Sorts a 2xx response body into success, empty or undecodable.
pub fn classify_body(body: &str) -> FetchResult {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            return FetchResult::DecodeError {
                message: format!("response is not JSON ({}); check the login cookies", e),
            }
        }
    };
    match value.get("data") {
        None | Some(Value::Null) => FetchResult::EmptyData,
        Some(_) => FetchResult::Success(value),
    }
}
