//! Authenticated request execution against the Stream API.
//!
//! Every call is a single blocking request/response exchange: no retries, no pagination, no
//! timeouts beyond the HTTP client's own defaults. The response is read to the end and dropped
//! before the call returns, whether it succeeded or not.

use crate::stream_api::error::{ApiError, Error};
use http::Method;
use http::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use tracing::instrument;

/// Name of the header that carries the API key on every request.
const ACCESS_KEY_HEADER: &str = "AccessKey";

/// Every request declares JSON, including raw file uploads, which the API accepts as-is.
const CONTENT_TYPE_JSON: &str = "application/json";

/// Sends authenticated requests and turns their responses into JSON documents or errors.
#[derive(Clone)]
pub(crate) struct RequestExecutor {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl RequestExecutor {
    pub(crate) fn new(api_key: String, client: reqwest::blocking::Client) -> Self {
        Self { api_key, client }
    }

    /// Sends a `GET` with `params` appended to `url` as a query string, in the given order.
    pub(crate) fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Option<Value>, Error> {
        let target = add_query_parameters(url, params);
        self.make_authenticated_request(Method::GET, &target, None)
    }

    /// Sends a `POST` whose body is `form` as a single flat JSON object.
    pub(crate) fn post(
        &self,
        url: &str,
        form: &[(&str, String)],
    ) -> Result<Option<Value>, Error> {
        let body = serde_json::to_vec(&json_object(form))?;
        self.make_authenticated_request(Method::POST, url, Some(body))
    }

    /// Sends a `PUT` with `bytes` as the body, unmodified.
    pub(crate) fn put(&self, url: &str, bytes: Vec<u8>) -> Result<Option<Value>, Error> {
        self.make_authenticated_request(Method::PUT, url, Some(bytes))
    }

    /// Sends a `DELETE` without a body.
    pub(crate) fn delete(&self, url: &str) -> Result<Option<Value>, Error> {
        self.make_authenticated_request(Method::DELETE, url, None)
    }

    /// Makes one authenticated HTTP request to the Stream API.
    ///
    /// - `2xx`: the body is parsed as JSON. An empty body yields `None`.
    /// - any other status: [`Error::Api`] carrying the status and whatever the server said.
    /// - no usable HTTP response at all: [`Error::Transport`].
    #[instrument(skip(self, body), level = tracing::Level::TRACE)]
    fn make_authenticated_request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Option<Value>, Error> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCESS_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON);

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ApiError::new(status.as_u16(), message).into());
        }

        let bytes = response.bytes()?;
        tracing::debug!(
            %method,
            url,
            status = status.as_u16(),
            body_len = bytes.len(),
            "Stream API request succeeded"
        );

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

/// Appends `params` to `url` as `?k=v&k=v`, keeping their order and form-encoding each value.
pub(crate) fn add_query_parameters(url: &str, params: &[(&str, String)]) -> String {
    let mut target = String::from(url);
    for (i, (name, value)) in params.iter().enumerate() {
        target.push(if i == 0 { '?' } else { '&' });
        target.push_str(name);
        target.push('=');
        target.extend(form_urlencoded::byte_serialize(value.as_bytes()));
    }
    target
}

/// Folds a parameter list into one flat JSON object of string values.
pub(crate) fn json_object(form: &[(&str, String)]) -> Value {
    let object: Map<String, Value> = form
        .iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.clone())))
        .collect();
    Value::Object(object)
}
