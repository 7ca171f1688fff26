use reqwest::{
    Client, Method, RequestBuilder, Url,
    header::{CONTENT_TYPE, HeaderMap},
    multipart::Form,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::{ClientConfig, Error, Result};

/// Request executor shared by the task and image helpers.
///
/// Holds the service endpoint and the identity of the user; request paths are appended to the
/// endpoint as they are.
#[derive(Clone, Debug)]
pub struct ServiceHelper {
    endpoint: String,
    username: String,
    user_address: String,
    client: Client,
}

impl ServiceHelper {
    /// Creates a helper for the service at `endpoint`.
    pub fn new(
        endpoint: impl AsRef<str>,
        username: impl Into<String>,
        user_address: impl Into<String>,
    ) -> Result<Self> {
        Self::with_client(endpoint, username, user_address, Client::new())
    }

    /// Creates a helper with a custom [`reqwest::Client`].
    pub fn with_client(
        endpoint: impl AsRef<str>,
        username: impl Into<String>,
        user_address: impl Into<String>,
        client: Client,
    ) -> Result<Self> {
        let endpoint = endpoint.as_ref().trim_end_matches('/');
        Url::parse(endpoint)?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            username: username.into(),
            user_address: user_address.into(),
            client,
        })
    }

    /// Creates a helper from a loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.endpoint, &config.username, &config.user_address)
    }

    /// Service endpoint, without trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Name of the user.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Address of the user.
    pub fn user_address(&self) -> &str {
        &self.user_address
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{path}", self.endpoint))?)
    }

    /// Sends a request and returns the response body.
    ///
    /// For GET, `body` is sent as query parameters and `headers` are not used. For POST,
    /// `body` is sent as JSON (`{}` when absent) with `headers` added to the request.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn prepare_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<Value> {
        let url = self.url(path)?;
        debug!(%url, "sending request");

        match method {
            Method::GET => {
                let mut request = self.client.get(url);
                if let Some(body) = body {
                    request = request.query(body);
                }
                send(request).await.map_err(|source| {
                    error!(%source, "GET {path} failed");
                    Error::RestEndpointGetFailure { source }
                })
            }
            Method::POST => {
                let request = self.client.post(url).headers(headers.unwrap_or_default());
                let request = match body {
                    Some(body) => request.json(body),
                    None => request.json(&serde_json::Map::new()),
                };
                send(request).await.map_err(|source| {
                    error!(%source, "POST {path} failed");
                    Error::RestEndpointPostFailure { source }
                })
            }
            method => Err(Error::UnsupportedMethod(method)),
        }
    }

    /// Sends a multipart POST request and returns the response body.
    ///
    /// The content type is always the one of `form`; a `Content-Type` in `headers` is ignored.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn prepare_multipart_request(
        &self,
        path: &str,
        form: Form,
        headers: Option<HeaderMap>,
    ) -> Result<Value> {
        let url = self.url(path)?;
        debug!(%url, "sending multipart request");

        let mut headers = headers.unwrap_or_default();
        headers.remove(CONTENT_TYPE);
        let request = self.client.post(url).headers(headers).multipart(form);
        send(request).await.map_err(|source| {
            error!(%source, "POST {path} failed");
            Error::RestEndpointPostFailure { source }
        })
    }

    /// Sends a request, unwraps the envelope and deserializes its result.
    pub async fn invoke_request<B: Serialize + ?Sized, Res: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<Res> {
        let response = self.prepare_request(method, path, body, headers).await?;
        Ok(serde_json::from_value(get_json_response(response)?)?)
    }

    /// Sends a multipart request, unwraps the envelope and deserializes its result.
    pub async fn invoke_multipart_request<Res: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        headers: Option<HeaderMap>,
    ) -> Result<Res> {
        let response = self.prepare_multipart_request(path, form, headers).await?;
        Ok(serde_json::from_value(get_json_response(response)?)?)
    }

    /// Sends a GET request with `query` as query parameters and deserializes the result.
    pub async fn get<Q: Serialize + ?Sized, Res: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Res> {
        self.invoke_request(Method::GET, path, Some(query), None).await
    }

    /// Sends a POST request with a JSON body and deserializes the result.
    pub async fn post<Req: Serialize + ?Sized, Res: DeserializeOwned>(
        &self,
        path: &str,
        req: &Req,
    ) -> Result<Res> {
        self.invoke_request(Method::POST, path, Some(req), None).await
    }
}

/// Unwraps an [`Envelope`](zkwasm_types::Envelope) shaped response.
///
/// Anything but `"success": true` is a failure, reported as [`Error::Request`] with the
/// service's `error` (its JSON text when it is not a string). A successful response without
/// result yields [`Value::Null`].
pub fn get_json_response(response: Value) -> Result<Value> {
    let mut body = match response {
        Value::Object(body) => body,
        _ => serde_json::Map::new(),
    };
    if body.get("success") != Some(&Value::Bool(true)) {
        let error = body.remove("error").map(|error| match error {
            Value::String(message) => message,
            error => error.to_string(),
        });
        error!(?error, "request failed");
        return Err(Error::Request(error));
    }
    Ok(body.remove("result").unwrap_or_default())
}

/// Sends an HTTP request and decodes the JSON body, treating error status codes as failures.
async fn send(request: RequestBuilder) -> reqwest::Result<Value> {
    request
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await
}
