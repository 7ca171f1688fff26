use thiserror::Error;

/// Error type for zkWasm service client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint or a request URL is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A GET request failed in transport, with an error status or an undecodable body.
    #[error("RestEndpointGetFailure")]
    RestEndpointGetFailure {
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },
    /// A POST request failed in transport, with an error status or an undecodable body.
    #[error("RestEndpointPostFailure")]
    RestEndpointPostFailure {
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with `success` other than `true`.
    #[error("RequestError:{}", .0.as_deref().unwrap_or("undefined"))]
    Request(Option<String>),
    /// Only GET and POST are used by the service.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(reqwest::Method),
    /// The result does not have the expected shape.
    #[error("failed to decode result: {0}")]
    Decode(#[from] serde_json::Error),
    /// The service knows no image with this MD5.
    #[error("image not found: {0}")]
    ImageNotFound(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
