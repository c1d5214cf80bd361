/// All errors that can occur when talking to the FACEIT data API.
#[derive(thiserror::Error, Debug)]
pub enum FaceitError {
    /// The FACEIT_API_KEY environment variable is not set.
    #[error("FACEIT_API_KEY environment variable is not set; export it or add it to your .env file")]
    MissingApiKey,

    /// Upstream kept answering 429 past the retry budget.
    #[error("rate limited by FACEIT after {attempts} attempts: {body}")]
    RateLimited { attempts: u32, body: String },

    /// Server returned a non-success HTTP status code.
    #[error("FACEIT API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {endpoint}: {source}")]
    ResponseBody {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Response body was not the JSON shape we expected.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, FaceitError>;
