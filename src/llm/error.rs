use thiserror::Error;

/// Failures at the chat completion HTTP seam.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The endpoint could not be reached or the connection dropped.
    #[error("Failed to connect to API endpoint: {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a chat completion.
    #[error("Failed to decode chat completion response")]
    Decode(#[source] reqwest::Error),

    /// The completion carried no message content.
    #[error("Chat completion response contained no message content")]
    EmptyResponse,
}
