use thiserror::Error;

/// Errors shared by every tool in the crate.
///
/// Each tool is a run-once command, so errors propagate to `main` and end
/// the process with a message; nothing here is retried or recovered.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The input WAV uses a sample format the converter does not handle.
    #[error("unsupported WAV format: {0}")]
    UnsupportedWav(String),

    /// A required environment variable is absent or empty.
    #[error("missing env {0}. Export it first")]
    MissingEnv(&'static str),

    /// The manifest could not be interpreted.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// A remote response did not carry what the protocol promises.
    #[error("remote error: {0}")]
    Remote(String),

    /// One generation job failed in a way specific to that job.
    #[error("job '{job}' failed: {reason}")]
    Job { job: String, reason: String },

    /// The queue never reported the request as completed in time.
    #[error("request {request_id} did not complete within {timeout_s} s")]
    QueueTimeout { request_id: String, timeout_s: u64 },

    /// The queue reported a terminal non-success state.
    #[error("request {request_id} ended as {status}")]
    QueueFailed { request_id: String, status: String },

    #[error("TTS error: {0}")]
    Tts(String),
}
