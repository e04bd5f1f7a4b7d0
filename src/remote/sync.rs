//! SDK-style client: one blocking run call per job.
//!
//! The run endpoint executes the model inside the request and answers
//! with the finished result, so there is no queue bookkeeping here.
//! Result shapes vary between models; the decoder accepts the common
//! inline-base64 and hosted-URL forms.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

use crate::error::PipelineError;
use crate::manifest::{AssetJob, AssetManifest};

use super::{resize_in_place, write_image_bytes};

/// Default synchronous run endpoint.
pub const DEFAULT_RUN_BASE: &str = "https://fal.run";

/// Request timeout for one run call. Generation happens inside the
/// request, so this is generous.
const RUN_TIMEOUT: Duration = Duration::from_secs(300);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

pub struct SyncClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SyncClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        SyncClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Client against the public endpoint, keyed from the environment.
    pub fn from_env() -> Result<Self, PipelineError> {
        Ok(Self::new(DEFAULT_RUN_BASE, super::api_key_from_env()?))
    }

    /// Execute one generation call and return the raw result document.
    async fn run_model(&self, model: &str, payload: &Value) -> Result<Value, PipelineError> {
        let url = format!("{}/{}", self.base_url, model);
        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Key {}", self.api_key))
            .json(payload)
            .timeout(RUN_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Pull the image bytes out of a result document.
    async fn image_bytes(&self, job_id: &str, result: &Value) -> Result<Vec<u8>, PipelineError> {
        if let Some(b64) = result.pointer("/image/base64").and_then(Value::as_str) {
            return Ok(BASE64.decode(b64)?);
        }
        if let Some(first) = result.pointer("/images/0") {
            if let Some(b64) = first.get("base64").and_then(Value::as_str) {
                return Ok(BASE64.decode(b64)?);
            }
            if let Some(url) = first.get("url").and_then(Value::as_str) {
                let resp = self
                    .http
                    .get(url)
                    .timeout(DOWNLOAD_TIMEOUT)
                    .send()
                    .await?
                    .error_for_status()?;
                return Ok(resp.bytes().await?.to_vec());
            }
        }
        Err(PipelineError::Job {
            job: job_id.to_string(),
            reason: format!("unhandled response shape: {result}"),
        })
    }

    /// Generate one manifest job: run, decode, save, resize.
    pub async fn generate(
        &self,
        manifest: &AssetManifest,
        job: &AssetJob,
    ) -> Result<(), PipelineError> {
        let payload = json!({
            "prompt": job.prompt,
            "negative_prompt": job.negative.clone().unwrap_or_default(),
            "image_size": job.kind.image_size(),
        });

        tracing::info!(id = %job.id, out = %job.out.display(), "generating");
        let result = self.run_model(&manifest.style.model, &payload).await?;
        let bytes = self.image_bytes(&job.id, &result).await?;
        write_image_bytes(&job.out, &bytes)?;

        if let Some(size) = manifest.target_size(job.kind) {
            if let Err(e) = resize_in_place(&job.out, size) {
                // keep the original rather than fail a finished download
                tracing::warn!(id = %job.id, error = %e, "resize failed, keeping original");
            }
        }
        Ok(())
    }

    /// Generate the selected manifest jobs in order. An empty `only_ids`
    /// runs everything.
    pub async fn generate_all(
        &self,
        manifest: &AssetManifest,
        only_ids: &[String],
    ) -> Result<(), PipelineError> {
        for job in manifest.selected_jobs(only_ids) {
            self.generate(manifest, job).await?;
        }
        Ok(())
    }
}
