//! Queue-API client: submit, poll status, fetch result, download.
//!
//! The queue endpoints accept a job and answer immediately with a
//! request id; the client then polls the status URL until the job
//! reaches a terminal state and fetches the finished result.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::PipelineError;
use crate::manifest::{AssetJob, AssetManifest};

use super::{resize_in_place, write_image_bytes};

/// Default queue endpoint.
pub const DEFAULT_QUEUE_BASE: &str = "https://queue.fal.run";

/// Default per-job completion deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(900);

const POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct ResultImage {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerationResult {
    #[serde(default)]
    images: Vec<ResultImage>,
}

pub struct QueueClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    poll_interval: Duration,
    timeout: Duration,
}

impl QueueClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        QueueClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            poll_interval: POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Client against the public endpoint, keyed from the environment.
    pub fn from_env() -> Result<Self, PipelineError> {
        Ok(Self::new(DEFAULT_QUEUE_BASE, super::api_key_from_env()?))
    }

    /// Override the per-job completion deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the status poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("Authorization", format!("Key {}", self.api_key))
    }

    /// Queue base used for status/result lookups.
    ///
    /// flux-pro variants share one status queue; every other model polls
    /// the same path it was submitted to.
    fn status_base(&self, model: &str) -> String {
        if model.starts_with("fal-ai/flux-pro/") {
            format!("{}/fal-ai/flux-pro", self.base_url)
        } else {
            format!("{}/{}", self.base_url, model)
        }
    }

    /// Submit a job and return its request id.
    pub async fn submit(&self, model: &str, payload: &Value) -> Result<String, PipelineError> {
        let url = format!("{}/{}", self.base_url, model);
        let resp = self
            .auth(self.http.post(&url))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        let body: SubmitResponse = resp.json().await?;
        body.request_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PipelineError::Remote("queue response carried no request_id".to_string()))
    }

    /// Poll until the request completes, then fetch and return the result
    /// document.
    pub async fn wait_for_result(
        &self,
        model: &str,
        request_id: &str,
    ) -> Result<Value, PipelineError> {
        let base = self.status_base(model);
        let status_url = format!("{base}/requests/{request_id}/status");
        let result_url = format!("{base}/requests/{request_id}");
        let deadline = tokio::time::Instant::now() + self.timeout;

        loop {
            if tokio::time::Instant::now() > deadline {
                return Err(PipelineError::QueueTimeout {
                    request_id: request_id.to_string(),
                    timeout_s: self.timeout.as_secs(),
                });
            }

            let resp = self
                .auth(self.http.get(&status_url))
                .send()
                .await?
                .error_for_status()?;
            let status: StatusResponse = resp.json().await?;

            match status.status.as_str() {
                "COMPLETED" => {
                    let resp = self
                        .auth(self.http.get(&result_url))
                        .send()
                        .await?
                        .error_for_status()?;
                    return Ok(resp.json().await?);
                }
                "FAILED" | "CANCELED" => {
                    return Err(PipelineError::QueueFailed {
                        request_id: request_id.to_string(),
                        status: status.status,
                    });
                }
                other => {
                    tracing::debug!(request_id, status = other, "waiting for completion");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    /// Download the first image of a result document to `out`.
    pub async fn download_first_image(
        &self,
        result: &Value,
        out: &Path,
    ) -> Result<(), PipelineError> {
        let result: GenerationResult = serde_json::from_value(result.clone())?;
        let url = result
            .images
            .first()
            .and_then(|img| img.url.clone())
            .ok_or_else(|| PipelineError::Remote("result carried no image url".to_string()))?;
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        write_image_bytes(out, &resp.bytes().await?)?;
        Ok(())
    }

    /// Build the submit payload for a job.
    ///
    /// FLUX models take an aspect ratio and no negative-prompt field, so
    /// the avoid-list rides along inside the prompt text.
    fn payload_for(job: &AssetJob, model: &str) -> Value {
        let mut prompt = job.prompt.clone();
        if let Some(neg) = &job.negative {
            prompt = format!("{prompt}\n\nAvoid: {neg}");
        }

        let mut payload = json!({
            "prompt": prompt,
            "output_format": "png",
        });
        if model.contains("flux") {
            payload["aspect_ratio"] = json!(job.kind.aspect_ratio());
        } else {
            payload["image_size"] = json!(job.kind.image_size());
        }
        payload
    }

    /// Generate one manifest job end to end.
    pub async fn generate(
        &self,
        manifest: &AssetManifest,
        job: &AssetJob,
    ) -> Result<(), PipelineError> {
        let model = &manifest.style.model;
        let payload = Self::payload_for(job, model);

        tracing::info!(id = %job.id, out = %job.out.display(), "submitting");
        let request_id = self.submit(model, &payload).await?;
        tracing::debug!(id = %job.id, %request_id, "queued");

        let result = self.wait_for_result(model, &request_id).await?;
        self.download_first_image(&result, &job.out).await?;

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


#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::tempdir;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(16, 16, image::Rgba([7, 7, 7, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode png");
        buf.into_inner()
    }

    fn fast_client(base: &str) -> QueueClient {
        QueueClient::new(base, "test-key")
            .with_poll_interval(Duration::from_millis(5))
            .with_timeout(Duration::from_secs(5))
    }

    fn manifest_for(out: &std::path::Path) -> AssetManifest {
        serde_json::from_str(&format!(
            r#"{{
                "style": {{ "model": "fal-ai/test-model" }},
                "outputs": {{ "icons": {{ "size": [8, 8] }} }},
                "assets": [
                    {{ "id": "icon_a", "type": "icon", "prompt": "an icon", "out": {out:?} }}
                ]
            }}"#,
            out = out.to_str().expect("utf8 path")
        ))
        .expect("manifest")
    }

    #[tokio::test]
    async fn submit_poll_download_happy_path() {
        let server = MockServer::start().await;
        let dir = tempdir().expect("tempdir");
        let out = dir.path().join("icon.png");

        Mock::given(method("POST"))
            .and(path("/fal-ai/test-model"))
            .and(header("Authorization", "Key test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "request_id": "req-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        // First poll answers IN_PROGRESS, later polls COMPLETED.
        let polls = AtomicU32::new(0);
        Mock::given(method("GET"))
            .and(path("/fal-ai/test-model/requests/req-1/status"))
            .respond_with(move |_: &wiremock::Request| {
                let n = polls.fetch_add(1, Ordering::SeqCst);
                let status = if n == 0 { "IN_PROGRESS" } else { "COMPLETED" };
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": status }))
            })
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/fal-ai/test-model/requests/req-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "images": [{ "url": format!("{}/files/req-1.png", server.uri()) }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/files/req-1.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
            .expect(1)
            .mount(&server)
            .await;

        let client = fast_client(&server.uri());
        let manifest = manifest_for(&out);
        client.generate_all(&manifest, &[]).await.expect("generate");

        let saved = image::open(&out).expect("open output");
        assert_eq!(saved.width(), 8, "resized to the icons target");
    }

    #[tokio::test]
    async fn failed_status_is_terminal() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fal-ai/test-model"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "request_id": "req-2"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fal-ai/test-model/requests/req-2/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "FAILED"
            })))
            .mount(&server)
            .await;

        let dir = tempdir().expect("tempdir");
        let out = dir.path().join("icon.png");
        let client = fast_client(&server.uri());
        let manifest = manifest_for(&out);

        let err = client
            .generate_all(&manifest, &[])
            .await
            .expect_err("must fail");
        match err {
            PipelineError::QueueFailed { request_id, status } => {
                assert_eq!(request_id, "req-2");
                assert_eq!(status, "FAILED");
            }
            other => panic!("expected QueueFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_request_id_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fal-ai/test-model"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "detail": "validation error"
            })))
            .mount(&server)
            .await;

        let client = fast_client(&server.uri());
        let err = client
            .submit("fal-ai/test-model", &serde_json::json!({ "prompt": "x" }))
            .await
            .expect_err("must fail");
        assert!(matches!(err, PipelineError::Remote(_)));
    }

    #[tokio::test]
    async fn slow_queue_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fal-ai/test-model"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "request_id": "req-3"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fal-ai/test-model/requests/req-3/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "IN_QUEUE"
            })))
            .mount(&server)
            .await;

        let client = QueueClient::new(server.uri(), "test-key")
            .with_poll_interval(Duration::from_millis(5))
            .with_timeout(Duration::from_millis(40));

        let err = client
            .wait_for_result("fal-ai/test-model", "req-3")
            .await
            .expect_err("must time out");
        assert!(matches!(err, PipelineError::QueueTimeout { .. }));
    }

    #[tokio::test]
    async fn result_without_images_is_an_error() {
        let server = MockServer::start().await;
        let dir = tempdir().expect("tempdir");
        let client = fast_client(&server.uri());

        let err = client
            .download_first_image(&serde_json::json!({ "images": [] }), &dir.path().join("x.png"))
            .await
            .expect_err("must fail");
        assert!(matches!(err, PipelineError::Remote(_)));
    }
}
