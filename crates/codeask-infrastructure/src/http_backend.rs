//! HTTP implementation of the backend contract.
//!
//! Maps the reqwest layer onto the domain error taxonomy: a request that
//! never reaches the server (connect failure, timeout) becomes the generic
//! network-error message, a non-2xx response surfaces the server-provided
//! `error` field when present, and the server-error fallback otherwise.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use codeask_core::backend::{AskResponse, BackendClient, ProgressSink};
use codeask_core::error::{CodeaskError, NETWORK_ERROR_MESSAGE, Result, SERVER_ERROR_MESSAGE};
use codeask_core::health::HealthReport;
use codeask_core::history::HistoryEntry;
use codeask_core::upload::ZipCandidate;

use crate::config::ClientConfig;

const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskRequest<'a> {
    codebase_id: &'a str,
    question: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GithubUploadRequest<'a> {
    repo_url: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodebaseCreated {
    codebase_id: String,
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// reqwest-backed [`BackendClient`].
#[derive(Clone)]
pub struct HttpBackendClient {
    client: Client,
    base_url: String,
}

impl HttpBackendClient {
    /// Builds a client with the configured base URL and request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| CodeaskError::internal(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn network_error(err: reqwest::Error) -> CodeaskError {
        tracing::warn!(error = %err, "backend request failed before a response arrived");
        CodeaskError::submission(NETWORK_ERROR_MESSAGE)
    }

    async fn error_from_response(response: reqwest::Response) -> CodeaskError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string());
        tracing::warn!(%status, %message, "backend returned an error response");
        CodeaskError::submission(message)
    }
}

/// Pulls the human-readable `error` field out of an error body, if any.
fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.is_empty())
}

/// Splits the archive into chunks and reports cumulative transfer progress
/// through `sink` as each chunk is handed to the transport.
///
/// Percentages are monotonically non-decreasing and reach exactly 100 with
/// the final chunk (immediately, for an empty archive).
fn progress_chunks(
    bytes: Bytes,
    sink: ProgressSink,
) -> impl Stream<Item = std::io::Result<Bytes>> + Send {
    let total = bytes.len();
    if total == 0 {
        sink(100);
    }
    let chunks: Vec<Bytes> = (0..total)
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|offset| bytes.slice(offset..(offset + UPLOAD_CHUNK_SIZE).min(total)))
        .collect();
    let mut sent = 0usize;
    futures::stream::iter(chunks).map(move |chunk| {
        sent += chunk.len();
        let percent = ((sent as u64 * 100) / total as u64) as u8;
        sink(percent);
        Ok(chunk)
    })
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn upload_archive(
        &self,
        archive: &ZipCandidate,
        progress: Option<ProgressSink>,
    ) -> Result<String> {
        tracing::debug!(
            file_name = %archive.file_name,
            size_bytes = archive.size_bytes(),
            "starting archive upload"
        );

        let bytes = Bytes::copy_from_slice(&archive.bytes);
        let body = match progress {
            Some(sink) => reqwest::Body::wrap_stream(progress_chunks(bytes, sink)),
            None => reqwest::Body::from(bytes),
        };
        let part = Part::stream_with_length(body, archive.size_bytes())
            .file_name(archive.file_name.clone())
            .mime_str(&archive.mime_type)
            .map_err(|err| CodeaskError::internal(format!("Invalid upload MIME type: {err}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/api/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(Self::network_error)?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let created: CodebaseCreated = response.json().await.map_err(|err| {
            CodeaskError::submission(format!("Failed to parse upload response: {err}"))
        })?;
        tracing::info!(codebase_id = %created.codebase_id, "archive upload complete");
        Ok(created.codebase_id)
    }

    async fn upload_github(&self, repo_url: &str) -> Result<String> {
        tracing::debug!(%repo_url, "submitting repository for cloning");
        let response = self
            .client
            .post(self.endpoint("/api/upload/github"))
            .json(&GithubUploadRequest { repo_url })
            .send()
            .await
            .map_err(Self::network_error)?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let created: CodebaseCreated = response.json().await.map_err(|err| {
            CodeaskError::submission(format!("Failed to parse upload response: {err}"))
        })?;
        Ok(created.codebase_id)
    }

    async fn ask(&self, codebase_id: &str, question: &str) -> Result<AskResponse> {
        let response = self
            .client
            .post(self.endpoint("/api/qa/ask"))
            .json(&AskRequest {
                codebase_id,
                question,
            })
            .send()
            .await
            .map_err(Self::network_error)?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        response.json().await.map_err(|err| {
            CodeaskError::submission(format!("Failed to parse answer response: {err}"))
        })
    }

    async fn fetch_history(&self, codebase_id: &str) -> Result<Vec<HistoryEntry>> {
        let url = self.endpoint(&format!("/api/qa/history/{codebase_id}"));
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| CodeaskError::history_fetch(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message =
                extract_error_message(&body).unwrap_or_else(|| format!("status {status}"));
            return Err(CodeaskError::history_fetch(message));
        }
        let envelope: HistoryEnvelope = response
            .json()
            .await
            .map_err(|err| CodeaskError::history_fetch(err.to_string()))?;
        Ok(envelope.history)
    }

    async fn check_health(&self) -> HealthReport {
        let response = self.client.get(self.endpoint("/api/health")).send().await;
        match response {
            Ok(response) if response.status().is_success() => {
                response.json().await.unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "unparseable health payload");
                    HealthReport::unreachable()
                })
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "health endpoint returned an error");
                HealthReport::unreachable()
            }
            Err(err) => {
                tracing::warn!(error = %err, "health endpoint unreachable");
                HealthReport::unreachable()
            }
        }
    }
}
