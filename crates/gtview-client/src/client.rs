//! Typed HTTP client for the comparison backend
//!
//! One method per backend operation. Each call is a single round trip with
//! no retry and no caching. Failures carry the operation and the identifiers
//! involved so they can be shown to the operator as-is.

use std::path::Path;
use std::time::Duration;

use gtview_core::{
    ComparisonSubmitted, Error, FileDetailRow, FileDiffRow, FileResult, FolderKind,
    IndentationRun, Result, Run, ThreeWayViewPayload,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::endpoints::{self, Endpoint};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of a server-side (pre-uploaded folder) comparison request
#[derive(Debug, Clone, Serialize)]
struct ServerComparisonRequest<'a> {
    changes_description: &'a str,
    gt_folder_name: &'a str,
    running_folder_name: &'a str,
}

/// Folder listings come back as a bare array or wrapped in `folders`
#[derive(Deserialize)]
#[serde(untagged)]
enum FolderListing {
    Bare(Vec<String>),
    Wrapped { folders: Vec<String> },
}

/// Backend client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for `base_url`
    ///
    /// The base URL must be absolute; a trailing `/` is implied.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of an endpoint on this backend
    pub fn url(&self, endpoint: &Endpoint) -> Url {
        endpoint.resolve(&self.base)
    }

    // ─────────────────────────────────────────────────────────────
    // Run listings
    // ─────────────────────────────────────────────────────────────

    pub async fn list_runs(&self) -> Result<Vec<Run>> {
        self.get_list(&endpoints::all_runs(), "Failed to fetch runs".to_string())
            .await
    }

    pub async fn list_indentation_runs(&self) -> Result<Vec<IndentationRun>> {
        self.get_list(
            &endpoints::indentation_runs(),
            "Failed to fetch indentation summary".to_string(),
        )
        .await
    }

    pub async fn get_run_detail(&self, run_id: &str) -> Result<Vec<FileDetailRow>> {
        self.get_list(
            &endpoints::run_detail(run_id),
            format!("Failed to fetch run detail page for {run_id}"),
        )
        .await
    }

    pub async fn get_indentation_detail(&self, run_id: &str) -> Result<Vec<FileDetailRow>> {
        self.get_list(
            &endpoints::indentation_detail(run_id),
            format!("Failed to fetch indentation detail page for {run_id}"),
        )
        .await
    }

    pub async fn get_run_results(&self, run_id: &str) -> Result<Vec<FileResult>> {
        self.get_list(
            &endpoints::run_results(run_id),
            format!("Failed to fetch run details for {run_id}"),
        )
        .await
    }

    pub async fn get_file_diff(
        &self,
        run_id: &str,
        file_name: &str,
        suffix: &str,
    ) -> Result<Vec<FileDiffRow>> {
        self.get_list(
            &endpoints::file_diff(run_id, file_name, suffix),
            format!("Failed to fetch file diff for {file_name}_{suffix}"),
        )
        .await
    }

    // ─────────────────────────────────────────────────────────────
    // Three-way view
    // ─────────────────────────────────────────────────────────────

    pub async fn get_three_way_view(
        &self,
        run_id: &str,
        file_name: &str,
        page: u32,
    ) -> Result<ThreeWayViewPayload> {
        self.get_payload(
            &endpoints::three_way_view(run_id, file_name, page),
            format!("Failed to fetch three-way view for {file_name} page {page} of run {run_id}"),
        )
        .await
    }

    /// Indentation variant; requests the file stem without its page segment
    pub async fn get_indentation_three_way_view(
        &self,
        run_id: &str,
        file_name: &str,
        page: u32,
    ) -> Result<ThreeWayViewPayload> {
        self.get_payload(
            &endpoints::indentation_three_way_view(run_id, file_name, page),
            format!("Failed to fetch three-way view for {file_name} page {page} of run {run_id}"),
        )
        .await
    }

    // ─────────────────────────────────────────────────────────────
    // Submission & deletion
    // ─────────────────────────────────────────────────────────────

    /// Upload two local archives and start a comparison
    pub async fn submit_local_comparison(
        &self,
        gt_archive: &Path,
        output_archive: &Path,
    ) -> Result<ComparisonSubmitted> {
        let form = Form::new()
            .part("gt_zip", archive_part(gt_archive, "GT").await?)
            .part("running_zip", archive_part(output_archive, "output").await?);

        let endpoint = endpoints::upload_and_compare();
        info!(
            "Submitting local comparison: {} vs {}",
            gt_archive.display(),
            output_archive.display()
        );
        let request = self.http.post(self.url(&endpoint)).multipart(form);
        self.send_submission(request, "Failed to run comparison".to_string())
            .await
    }

    /// Start a comparison between two folders already on the server
    pub async fn submit_server_comparison(
        &self,
        gt_folder: &str,
        output_folder: &str,
        description: &str,
    ) -> Result<ComparisonSubmitted> {
        let body = ServerComparisonRequest {
            changes_description: description,
            gt_folder_name: gt_folder,
            running_folder_name: output_folder,
        };
        let endpoint = endpoints::compare_server_folders();
        info!("Submitting server comparison: {gt_folder} vs {output_folder}");
        let request = self.http.post(self.url(&endpoint)).json(&body);
        self.send_submission(
            request,
            format!("Failed to run server comparison for {gt_folder} / {output_folder}"),
        )
        .await
    }

    pub async fn list_unprocessed_folders(&self, kind: FolderKind) -> Result<Vec<String>> {
        let message = format!("Failed to fetch unprocessed {} folders", kind.label());
        let endpoint = endpoints::unprocessed_folders(kind);
        let body = self.send(self.http.get(self.url(&endpoint)), &message).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let listing: Option<FolderListing> = decode(&body, &message)?;
        Ok(match listing {
            Some(FolderListing::Bare(folders)) | Some(FolderListing::Wrapped { folders }) => {
                folders
            }
            None => Vec::new(),
        })
    }

    pub async fn delete_run(&self, run_id: &str) -> Result<()> {
        let endpoint = endpoints::delete_run(run_id);
        info!("Deleting run {run_id}");
        self.send(
            self.http.delete(self.url(&endpoint)),
            &format!("Failed to delete run {run_id}"),
        )
        .await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Transport helpers
    // ─────────────────────────────────────────────────────────────

    /// Send a request and return the body of a 2xx response
    async fn send(&self, request: RequestBuilder, message: &str) -> Result<String> {
        let response = request.send().await.map_err(|e| {
            warn!("{message}: {e}");
            Error::request_failed(e.status().map(|s| s.as_u16()), transport_message(message, &e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{message}: HTTP {status}");
            return Err(Error::request_failed(Some(status.as_u16()), message));
        }

        response.text().await.map_err(|e| {
            warn!("{message}: reading body failed: {e}");
            Error::request_failed(Some(status.as_u16()), transport_message(message, &e))
        })
    }

    /// GET a list; `null` or an empty body read as no rows
    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        message: String,
    ) -> Result<Vec<T>> {
        debug!("GET {}", endpoint.path());
        let body = self.send(self.http.get(self.url(endpoint)), &message).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let rows: Option<Vec<T>> = decode(&body, &message)?;
        Ok(rows.unwrap_or_default())
    }

    /// GET a payload that must be present
    async fn get_payload<T: DeserializeOwned>(&self, endpoint: &Endpoint, message: String) -> Result<T> {
        debug!("GET {}", endpoint.path());
        let body = self.send(self.http.get(self.url(endpoint)), &message).await?;
        if body.trim().is_empty() {
            return Err(Error::empty_payload(message));
        }
        let payload: Option<T> = decode(&body, &message)?;
        payload.ok_or_else(|| Error::empty_payload(message))
    }

    async fn send_submission(
        &self,
        request: RequestBuilder,
        message: String,
    ) -> Result<ComparisonSubmitted> {
        let body = self.send(request, &message).await?;
        if body.trim().is_empty() {
            return Ok(ComparisonSubmitted::default());
        }
        let submitted: Option<ComparisonSubmitted> = decode(&body, &message)?;
        Ok(submitted.unwrap_or_default())
    }
}

/// Parse and normalise the base URL so relative joins keep its path
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let normalised = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&normalised).map_err(|_| Error::invalid_url(base_url))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_url(base_url));
    }
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: &str, message: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        warn!("{message}: undecodable body: {e}");
        Error::request_failed(Some(StatusCode::OK.as_u16()), format!("{message}: {e}"))
    })
}

fn transport_message(message: &str, err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("{message}: request timed out")
    } else if err.is_connect() {
        format!("{message}: backend unreachable")
    } else {
        format!("{message}: {err}")
    }
}

async fn archive_part(path: &Path, label: &str) -> Result<Part> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        Error::invalid_input(format!(
            "Cannot read {label} archive {}: {e}",
            path.display()
        ))
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{label}.zip"));
    Ok(Part::bytes(bytes).file_name(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");

        let url = parse_base_url("https://host/prefix").unwrap();
        assert_eq!(url.as_str(), "https://host/prefix/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("ftp://host/"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_decode_failure_keeps_operation_context() {
        let err = decode::<Vec<Run>>("{oops", "Failed to fetch runs").unwrap_err();
        assert!(err.to_string().starts_with("Failed to fetch runs"));
    }

    #[tokio::test]
    async fn test_missing_archive_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = archive_part(&dir.path().join("missing.zip"), "GT")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }
}
