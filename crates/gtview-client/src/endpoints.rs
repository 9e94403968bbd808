//! Backend endpoint paths
//!
//! Every path is relative to the configured base URL. The Django routes end
//! in a slash; the comparison routes (run results, file diff) do not.
//! Identifiers are added as single path
//! segments, so they are percent-encoded and can never add extra segments.

use gtview_core::{strip_last_segment, FolderKind};
use url::Url;

/// A backend path: `/`-joined segments plus an optional query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    trailing_slash: bool,
}

impl Endpoint {
    fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            trailing_slash: true,
        }
    }

    /// Route without the trailing slash
    fn bare(mut self) -> Self {
        self.trailing_slash = false;
        self
    }

    fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// The relative path as it appears on the wire, unencoded
    ///
    /// `api/runs/r1/files/doc_1/?page=2`
    pub fn path(&self) -> String {
        let mut path = self.segments.join("/");
        if self.trailing_slash {
            path.push('/');
        }
        if !self.query.is_empty() {
            let query: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            path.push('?');
            path.push_str(&query.join("&"));
        }
        path
    }

    /// Resolve against the base URL, percent-encoding segments and query
    pub fn resolve(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(self.segments.iter());
            if self.trailing_slash {
                segments.push("");
            }
        }
        if self.query.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }
}

pub fn all_runs() -> Endpoint {
    Endpoint::new(["api", "summary", "all_runs"])
}

pub fn indentation_runs() -> Endpoint {
    Endpoint::new(["api", "indent", "summary", "all_runs"])
}

pub fn run_detail(run_id: &str) -> Endpoint {
    Endpoint::new(["api", "runs", run_id])
}

pub fn indentation_detail(run_id: &str) -> Endpoint {
    Endpoint::new(["api", "indent", "runs", run_id])
}

pub fn three_way_view(run_id: &str, file_name: &str, page: u32) -> Endpoint {
    Endpoint::new(["api", "runs", run_id, "files", file_name]).with_query("page", page.to_string())
}

/// Indentation variant: the trailing page segment of the identifier is dropped
pub fn indentation_three_way_view(run_id: &str, file_name: &str, page: u32) -> Endpoint {
    Endpoint::new([
        "api",
        "indent",
        "runs",
        run_id,
        "files",
        strip_last_segment(file_name),
    ])
    .with_query("page", page.to_string())
}

pub fn upload_and_compare() -> Endpoint {
    Endpoint::new(["api", "upload-and-compare"])
}

pub fn compare_server_folders() -> Endpoint {
    Endpoint::new(["api", "compare-s3-folders"])
}

pub fn unprocessed_folders(kind: FolderKind) -> Endpoint {
    Endpoint::new(["api", "unprocessed-folders", kind.path_segment()])
}

pub fn delete_run(run_id: &str) -> Endpoint {
    run_detail(run_id)
}

pub fn run_results(run_id: &str) -> Endpoint {
    Endpoint::new(["api", "comparison", "runs", run_id, "details"]).bare()
}

pub fn file_diff(run_id: &str, file_name: &str, suffix: &str) -> Endpoint {
    Endpoint::new(["api", "comparison", "runs", run_id, "diff"])
        .bare()
        .with_query("fileName", file_name)
        .with_query("suffix", suffix)
}
