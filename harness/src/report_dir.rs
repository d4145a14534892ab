//! Route report persistence: write/read a `RouteReportV1` to/from disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   route_report.json   canonical JSON of RouteReportV1::to_json()
//!   route_digest.txt    ASCII digest string ("sha256:...")
//! ```
//!
//! The directory path is never part of the digest.
//!
//! # Fail-closed semantics
//!
//! - Missing file → error
//! - Extra file → error
//! - Report bytes that are not canonical JSON → error
//! - Unknown schema tag → error
//! - Stored digest differs from the recomputed one → error

use std::collections::BTreeSet;
use std::path::Path;

use crate::canon::canonical_json_bytes;
use crate::hash::{canonical_hash, ContentHash, DOMAIN_ROUTE_REPORT};
use crate::runner::{RouteReportV1, ROUTE_REPORT_SCHEMA};

pub const REPORT_FILENAME: &str = "route_report.json";
pub const DIGEST_FILENAME: &str = "route_digest.txt";

const ALL_FILENAMES: [&str; 2] = [REPORT_FILENAME, DIGEST_FILENAME];

/// Error writing or reading a report directory.
#[derive(Debug)]
pub enum ReportDirError {
    /// I/O failure.
    Io { detail: String },
    /// A required file is absent.
    Missing { filename: String },
    /// A file not in the layout is present.
    ExtraFile { name: String },
    /// `route_report.json` is not valid JSON.
    Parse { detail: String },
    /// `route_report.json` is valid JSON but not in canonical form.
    NonCanonical,
    /// The report's `schema` field is not recognized.
    SchemaMismatch { found: String },
    /// `route_digest.txt` does not match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
    /// Canonical JSON serialization failed.
    Canon { detail: String },
}

impl std::fmt::Display for ReportDirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Missing { filename } => write!(f, "missing file: {filename}"),
            Self::ExtraFile { name } => write!(f, "unexpected file: {name}"),
            Self::Parse { detail } => write!(f, "report parse error: {detail}"),
            Self::NonCanonical => f.write_str("report bytes are not canonical JSON"),
            Self::SchemaMismatch { found } => write!(f, "unknown report schema: {found}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
            Self::Canon { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirError {}

/// A report read back from disk and verified.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReportV1 {
    /// Parsed report document.
    pub report: serde_json::Value,
    /// Exact file bytes (canonical).
    pub bytes: Vec<u8>,
    /// Verified digest.
    pub digest: ContentHash,
}

impl StoredReportV1 {
    /// The report's `state` field.
    #[must_use]
    pub fn state(&self) -> &str {
        self.report["state"].as_str().unwrap_or("")
    }

    /// The report's `path` labels.
    #[must_use]
    pub fn path(&self) -> Vec<&str> {
        self.report["path"]
            .as_array()
            .map(|labels| labels.iter().filter_map(serde_json::Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Write `report` to `dir`, creating it if needed. Returns the digest.
///
/// # Errors
///
/// Returns [`ReportDirError::Canon`] if the report does not canonicalize,
/// or [`ReportDirError::Io`] on write failure.
pub fn write_report_dir(report: &RouteReportV1, dir: &Path) -> Result<ContentHash, ReportDirError> {
    let bytes = report.canonical_bytes().map_err(|e| ReportDirError::Canon {
        detail: e.to_string(),
    })?;
    let digest = canonical_hash(DOMAIN_ROUTE_REPORT, &bytes);

    std::fs::create_dir_all(dir).map_err(|e| ReportDirError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;
    write_atomic(&dir.join(REPORT_FILENAME), &bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;

    tracing::debug!(dir = %dir.display(), digest = %digest, "route report written");
    Ok(digest)
}

/// Read and verify a report directory.
///
/// # Errors
///
/// Returns [`ReportDirError`] on any layout, format, or digest failure.
pub fn read_report_dir(dir: &Path) -> Result<StoredReportV1, ReportDirError> {
    let bytes = read_required(dir, REPORT_FILENAME)?;
    let digest_text = read_required(dir, DIGEST_FILENAME)?;

    for name in list_files(dir)? {
        if !ALL_FILENAMES.contains(&name.as_str()) {
            return Err(ReportDirError::ExtraFile { name });
        }
    }

    let report: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ReportDirError::Parse {
            detail: e.to_string(),
        })?;
    let recanon = canonical_json_bytes(&report).map_err(|e| ReportDirError::Canon {
        detail: e.to_string(),
    })?;
    if recanon != bytes {
        return Err(ReportDirError::NonCanonical);
    }

    let schema = report["schema"].as_str().unwrap_or("");
    if schema != ROUTE_REPORT_SCHEMA {
        return Err(ReportDirError::SchemaMismatch {
            found: schema.to_string(),
        });
    }

    let recomputed = canonical_hash(DOMAIN_ROUTE_REPORT, &bytes);
    let stored = String::from_utf8_lossy(&digest_text).trim().to_string();
    if recomputed.as_str() != stored {
        return Err(ReportDirError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    Ok(StoredReportV1 {
        report,
        bytes,
        digest: recomputed,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Write via temp file + rename in the same directory.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirError> {
    let dir = path.parent().ok_or_else(|| ReportDirError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_path = dir.join(format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));
    std::fs::write(&temp_path, content).map_err(|e| ReportDirError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirError::Io {
        detail: format!("rename {} -> {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirError> {
    std::fs::read(dir.join(filename)).map_err(|_| ReportDirError::Missing {
        filename: filename.to_string(),
    })
}

fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ReportDirError::Io {
        detail: format!("read_dir: {e}"),
    })?;
    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReportDirError::Io {
            detail: format!("read_dir entry: {e}"),
        })?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}
