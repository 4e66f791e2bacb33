use std::path::PathBuf;

use crate::foundation::error::{SlideError, SlideResult};

/// Paths written by a successful render, in slide order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub success: bool,
    pub cover_path: PathBuf,
    /// Text slides actually written; slides without an output path are absent.
    pub slide_paths: Vec<PathBuf>,
}

impl Manifest {
    pub fn new(cover_path: PathBuf, slide_paths: Vec<PathBuf>) -> Self {
        Self {
            success: true,
            cover_path,
            slide_paths,
        }
    }
}

/// Envelope reported when a render did not complete.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

impl Failure {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

/// Single-line JSON result printed by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Success(Manifest),
    Failure(Failure),
}

impl Envelope {
    pub fn from_result<E: std::fmt::Display>(res: Result<Manifest, E>) -> Self {
        match res {
            Ok(m) => Self::Success(m),
            Err(e) => Self::Failure(Failure::new(e)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn to_json_line(&self) -> SlideResult<String> {
        serde_json::to_string(self).map_err(|e| SlideError::serde(format!("encode result: {e}")))
    }
}
