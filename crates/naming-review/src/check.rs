//! Offline review of a request file, as run by `naming-review --check=<file>`.

use std::path::Path;

use anyhow::{Context, Result};
use naming_types::{Finding, Identifier};
use tracing::info;

use crate::grammar::Grammar;
use crate::handlers::{IdentifierInput, ReviewRequest};
use crate::rules::review_all;

/// Outcome of reviewing one request file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub reviewed: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    /// One `position: name: message` line per finding.
    pub fn lines(&self) -> Vec<String> {
        self.findings.iter().map(ToString::to_string).collect()
    }

    /// Process exit status: 1 when anything was reported.
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.findings.is_empty())
    }
}

/// Read a review request body from `path` and review every identifier in it.
pub fn check_file(grammar: &Grammar, path: impl AsRef<Path>) -> Result<CheckReport> {
    let path = path.as_ref();
    let raw = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let request: ReviewRequest =
        serde_json::from_slice(&raw).with_context(|| format!("parse {}", path.display()))?;
    let identifiers = request
        .identifiers
        .into_iter()
        .map(IdentifierInput::into_identifier)
        .collect::<Result<Vec<Identifier>, _>>()
        .with_context(|| format!("decode identifiers in {}", path.display()))?;
    let findings = review_all(grammar, &identifiers);
    info!(
        "reviewed {} identifiers from {}, {} findings",
        identifiers.len(),
        path.display(),
        findings.len()
    );
    Ok(CheckReport {
        reviewed: identifiers.len(),
        findings,
    })
}
