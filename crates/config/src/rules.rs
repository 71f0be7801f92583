#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Declarative specification of one process compliance check.
///
/// Arrives fully parsed from the config file; the check core never
/// interprets rule syntax beyond what is modeled here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Exact name of the process to match (no globbing, no case-folding).
    pub name: String,

    /// Attributes to extract from the matched process command line.
    #[serde(default)]
    pub report: Vec<ReportRule>,
}

/// One instruction describing which command-line property to look for
/// and how to name its extracted value in the finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRule {
    pub kind: RuleKind,

    /// Command-line token to search for, e.g. `--path`.
    pub property: String,

    /// Output attribute key in the finding.
    #[serde(rename = "as")]
    pub as_key: String,

    /// Literal that replaces any extracted value once the property is
    /// found, in either token form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    #[default]
    Flag,
}
