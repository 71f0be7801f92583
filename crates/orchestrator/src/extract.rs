#![forbid(unsafe_code)]

use config::{ReportRule, RuleKind};
use std::collections::HashMap;

/// Attribute-key to attribute-value mapping produced by one check
/// evaluation. Empty means nothing to report.
pub type Finding = HashMap<String, String>;

/// Applies extraction rules to a process command line.
///
/// Pure: no I/O, deterministic for the same tokens and rules. A rule
/// whose property is absent contributes no key at all.
pub fn extract_attributes(cmdline: &[String], rules: &[ReportRule]) -> Finding {
    let tokens = parse_cmdline(cmdline);
    let mut finding = Finding::new();

    for rule in rules {
        match rule.kind {
            RuleKind::Flag => {
                let Some(&extracted) = tokens.get(rule.property.as_str()) else {
                    continue;
                };
                // Once presence is confirmed, a literal override beats
                // whatever the token carried.
                let value = rule.value.as_deref().unwrap_or(extracted);
                finding.insert(rule.as_key.clone(), value.to_owned());
            }
        }
    }

    finding
}

/// Parses tokens into a property-to-value table.
///
/// `property=value` splits on the first `=`; a bare token maps to the
/// empty string (presence-only flag). A repeated property keeps its
/// last occurrence.
fn parse_cmdline(cmdline: &[String]) -> HashMap<&str, &str> {
    let mut tokens = HashMap::new();
    for token in cmdline {
        match token.split_once('=') {
            Some((property, value)) => tokens.insert(property, value),
            None => tokens.insert(token.as_str(), ""),
        };
    }
    tokens
}
