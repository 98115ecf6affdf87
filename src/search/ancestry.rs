use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Population codes and the human labels upstream catalogs use for them.
pub const ANCESTRY_LABELS: &[(&str, &str)] = &[
    ("EUR", "European"),
    ("AFR", "African"),
    ("EAS", "East Asian"),
    ("SAS", "South Asian"),
    ("AMR", "Hispanic"),
    ("MIX", "Others/Multi-ancestry"),
];

/// Human label for an ancestry code, case-insensitive.
pub fn label_for(code: &str) -> Option<&'static str> {
    ANCESTRY_LABELS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code.trim()))
        .map(|(_, label)| *label)
}

pub fn is_known_code(code: &str) -> bool {
    label_for(code).is_some()
}

/// Set of requested ancestry codes. Empty means "show everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AncestryFilter(BTreeSet<String>);

impl AncestryFilter {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Loose match of a free-text ancestry label against requested codes.
///
/// The label matches when it contains, case-insensitively, either a
/// requested code or that code's human label. Upstream ancestry fields are
/// not normalized, so this is a substring heuristic and can produce false
/// positives. An empty filter matches vacuously; callers filtering records
/// skip the matcher in that case.
pub fn matches(label: Option<&str>, filter: &AncestryFilter) -> bool {
    if filter.is_empty() {
        return true;
    }
    let label = match label.map(str::trim) {
        Some(l) if !l.is_empty() => l.to_lowercase(),
        _ => return false,
    };

    filter.codes().any(|code| {
        label.contains(&code.to_lowercase())
            || label_for(code).is_some_and(|human| label.contains(&human.to_lowercase()))
    })
}
