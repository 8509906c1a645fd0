//! Baseline sheet names
//!
//! Baseline names are free text and need not be unique, while sheet names
//! must be valid and unique ignoring case. Every baseline gets a sheet name
//! derived from its display name:
//!
//! 1. `[ ] : * ? / \` become `_`, surrounding `'` and whitespace are dropped
//! 2. an empty result becomes `Baseline {n}`
//! 3. the name is cut to 31 characters and trimmed again
//! 4. a name already taken (including the fixed sheets and `History`) gets
//!    ` (2)`, ` (3)`, ... appended, cutting the stem to keep 31 characters
//!
//! Each name that differs from the baseline's display name is reported as I001.

use std::collections::HashSet;

use quotegen_core::{Baseline, Diagnostic, DiagnosticCode};

use crate::layout::{CHARTS_SHEET, CONFIGURATION_SHEET, DASHBOARD_SHEET, QUOTATION_SHEET};

/// Excel's sheet name length limit
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Names no baseline sheet may take
pub const RESERVED_SHEET_NAMES: [&str; 5] = [
    DASHBOARD_SHEET,
    CONFIGURATION_SHEET,
    QUOTATION_SHEET,
    CHARTS_SHEET,
    "History",
];

const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Make a single name valid, without regard to uniqueness
pub fn sanitize(name: &str, ordinal: usize) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    // The cut can expose a trailing `'`, so trim again afterwards
    let cut = truncate(trim_name(&replaced), MAX_SHEET_NAME_LEN);
    let trimmed = trim_name(&cut);
    if trimmed.is_empty() {
        return Baseline::default_for(ordinal).name;
    }
    trimmed.to_string()
}

/// Assign a unique sheet name to every baseline, in order
pub fn assign_sheet_names(baselines: &[Baseline]) -> (Vec<String>, Vec<Diagnostic>) {
    let mut taken: HashSet<String> = RESERVED_SHEET_NAMES
        .iter()
        .map(|n| n.to_lowercase())
        .collect();
    let mut names = Vec::with_capacity(baselines.len());
    let mut diagnostics = Vec::new();

    for (ordinal, baseline) in baselines.iter().enumerate() {
        let stem = sanitize(&baseline.name, ordinal);
        let mut candidate = stem.clone();
        let mut suffix = 2;
        while taken.contains(&candidate.to_lowercase()) {
            let tail = format!(" ({suffix})");
            let room = MAX_SHEET_NAME_LEN - tail.chars().count();
            candidate = format!("{}{}", trim_name(&truncate(&stem, room)), tail);
            suffix += 1;
        }
        taken.insert(candidate.to_lowercase());

        if candidate != baseline.name {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::I001SheetRenamed,
                    format!(
                        "baseline {} '{}' is written to sheet '{}'",
                        ordinal + 1,
                        baseline.name,
                        candidate
                    ),
                )
                .with_note(
                    "sheet names are at most 31 characters, unique ignoring case, \
                     and cannot contain [ ] : * ? / \\",
                ),
            );
        }
        names.push(candidate);
    }

    (names, diagnostics)
}

fn trim_name(name: &str) -> &str {
    name.trim_matches(|c: char| c == '\'' || c.is_whitespace())
}

fn truncate(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(names: &[&str]) -> Vec<Baseline> {
        names.iter().map(|n| Baseline::new(*n)).collect()
    }

    #[test]
    fn valid_unique_names_are_kept() {
        let (names, diagnostics) = assign_sheet_names(&named(&["Baseline 1", "Fast Track"]));
        assert_eq!(names, vec!["Baseline 1", "Fast Track"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn forbidden_characters_are_replaced() {
        assert_eq!(sanitize("Q1/Q2: [draft]?", 0), "Q1_Q2_ _draft__");
        assert_eq!(sanitize("'quoted'", 0), "quoted");
        assert_eq!(sanitize("  ", 2), "Baseline 3");
    }

    #[test]
    fn long_names_are_cut() {
        let long = "A".repeat(40);
        assert_eq!(sanitize(&long, 0).chars().count(), 31);
    }

    #[test]
    fn cut_never_ends_on_an_apostrophe() {
        let name = format!("{}'s plan", "A".repeat(30));
        let sheet = sanitize(&name, 0);
        assert_eq!(sheet, "A".repeat(30));
        assert!(!sheet.ends_with('\''));

        let spaced = format!("{} x", "C".repeat(30));
        assert_eq!(sanitize(&spaced, 0), "C".repeat(30));
    }

    #[test]
    fn duplicates_get_numbered_ignoring_case() {
        let (names, diagnostics) =
            assign_sheet_names(&named(&["Option", "option", "OPTION", "Other"]));
        assert_eq!(names, vec!["Option", "option (2)", "OPTION (3)", "Other"]);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics
            .iter()
            .all(|d| d.code == DiagnosticCode::I001SheetRenamed));
    }

    #[test]
    fn fixed_sheet_names_are_reserved() {
        let (names, _) = assign_sheet_names(&named(&["Dashboard", "charts", "History"]));
        assert_eq!(names, vec!["Dashboard (2)", "charts (2)", "History (2)"]);
    }

    #[test]
    fn numbered_long_names_stay_within_limit() {
        let long = "B".repeat(35);
        let (names, _) = assign_sheet_names(&named(&[&long, &long]));
        assert_eq!(names[0].chars().count(), 31);
        assert_eq!(names[1].chars().count(), 31);
        assert!(names[1].ends_with(" (2)"));
        assert_ne!(names[0].to_lowercase(), names[1].to_lowercase());
    }
}
