//! # Error Suggestions
//!
//! Helper functions for CLI error messages that carry hints. Errors should
//! say what went wrong and how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use foldertree::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Script file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::script_not_found(path));
//! ```

use std::path::Path;

use crate::script::OPERATION_NAMES;

/// Generate an error for when the script file is not found.
///
/// Includes hints about:
/// - Creating a script file
/// - Using the -s/--script flag
/// - Using the FOLDERTREE_SCRIPT environment variable
pub fn script_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Script file not found: {path}\n\n\
         hint: Create a .foldertree.yaml file in the current directory\n\
         hint: Use -s/--script to specify a different path\n\
         hint: Set FOLDERTREE_SCRIPT environment variable",
        path = path.display()
    )
}

/// Generate an error for an invalid glob pattern.
pub fn invalid_glob(pattern: &str, error: &glob::PatternError) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid glob pattern: {pattern}\n\
         error: {error}\n\n\
         hint: Use * for single path component, ** for recursive matching\n\
         hint: Use [abc] for character classes, [!abc] to negate"
    )
}

/// Generate an error for an unknown script operation.
///
/// Includes the list of valid operations and, for near misses, the closest
/// one.
pub fn unknown_operation(operation: &str) -> anyhow::Error {
    let did_you_mean = find_similar(operation, &OPERATION_NAMES)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown operation: {operation}{did_you_mean}\n\n\
         Valid operations are: {ops}",
        ops = OPERATION_NAMES.join(", ")
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b.len()]
}
