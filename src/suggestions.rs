//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! The helpers here are used by the `Display` implementation of
//! [`crate::error::Error`], so every place that surfaces an error gets the
//! same hints.

use std::path::Path;

/// Render the list of available names for a "not found" message.
pub fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "(none)".to_string()
    } else {
        available.join(", ")
    }
}

/// Return a `hint: Did you mean '<x>'?` suffix when a close match exists.
///
/// Returns an empty string when nothing in `available` is similar enough.
pub fn did_you_mean(name: &str, available: &[String]) -> String {
    let candidates: Vec<&str> = available.iter().map(String::as_str).collect();
    find_similar(name, &candidates)
        .map(|s| format!("\n  hint: Did you mean '{s}'?"))
        .unwrap_or_default()
}

/// Build the message for a compose file that does not exist.
///
/// The whole-application case includes remediation hints, since the usual
/// cause is a project that only defines module-level compose files.
pub fn missing_compose_message(path: &Path, application: bool) -> String {
    if application {
        "No app-level compose file found.\n\n\
         hint: Create a compose.yml file in the root of your project\n\
         hint: Or specify a module: dx up <module-name>"
            .to_string()
    } else {
        format!("Compose file not found: {}", path.display())
    }
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
pub fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
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

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_available() {
        assert_eq!(format_available(&[]), "(none)");
        assert_eq!(
            format_available(&["a".to_string(), "b".to_string()]),
            "a, b"
        );
    }

    #[test]
    fn test_did_you_mean_close_match() {
        let available = vec!["reader".to_string(), "socket".to_string()];
        assert_eq!(
            did_you_mean("raeder", &available),
            "\n  hint: Did you mean 'reader'?"
        );
    }

    #[test]
    fn test_did_you_mean_no_match() {
        let available = vec!["reader".to_string()];
        assert_eq!(did_you_mean("postgres", &available), "");
    }

    #[test]
    fn test_missing_compose_message_variants_differ() {
        let path = Path::new("/repo/compose.yml");
        let app = missing_compose_message(path, true);
        let module = missing_compose_message(path, false);

        assert!(app.contains("hint:"));
        assert!(app.contains("specify a module"));
        assert!(module.contains("/repo/compose.yml"));
        assert_ne!(app, module);
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("reader", "reader"), 0);
        assert_eq!(edit_distance("reade", "reader"), 1);
        assert_eq!(edit_distance("raeder", "reader"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn test_find_similar() {
        let candidates = ["feed", "archivist", "postgres"];

        assert_eq!(find_similar("fed", &candidates), Some("feed"));
        assert_eq!(find_similar("postgre", &candidates), Some("postgres"));
        assert_eq!(find_similar("zzzzzz", &candidates), None);
    }
}
