//! Folder paths and the names derived from them
//!
//! Folders are plain `/`-separated strings. The empty string and `"/"` both
//! denote the vault root.

use std::collections::BTreeSet;

use crate::snapshot::FileInfo;

/// Display name for the vault root. Never used as a folder path value.
pub const ROOT_NAME: &str = "Root";

const SEPARATOR: char = '/';

fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Number of `/`-separated segments; the root has depth 0
pub fn folder_depth(path: &str) -> usize {
    if is_root(path) {
        0
    } else {
        segments(path).count()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Distinct non-empty folders referenced by `files`, deepest first.
///
/// Folders of equal depth are ordered lexicographically. Root-level files do
/// not contribute an entry.
pub fn get_folders_by_depth(files: &[FileInfo]) -> Vec<String> {
    let distinct: BTreeSet<&str> = files
        .iter()
        .map(|f| f.folder.as_str())
        .filter(|folder| !is_root(folder))
        .collect();

    let mut folders: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    // Stable sort keeps the lexicographic order within a depth
    folders.sort_by_key(|folder| std::cmp::Reverse(folder_depth(folder)));
    folders
}

/// Whether `candidate` is strictly nested under `parent`.
///
/// The root is a parent of every non-empty path. A path is never its own
/// subfolder, and matches must end on a segment boundary (`abc` is not under
/// `ab`).
pub fn is_subfolder_of(candidate: &str, parent: &str) -> bool {
    if is_root(candidate) {
        return false;
    }
    if is_root(parent) {
        return true;
    }

    let parent = parent.trim_end_matches(SEPARATOR);
    match candidate.strip_prefix(parent) {
        Some(rest) => rest.starts_with(SEPARATOR) && rest.len() > 1,
        None => false,
    }
}

/// Human-readable name candidates for a folder, most specific first.
///
/// The deepest segment, title-cased, comes first. Nested folders add a
/// `"Parent / Child"` variant for context. The root yields `"Root"`.
pub fn candidate_names(folder: &str) -> Vec<String> {
    if is_root(folder) {
        return vec![ROOT_NAME.to_string()];
    }

    let parts: Vec<&str> = segments(folder).collect();
    let Some((deepest, ancestors)) = parts.split_last() else {
        return vec![ROOT_NAME.to_string()];
    };

    let primary = humanize_segment(deepest);
    let mut names = vec![primary.clone()];
    if let Some(parent) = ancestors.last() {
        let qualified = format!("{} / {}", humanize_segment(parent), primary);
        if qualified != primary {
            names.push(qualified);
        }
    }
    names
}

/// `machine_learning-basics` -> `Machine Learning Basics`
pub fn humanize_segment(segment: &str) -> String {
    segment
        .replace(['_', '-'], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(folders: &[&str]) -> Vec<FileInfo> {
        folders
            .iter()
            .enumerate()
            .map(|(i, folder)| {
                if folder.is_empty() {
                    FileInfo::from_path(format!("note-{i}.md"))
                } else {
                    FileInfo::from_path(format!("{folder}/note-{i}.md"))
                }
            })
            .collect()
    }

    #[test]
    fn test_folders_by_depth_deepest_first() {
        let input = files(&["a", "a/b/c", "z/y", "a/b", "", "a/b/c", "m"]);
        assert_eq!(
            get_folders_by_depth(&input),
            vec!["a/b/c", "a/b", "z/y", "a", "m"]
        );
    }

    #[test]
    fn test_folders_by_depth_excludes_root() {
        let input = files(&["", ""]);
        assert!(get_folders_by_depth(&input).is_empty());
    }

    #[test]
    fn test_is_subfolder_of_nested() {
        assert!(is_subfolder_of("a/b/c/d", "a/b"));
        assert!(is_subfolder_of("a/b", "a"));
        assert!(is_subfolder_of("a/b", "a/"));
    }

    #[test]
    fn test_is_subfolder_of_requires_segment_boundary() {
        assert!(!is_subfolder_of("abc", "ab"));
        assert!(!is_subfolder_of("ab/c", "a"));
    }

    #[test]
    fn test_is_subfolder_of_root() {
        assert!(is_subfolder_of("a", ""));
        assert!(is_subfolder_of("a", "/"));
        assert!(is_subfolder_of("a/b", ""));
        assert!(!is_subfolder_of("", ""));
        assert!(!is_subfolder_of("/", ""));
    }

    #[test]
    fn test_is_subfolder_of_self_is_false() {
        assert!(!is_subfolder_of("a/b", "a/b"));
        assert!(!is_subfolder_of("a", "a/b"));
    }

    #[test]
    fn test_candidate_names_root() {
        assert_eq!(candidate_names(""), vec!["Root"]);
    }

    #[test]
    fn test_candidate_names_single_segment() {
        assert_eq!(candidate_names("react"), vec!["React"]);
    }

    #[test]
    fn test_candidate_names_nested() {
        assert_eq!(
            candidate_names("dev/web_dev/react-hooks"),
            vec!["React Hooks", "Web Dev / React Hooks"]
        );
    }

    #[test]
    fn test_humanize_segment() {
        assert_eq!(humanize_segment("machine_learning-basics"), "Machine Learning Basics");
        assert_eq!(humanize_segment("golf"), "Golf");
        assert_eq!(humanize_segment("__"), "");
    }
}
