//! Input file enumeration

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Collect the case files under `input`, sorted for deterministic runs
///
/// A file input yields exactly itself, ignoring the extension filter — the
/// operator named it explicitly. A directory is walked recursively and
/// filtered by `extensions` (dot-prefixed, case-insensitive, e.g. `.txt`);
/// an empty filter admits every file. Unreadable directory entries are
/// skipped rather than failing the walk.
pub fn collect_case_files(input: &Path, extensions: &[String]) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| matches_extension(path, extensions))
        .collect();

    files.sort();
    files
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let Some(ext) = path.extension() else {
        return false;
    };
    let dotted = format!(".{}", ext.to_string_lossy().to_lowercase());
    extensions.iter().any(|wanted| wanted == &dotted)
}

/// Normalize a comma-separated extension list to dot-prefixed lowercase
pub fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            let lower = ext.to_lowercase();
            if lower.starts_with('.') {
                lower
            } else {
                format!(".{lower}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn directory_walk_is_recursive_filtered_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.txt"));
        touch(&dir.path().join("a.txt"));
        touch(&dir.path().join("nested/c.TXT"));
        touch(&dir.path().join("nested/skip.pdf"));
        touch(&dir.path().join("skip.html"));

        let files = collect_case_files(dir.path(), &[".txt".to_string()]);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "nested/c.TXT"]);
    }

    #[test]
    fn empty_filter_admits_everything() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.txt"));
        touch(&dir.path().join("b.pdf"));
        assert_eq!(collect_case_files(dir.path(), &[]).len(), 2);
    }

    #[test]
    fn single_file_input_bypasses_the_filter() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.pdf");
        touch(&file);
        let files = collect_case_files(&file, &[".txt".to_string()]);
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn extension_list_parsing_normalizes() {
        assert_eq!(
            parse_extension_list("txt, .PDF ,,md"),
            vec![".txt", ".pdf", ".md"]
        );
        assert!(parse_extension_list("").is_empty());
    }
}
