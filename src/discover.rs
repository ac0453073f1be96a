use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ScanConfig;

/// Returns every `.pdf` file (case-insensitive) under `root`, in
/// lexicographic walk order. Files are never opened here.
///
/// Symlinked files are always listed; symlinked directories are only
/// descended into when `follow_symlinks` is set.
pub fn find_pdfs(root: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>> {
    let exclude_set = build_globset(&scan.exclude_globs)?;

    let mut found = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(scan.follow_symlinks)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let path = entry.path();
        if !is_pdf(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if exclude_set.is_match(relative) {
            continue;
        }

        found.push(path.to_path_buf());
    }

    Ok(found)
}

pub fn is_pdf(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn suffix_match_is_case_insensitive() {
        assert!(is_pdf(Path::new("a/report.pdf")));
        assert!(is_pdf(Path::new("a/REPORT.PDF")));
        assert!(is_pdf(Path::new("Scan.Pdf")));
        assert!(!is_pdf(Path::new("notes.pdf.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn walks_subdirectories_in_sorted_order() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("z.pdf"), b"").unwrap();
        fs::write(root.join("b/nested/deep.PDF"), b"").unwrap();
        fs::write(root.join("a/first.pdf"), b"").unwrap();
        fs::write(root.join("a/readme.md"), b"").unwrap();
        fs::write(root.join("b/image.png"), b"").unwrap();

        let found = find_pdfs(root, &ScanConfig::default()).unwrap();
        assert_eq!(
            names(root, &found),
            vec!["a/first.pdf", "b/nested/deep.PDF", "z.pdf"]
        );
    }

    #[test]
    fn directories_named_like_pdfs_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("folder.pdf")).unwrap();
        fs::write(tmp.path().join("folder.pdf/inner.pdf"), b"").unwrap();

        let found = find_pdfs(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(names(tmp.path(), &found), vec!["folder.pdf/inner.pdf"]);
    }

    #[test]
    fn exclude_globs_are_applied() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("archive")).unwrap();
        fs::write(root.join("archive/old.pdf"), b"").unwrap();
        fs::write(root.join("keep.pdf"), b"").unwrap();

        let scan = ScanConfig {
            exclude_globs: vec!["archive/**".to_string()],
            follow_symlinks: false,
        };
        let found = find_pdfs(root, &scan).unwrap();
        assert_eq!(names(root, &found), vec!["keep.pdf"]);
    }

    #[test]
    fn hidden_directories_are_scanned_without_excludes() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join(".git/objects/blob.pdf"), b"").unwrap();
        fs::write(root.join("keep.pdf"), b"").unwrap();

        let found = find_pdfs(root, &ScanConfig::default()).unwrap();
        assert_eq!(names(root, &found), vec![".git/objects/blob.pdf", "keep.pdf"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_listed_without_following_directories() {
        use std::os::unix::fs::symlink;

        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("real.pdf"), b"").unwrap();
        fs::write(outside.path().join("other.pdf"), b"").unwrap();

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        symlink(outside.path().join("real.pdf"), root.join("link.pdf")).unwrap();
        symlink(outside.path(), root.join("linked_dir")).unwrap();
        symlink(root.join("gone.pdf"), root.join("dangling.pdf")).unwrap();

        let found = find_pdfs(root, &ScanConfig::default()).unwrap();
        assert_eq!(names(root, &found), vec!["link.pdf"]);

        let follow = ScanConfig {
            exclude_globs: Vec::new(),
            follow_symlinks: true,
        };
        let found = find_pdfs(root, &follow).unwrap();
        assert_eq!(
            names(root, &found),
            vec!["link.pdf", "linked_dir/other.pdf", "linked_dir/real.pdf"]
        );
    }
}
