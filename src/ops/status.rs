use std::collections::BTreeSet;

use crate::error::Result;
use crate::refs::{current_branch, list_branches};
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::types::Blob;

/// the exact section-ordered status report: branches, staged files, removed
/// files, unstaged modifications, and untracked files. read-only: never
/// touches the index or the working tree.
pub fn status(repo: &Repo) -> Result<String> {
    let staging = StagingArea::load(repo)?;
    let current = current_branch(repo)?;

    let mut out = String::new();

    out.push_str("=== Branches ===\n");
    for branch in list_branches(repo)? {
        if branch == current {
            out.push('*');
        }
        out.push_str(&branch);
        out.push('\n');
    }
    out.push('\n');

    out.push_str("=== Staged Files ===\n");
    for path in staging.added().keys() {
        out.push_str(display_name(path));
        out.push('\n');
    }
    out.push('\n');

    out.push_str("=== Removed Files ===\n");
    for path in staging.removed() {
        out.push_str(display_name(path));
        out.push('\n');
    }
    out.push('\n');

    let working_files: BTreeSet<String> = repo
        .working_tree_files()?
        .into_iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect();
    let effective = staging.effective();

    out.push_str("=== Modifications Not Staged For Commit ===\n");
    for (path, id) in &effective {
        if working_files.contains(path) {
            let current_blob = Blob::from_file(std::path::Path::new(path))?;
            if current_blob.id() != *id {
                out.push_str(display_name(path));
                out.push_str(" (modified)\n");
            }
        } else {
            out.push_str(display_name(path));
            out.push_str(" (deleted)\n");
        }
    }
    out.push('\n');

    out.push_str("=== Untracked Files ===\n");
    for path in &working_files {
        if !effective.contains_key(path) {
            out.push_str(display_name(path));
            out.push('\n');
        }
    }
    out.push('\n');

    Ok(out)
}

fn display_name(path: &str) -> &str {
    std::path::Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{add, commit, rm};
    use std::fs;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn fresh_repo_has_only_current_branch() {
        let (_dir, repo) = test_repo();
        let out = status(&repo).unwrap();
        assert!(out.contains("*master"));
    }

    #[test]
    fn staged_file_appears_in_staged_section() {
        let (dir, repo) = test_repo();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        add(&repo, "a.txt").unwrap();

        let out = status(&repo).unwrap();
        let staged_section = out.split("=== Staged Files ===").nth(1).unwrap();
        assert!(staged_section.contains("a.txt"));
    }

    #[test]
    fn untracked_file_appears_in_untracked_section() {
        let (dir, repo) = test_repo();
        fs::write(dir.path().join("b.txt"), "x").unwrap();

        let out = status(&repo).unwrap();
        let untracked_section = out.split("=== Untracked Files ===").nth(1).unwrap();
        assert!(untracked_section.contains("b.txt"));
    }

    #[test]
    fn modified_tracked_file_is_reported() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        add(&repo, "a.txt").unwrap();
        commit(&repo, "first").unwrap();

        fs::write(&file, "changed").unwrap();
        let out = status(&repo).unwrap();
        let section = out.split("=== Modifications Not Staged For Commit ===").nth(1).unwrap();
        assert!(section.contains("a.txt (modified)"));
    }

    #[test]
    fn deleted_tracked_file_is_reported() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        add(&repo, "a.txt").unwrap();
        commit(&repo, "first").unwrap();

        fs::remove_file(&file).unwrap();
        let out = status(&repo).unwrap();
        let section = out.split("=== Modifications Not Staged For Commit ===").nth(1).unwrap();
        assert!(section.contains("a.txt (deleted)"));
    }

    #[test]
    fn removed_file_appears_in_removed_section() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        add(&repo, "a.txt").unwrap();
        commit(&repo, "first").unwrap();

        rm(&repo, "a.txt").unwrap();
        let out = status(&repo).unwrap();
        let section = out.split("=== Removed Files ===").nth(1).unwrap();
        assert!(section.contains("a.txt"));
    }
}
