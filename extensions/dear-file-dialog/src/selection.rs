//! Turning the browser state into a final path.

use std::path::{Path, PathBuf};

use crate::core::DialogMode;
use crate::fs::{FileEntry, FileSystem, combine, extension_of};

/// Whether the confirm action is allowed right now.
///
/// Open needs a selected file, Save needs a non-empty name, SelectFolder
/// always accepts the current directory.
pub fn is_valid_selection(
    mode: DialogMode,
    entries: &[FileEntry],
    selected: Option<usize>,
    filename: &str,
) -> bool {
    match mode {
        DialogMode::Open => selected
            .and_then(|i| entries.get(i))
            .is_some_and(|e| !e.is_dir),
        DialogMode::Save => !filename.is_empty(),
        DialogMode::SelectFolder => true,
    }
}

/// Append the first extension unless `name` already ends in one of them.
///
/// Matching is exact on the lower-cased dotted extension; an empty list
/// leaves the name untouched.
pub fn apply_default_extension(name: &str, extensions: &[String]) -> String {
    let Some(first) = extensions.first() else {
        return name.to_string();
    };
    let current = extension_of(name);
    if extensions.iter().any(|e| *e == current) {
        name.to_string()
    } else {
        format!("{name}{first}")
    }
}

/// The path the dialog would return for the current state, or `None` when
/// nothing valid is selected.
pub fn build_full_path(
    mode: DialogMode,
    current_dir: &Path,
    entries: &[FileEntry],
    selected: Option<usize>,
    filename: &str,
    extensions: &[String],
) -> Option<PathBuf> {
    if !is_valid_selection(mode, entries, selected, filename) {
        return None;
    }
    match mode {
        DialogMode::Open => selected.and_then(|i| entries.get(i)).map(|e| e.path.clone()),
        DialogMode::Save => Some(combine(
            current_dir,
            &apply_default_extension(filename, extensions),
        )),
        DialogMode::SelectFolder => Some(current_dir.to_path_buf()),
    }
}

/// What confirming should do with a resolved path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Return the path to the caller
    Finalize(PathBuf),
    /// Save target is an existing file; ask before replacing it
    ConfirmOverwrite(PathBuf),
}

impl Resolution {
    /// The path either way.
    pub fn path(&self) -> &Path {
        match self {
            Resolution::Finalize(p) | Resolution::ConfirmOverwrite(p) => p,
        }
    }
}

/// Classify a resolved path: in Save mode an existing regular file needs
/// confirmation, everything else finalizes directly.
pub fn resolve(fs: &dyn FileSystem, mode: DialogMode, path: PathBuf) -> Resolution {
    if mode == DialogMode::Save && fs.is_file(&path) {
        Resolution::ConfirmOverwrite(path)
    } else {
        Resolution::Finalize(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::test_fs::TestFs;
    use pretty_assertions::assert_eq;

    fn entries() -> Vec<FileEntry> {
        vec![
            FileEntry {
                name: "docs".into(),
                path: PathBuf::from("/w/docs"),
                is_dir: true,
                size: 0,
                modified: None,
            },
            FileEntry {
                name: "a.txt".into(),
                path: PathBuf::from("/w/a.txt"),
                is_dir: false,
                size: 4,
                modified: None,
            },
        ]
    }

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn validity_per_mode() {
        let e = entries();
        assert!(!is_valid_selection(DialogMode::Open, &e, None, "a.txt"));
        assert!(!is_valid_selection(DialogMode::Open, &e, Some(0), ""));
        assert!(is_valid_selection(DialogMode::Open, &e, Some(1), ""));
        assert!(!is_valid_selection(DialogMode::Open, &e, Some(7), ""));
        assert!(!is_valid_selection(DialogMode::Save, &e, Some(1), ""));
        assert!(is_valid_selection(DialogMode::Save, &e, None, "x"));
        assert!(is_valid_selection(DialogMode::SelectFolder, &[], None, ""));
    }

    #[test]
    fn save_appends_first_extension_only_when_missing() {
        let list = exts(&[".txt", ".md"]);
        assert_eq!(apply_default_extension("report", &list), "report.txt");
        assert_eq!(apply_default_extension("report.txt", &list), "report.txt");
        assert_eq!(apply_default_extension("report.md", &list), "report.md");
        assert_eq!(apply_default_extension("report.TXT", &list), "report.TXT");
        assert_eq!(apply_default_extension("report.doc", &list), "report.doc.txt");
        assert_eq!(apply_default_extension("report", &[]), "report");
    }

    #[test]
    fn full_path_per_mode() {
        let e = entries();
        let dir = Path::new("/w");
        let list = exts(&[".txt"]);
        assert_eq!(
            build_full_path(DialogMode::Open, dir, &e, Some(1), "", &list),
            Some(PathBuf::from("/w/a.txt"))
        );
        assert_eq!(build_full_path(DialogMode::Open, dir, &e, Some(0), "", &list), None);
        assert_eq!(
            build_full_path(DialogMode::Save, dir, &e, None, "notes", &list),
            Some(PathBuf::from("/w/notes.txt"))
        );
        assert_eq!(build_full_path(DialogMode::Save, dir, &e, None, "", &list), None);
        assert_eq!(
            build_full_path(DialogMode::SelectFolder, dir, &e, Some(1), "ignored", &list),
            Some(PathBuf::from("/w"))
        );
    }

    #[test]
    fn overwrite_only_for_existing_files_in_save_mode() {
        let fs = TestFs::default();
        fs.add_file("/w/a.txt", 4);
        fs.add_dir("/w/docs");
        assert_eq!(
            resolve(&fs, DialogMode::Save, PathBuf::from("/w/a.txt")),
            Resolution::ConfirmOverwrite(PathBuf::from("/w/a.txt"))
        );
        assert_eq!(
            resolve(&fs, DialogMode::Save, PathBuf::from("/w/docs")),
            Resolution::Finalize(PathBuf::from("/w/docs"))
        );
        assert_eq!(
            resolve(&fs, DialogMode::Save, PathBuf::from("/w/new.txt")),
            Resolution::Finalize(PathBuf::from("/w/new.txt"))
        );
        assert_eq!(
            resolve(&fs, DialogMode::Open, PathBuf::from("/w/a.txt")),
            Resolution::Finalize(PathBuf::from("/w/a.txt"))
        );
    }
}
