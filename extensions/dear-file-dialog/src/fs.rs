use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Minimal metadata used by navigation and overwrite checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FsMetadata {
    /// Whether the path (after following links) is a directory.
    pub is_dir: bool,
    /// Whether the path (after following links) is a regular file.
    pub is_file: bool,
}

/// One child of a listed directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// Base name, original case
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Whether this entry is a directory.
    pub is_dir: bool,
    /// Size in bytes; 0 for directories or when the size could not be read.
    pub size: u64,
    /// Last modified timestamp, `None` when unknown.
    pub modified: Option<SystemTime>,
}

/// File system access used by the browser.
///
/// Everything the dialogs touch on disk goes through this trait, so hosts
/// can substitute virtual or sandboxed trees and tests can run in memory.
pub trait FileSystem {
    /// List the immediate children of a directory.
    ///
    /// Implementations should skip or default individual children they
    /// cannot stat rather than failing the whole call.
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FileEntry>>;
    /// Fetch minimal metadata for a path.
    fn metadata(&self, path: &Path) -> std::io::Result<FsMetadata>;
    /// Create a directory and any missing parents.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
    /// The user's home directory.
    fn home_dir(&self) -> PathBuf;
    /// Drive letters or mount points offered by the drives combo.
    fn roots(&self) -> Vec<PathBuf>;

    /// `home/Documents` when it exists, otherwise the home directory.
    fn documents_dir(&self) -> PathBuf {
        let home = self.home_dir();
        let docs = home.join("Documents");
        if self.is_dir(&docs) { docs } else { home }
    }

    /// Whether the path exists.
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }

    /// Whether the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_dir).unwrap_or(false)
    }

    /// Whether the path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_file).unwrap_or(false)
    }
}

/// Default filesystem implementation using `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FileEntry>> {
        let mut out = Vec::new();
        for e in std::fs::read_dir(dir)? {
            let e = match e {
                Ok(v) => v,
                Err(_) => continue,
            };
            let name = e.file_name().to_string_lossy().to_string();
            let path = e.path();
            // Follow links so a link to a directory lists as a directory. A
            // target that cannot be stat'ed (dangling link) keeps size 0 and
            // no timestamp.
            let meta = std::fs::metadata(&path).ok();
            let is_dir = match &meta {
                Some(m) => m.is_dir(),
                None => e.file_type().map(|t| t.is_dir()).unwrap_or(false),
            };
            let size = if is_dir {
                0
            } else {
                meta.as_ref().map(|m| m.len()).unwrap_or(0)
            };
            let modified = meta.as_ref().and_then(|m| m.modified().ok());
            out.push(FileEntry {
                name,
                path,
                is_dir,
                size,
                modified,
            });
        }
        Ok(out)
    }

    fn metadata(&self, path: &Path) -> std::io::Result<FsMetadata> {
        let md = std::fs::metadata(path)?;
        Ok(FsMetadata {
            is_dir: md.is_dir(),
            is_file: md.is_file(),
        })
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn home_dir(&self) -> PathBuf {
        home_dir().unwrap_or_else(fallback_root)
    }

    fn roots(&self) -> Vec<PathBuf> {
        platform_roots()
    }
}

fn home_dir() -> Option<PathBuf> {
    let non_empty = |v: std::ffi::OsString| (!v.is_empty()).then(|| PathBuf::from(v));
    let home = std::env::var_os("HOME").and_then(non_empty);
    #[cfg(target_os = "windows")]
    let home = home
        .or_else(|| std::env::var_os("USERPROFILE").and_then(non_empty))
        .or_else(|| {
            let drive = std::env::var_os("HOMEDRIVE")?;
            let rest = std::env::var_os("HOMEPATH")?;
            let mut p = PathBuf::from(drive);
            p.push(rest);
            Some(p)
        });
    home
}

fn fallback_root() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from("C:\\")
    } else {
        PathBuf::from("/")
    }
}

#[cfg(target_os = "windows")]
fn platform_roots() -> Vec<PathBuf> {
    let mut v = Vec::new();
    for c in b'A'..=b'Z' {
        let p = PathBuf::from(format!("{}:\\", c as char));
        if p.exists() {
            v.push(p);
        }
    }
    v
}

#[cfg(not(target_os = "windows"))]
fn platform_roots() -> Vec<PathBuf> {
    let mut v = vec![PathBuf::from("/")];
    let home = Path::new("/home");
    if home.is_dir() {
        v.push(home.to_path_buf());
    }
    for mount_dir in ["/mnt", "/media", "/run/media"] {
        let Ok(rd) = std::fs::read_dir(mount_dir) else {
            continue;
        };
        let mut mounts: Vec<PathBuf> = rd
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        mounts.sort();
        v.extend(mounts);
    }
    v
}

/// Parent of `path`, or `path` itself at a root.
pub fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

/// Join a child name onto a base directory.
pub fn combine(base: &Path, child: &str) -> PathBuf {
    base.join(child)
}

/// Lower-case dotted extension of a file name (`"a.TXT"` -> `".txt"`), or
/// an empty string when there is none. Leading-dot names such as
/// `".bashrc"` have no extension.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Human readable size: `"512 B"`, `"1.5 KB"`, ... up to TB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Local `"%Y-%m-%d %H:%M"`, empty when the time is unknown.
pub fn format_timestamp(time: Option<SystemTime>) -> String {
    use chrono::{DateTime, Local};
    match time {
        Some(t) => {
            let dt: DateTime<Local> = DateTime::<Local>::from(t);
            dt.format("%Y-%m-%d %H:%M").to_string()
        }
        None => String::new(),
    }
}

/// One clickable segment of the path bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Segment text
    pub label: String,
    /// Path up to and including this segment
    pub path: PathBuf,
}

/// Split a path into breadcrumbs.
///
/// Both `/` and `\` separate segments. A leading `/` becomes a `"/"` root
/// crumb and a drive prefix (`"C:\"`) becomes the first crumb; each crumb's
/// path is the accumulated prefix with a trailing separator, e.g. `/a/b` ->
/// `/`, `/a/`, `/a/b/`.
pub fn breadcrumbs(path: &Path) -> Vec<Breadcrumb> {
    let text = path.to_string_lossy();
    let mut rest: &str = &text;
    let mut out = Vec::new();
    let mut acc = String::new();
    let mut sep = '/';

    let bytes = rest.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        let end = if bytes.len() >= 3 && matches!(bytes[2], b'\\' | b'/') {
            3
        } else {
            2
        };
        let mut drive = rest[..2].to_string();
        drive.push('\\');
        sep = '\\';
        acc.push_str(&drive);
        out.push(Breadcrumb {
            label: drive,
            path: PathBuf::from(&acc),
        });
        rest = &rest[end..];
    } else if rest.starts_with(['/', '\\']) {
        acc.push('/');
        out.push(Breadcrumb {
            label: "/".to_string(),
            path: PathBuf::from("/"),
        });
        rest = &rest[1..];
    }

    for part in rest.split(['/', '\\']).filter(|p| !p.is_empty()) {
        acc.push_str(part);
        acc.push(sep);
        out.push(Breadcrumb {
            label: part.to_string(),
            path: PathBuf::from(&acc),
        });
    }
    out
}

#[cfg(test)]
pub(crate) mod test_fs {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// In-memory tree: registered paths plus the children of each directory.
    pub(crate) struct TestFs {
        pub meta: RefCell<HashMap<PathBuf, FsMetadata>>,
        pub children: RefCell<HashMap<PathBuf, Vec<FileEntry>>>,
        pub read_dir_calls: Cell<usize>,
        pub create_calls: Cell<usize>,
        pub fail_create: bool,
        pub unreadable: Vec<PathBuf>,
        pub home: PathBuf,
    }

    impl Default for TestFs {
        fn default() -> Self {
            let fs = Self {
                meta: RefCell::default(),
                children: RefCell::default(),
                read_dir_calls: Cell::new(0),
                create_calls: Cell::new(0),
                fail_create: false,
                unreadable: Vec::new(),
                home: PathBuf::from("/home/user"),
            };
            fs.add_dir("/");
            fs
        }
    }

    impl TestFs {
        pub fn add_dir(&self, path: impl Into<PathBuf>) -> &Self {
            let path = path.into();
            self.register(&path, true, 0);
            self.children.borrow_mut().entry(path).or_default();
            self
        }

        pub fn add_file(&self, path: impl Into<PathBuf>, size: u64) -> &Self {
            let path = path.into();
            self.register(&path, false, size);
            self
        }

        fn register(&self, path: &Path, is_dir: bool, size: u64) {
            self.meta.borrow_mut().insert(
                path.to_path_buf(),
                FsMetadata {
                    is_dir,
                    is_file: !is_dir,
                },
            );
            let Some(parent) = path.parent() else {
                return;
            };
            if !self.meta.borrow().contains_key(parent) {
                self.add_dir(parent.to_path_buf());
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let mut children = self.children.borrow_mut();
            let list = children.entry(parent.to_path_buf()).or_default();
            if !list.iter().any(|e| e.path == path) {
                list.push(FileEntry {
                    name,
                    path: path.to_path_buf(),
                    is_dir,
                    size,
                    modified: None,
                });
            }
        }
    }

    impl FileSystem for TestFs {
        fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FileEntry>> {
            self.read_dir_calls.set(self.read_dir_calls.get() + 1);
            if self.unreadable.iter().any(|p| p == dir) {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read_dir failure",
                ));
            }
            self.children
                .borrow()
                .get(dir)
                .cloned()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "not found"))
        }

        fn metadata(&self, path: &Path) -> std::io::Result<FsMetadata> {
            self.meta
                .borrow()
                .get(path)
                .copied()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "not found"))
        }

        fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
            self.create_calls.set(self.create_calls.get() + 1);
            if self.fail_create {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "create_dir_all failure",
                ));
            }
            self.add_dir(path.to_path_buf());
            Ok(())
        }

        fn home_dir(&self) -> PathBuf {
            self.home.clone()
        }

        fn roots(&self) -> Vec<PathBuf> {
            vec![PathBuf::from("/")]
        }
    }
}
