//! Directory listing: enumerate, filter, hide dotfiles, sort.

use std::cmp::Ordering;
use std::path::Path;

use crate::core::SortOrder;
use crate::fs::{FileEntry, FileSystem, extension_of};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// List `dir` through `fs`, keeping directories and files whose extension is
/// in `extensions` (all files when empty), dropping dotfiles unless
/// `include_hidden`, sorted by `order` with directories first.
///
/// An unreadable directory yields an empty list.
pub fn list_directory(
    fs: &dyn FileSystem,
    dir: &Path,
    extensions: &[String],
    order: SortOrder,
    include_hidden: bool,
) -> Vec<FileEntry> {
    #[cfg(feature = "tracing")]
    let started = std::time::Instant::now();

    let mut entries = match fs.read_dir(dir) {
        Ok(v) => v,
        Err(err) => {
            trace_listing_failed(dir, &err);
            return Vec::new();
        }
    };
    entries.retain(|e| {
        (include_hidden || !is_hidden(&e.name))
            && (e.is_dir || matches_extension(&e.name, extensions))
    });
    sort_entries(&mut entries, order);

    #[cfg(feature = "tracing")]
    trace_listing_done(dir, entries.len(), started.elapsed().as_micros());
    entries
}

/// Dotfile convention.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Whether a file name passes the extension filter (empty filter = all).
pub fn matches_extension(name: &str, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let ext = extension_of(name);
    extensions.iter().any(|e| *e == ext)
}

/// Sort in place: directories before files for every order, then by the
/// order's key. Ties on size or date fall back to the name so the result
/// does not depend on enumeration order.
pub fn sort_entries(entries: &mut [FileEntry], order: SortOrder) {
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| compare_within_group(a, b, order))
    });
}

fn compare_within_group(a: &FileEntry, b: &FileEntry, order: SortOrder) -> Ordering {
    let by_name = || compare_names(&a.name, &b.name);
    let ord = match order {
        SortOrder::NameAsc | SortOrder::NameDesc => by_name(),
        SortOrder::SizeAsc | SortOrder::SizeDesc => a.size.cmp(&b.size).then_with(by_name),
        SortOrder::DateAsc | SortOrder::DateDesc => a.modified.cmp(&b.modified).then_with(by_name),
    };
    if order.is_descending() {
        ord.reverse()
    } else {
        ord
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    let la = a.to_lowercase();
    let lb = b.to_lowercase();
    la.cmp(&lb).then_with(|| a.cmp(b))
}

#[cfg(feature = "tracing")]
fn trace_listing_failed(dir: &Path, err: &std::io::Error) {
    debug!(
        event = "listing.failed",
        dir = %dir.display(),
        error = %err,
        "directory listing failed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_listing_failed(_dir: &Path, _err: &std::io::Error) {}

#[cfg(feature = "tracing")]
fn trace_listing_done(dir: &Path, entries: usize, duration_us: u128) {
    trace!(
        event = "listing.done",
        dir = %dir.display(),
        entries,
        duration_us,
        "directory listed"
    );
}
