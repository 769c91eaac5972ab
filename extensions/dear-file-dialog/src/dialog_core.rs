use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::{BrowserResult, DialogMode, FileDialogError, FileFilter, SortOrder};
use crate::fs::{Breadcrumb, FileEntry, FileSystem, breadcrumbs, combine, parent_of};
use crate::listing::list_directory;
use crate::selection::{Resolution, build_full_path, is_valid_selection, resolve};
use crate::settings::SettingsStore;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// Configuration for one file browser session.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogConfig {
    /// Open / Save / SelectFolder
    pub mode: DialogMode,
    /// Window title; `None` uses the mode's default title
    pub title: Option<String>,
    /// Directory to start in (ignored unless it is a directory)
    pub initial_path: Option<PathBuf>,
    /// Initial contents of the filename input
    pub initial_filename: String,
    /// Filters offered in the filter combo
    pub filters: Vec<FileFilter>,
    /// Initially selected filter (clamped to the list)
    pub filter_index: usize,
    /// Show dotfiles
    pub show_hidden: bool,
    /// Offer the "New Folder" toolbar button
    pub allow_create_folder: bool,
    /// Touch sizing and single-tap navigation
    pub touch_mode: bool,
    /// Effective scale applied on open; `None` keeps the dialog's scale
    pub scale: Option<f32>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self::new(DialogMode::Open)
    }
}

impl DialogConfig {
    /// Defaults for `mode`.
    pub fn new(mode: DialogMode) -> Self {
        Self {
            mode,
            title: None,
            initial_path: None,
            initial_filename: String::new(),
            filters: Vec::new(),
            filter_index: 0,
            show_hidden: false,
            allow_create_folder: true,
            touch_mode: false,
            scale: None,
        }
    }

    /// Set the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the start directory.
    pub fn initial_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.initial_path = Some(path.into());
        self
    }

    /// Prefill the filename input.
    pub fn initial_filename(mut self, name: impl Into<String>) -> Self {
        self.initial_filename = name.into();
        self
    }

    /// Add one filter.
    pub fn filter(mut self, filter: impl Into<FileFilter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Add several filters.
    pub fn filters<I, F>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FileFilter>,
    {
        self.filters.extend(filters.into_iter().map(Into::into));
        self
    }

    /// Initially selected filter.
    pub fn filter_index(mut self, index: usize) -> Self {
        self.filter_index = index;
        self
    }

    /// Show or hide dotfiles.
    pub fn show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    /// Enable or disable folder creation.
    pub fn allow_create_folder(mut self, allow: bool) -> Self {
        self.allow_create_folder = allow;
        self
    }

    /// Touch mode.
    pub fn touch_mode(mut self, touch: bool) -> Self {
        self.touch_mode = touch;
        self
    }

    /// Effective scale.
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Title shown in the window bar.
    pub fn window_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.mode.default_title())
    }
}

/// Structural change recorded while rows are being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    /// Activate the entry at this index (enter directory / pick file)
    Activate(usize),
}

/// What [`FileBrowserCore::confirm`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Nothing valid to confirm
    Rejected,
    /// Save target exists; waiting for [`FileBrowserCore::accept_overwrite`]
    /// or [`FileBrowserCore::cancel_overwrite`]
    NeedsOverwrite(PathBuf),
    /// Session finished with this path
    Selected(PathBuf),
}

type SelectedCallback = Box<dyn FnMut(&Path)>;
type CancelledCallback = Box<dyn FnMut()>;

/// Directory navigation and selection state for one browser.
///
/// The core is UI-agnostic: the ImGui front-end calls into it while drawing
/// and everything here is testable against an in-memory [`FileSystem`].
pub struct FileBrowserCore {
    config: DialogConfig,
    open: bool,
    current: PathBuf,
    entries: Vec<FileEntry>,
    selected: Option<usize>,
    filename: String,
    sort: SortOrder,
    filter_index: usize,
    drives: Vec<PathBuf>,
    pending: Option<PendingAction>,
    scroll_to: Option<usize>,
    pending_overwrite: Option<PathBuf>,
    result: BrowserResult,
    selected_path: Option<PathBuf>,
    on_file_selected: Option<SelectedCallback>,
    on_cancelled: Option<CancelledCallback>,
}

impl Default for FileBrowserCore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FileBrowserCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileBrowserCore")
            .field("mode", &self.config.mode)
            .field("open", &self.open)
            .field("current", &self.current)
            .field("entries", &self.entries.len())
            .field("selected", &self.selected)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl FileBrowserCore {
    /// Closed browser.
    pub fn new() -> Self {
        Self {
            config: DialogConfig::default(),
            open: false,
            current: PathBuf::new(),
            entries: Vec::new(),
            selected: None,
            filename: String::new(),
            sort: SortOrder::NameAsc,
            filter_index: 0,
            drives: Vec::new(),
            pending: None,
            scroll_to: None,
            pending_overwrite: None,
            result: BrowserResult::None,
            selected_path: None,
            on_file_selected: None,
            on_cancelled: None,
        }
    }

    /// Start a session, discarding any previous one.
    ///
    /// The start directory is the configured initial path, else the stored
    /// last path, else the documents directory; candidates that are not
    /// directories are skipped.
    pub fn open(
        &mut self,
        config: DialogConfig,
        fs: &dyn FileSystem,
        settings: &dyn SettingsStore,
    ) {
        let start = config
            .initial_path
            .clone()
            .filter(|p| fs.is_dir(p))
            .or_else(|| settings.last_path().filter(|p| fs.is_dir(p)))
            .unwrap_or_else(|| fs.documents_dir());

        self.filter_index = clamp_filter_index(config.filter_index, config.filters.len());
        self.filename = config.initial_filename.clone();
        self.config = config;
        self.open = true;
        self.current = start;
        self.sort = SortOrder::NameAsc;
        self.pending = None;
        self.pending_overwrite = None;
        self.result = BrowserResult::None;
        self.selected_path = None;
        trace_opened(self.config.mode, &self.current);
        self.refresh_drives(fs);
        self.refresh(fs);
    }

    /// Cancel the session. Pending actions are discarded.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.result = BrowserResult::Cancelled;
        self.clear_transient();
        trace_cancelled();
        if let Some(cb) = self.on_cancelled.as_mut() {
            cb();
        }
    }

    /// Whether a session is running.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Session configuration.
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Current outcome.
    pub fn result(&self) -> BrowserResult {
        self.result
    }

    /// Chosen path after a [`BrowserResult::Selected`] outcome.
    pub fn selected_path(&self) -> Option<&Path> {
        self.selected_path.as_deref()
    }

    /// Index of the active filter.
    pub fn selected_filter_index(&self) -> usize {
        self.filter_index
    }

    /// Directory being shown.
    pub fn current_path(&self) -> &Path {
        &self.current
    }

    /// Current listing.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Selected row.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Filename buffer.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Active sort order.
    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    /// Drives / mount points found when the session opened.
    pub fn drives(&self) -> &[PathBuf] {
        &self.drives
    }

    /// Path bar segments of the current directory.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumbs(&self.current)
    }

    /// Save target awaiting overwrite confirmation.
    pub fn pending_overwrite(&self) -> Option<&Path> {
        self.pending_overwrite.as_deref()
    }

    /// Called with the chosen path when a session finishes successfully.
    pub fn set_on_file_selected(&mut self, callback: impl FnMut(&Path) + 'static) {
        self.on_file_selected = Some(Box::new(callback));
    }

    /// Called when a session is cancelled.
    pub fn set_on_cancelled(&mut self, callback: impl FnMut() + 'static) {
        self.on_cancelled = Some(Box::new(callback));
    }

    /// Extensions of the active filter; always empty in SelectFolder mode.
    pub fn active_extensions(&self) -> Vec<String> {
        if self.config.mode == DialogMode::SelectFolder {
            return Vec::new();
        }
        self.config
            .filters
            .get(self.filter_index)
            .map(FileFilter::extensions)
            .unwrap_or_default()
    }

    /// Whether the confirm button should be enabled.
    pub fn can_confirm(&self) -> bool {
        self.open
            && is_valid_selection(self.config.mode, &self.entries, self.selected, &self.filename)
    }

    /// Re-read the current directory. Clears the selection.
    pub fn refresh(&mut self, fs: &dyn FileSystem) {
        let extensions = self.active_extensions();
        self.entries = list_directory(
            fs,
            &self.current,
            &extensions,
            self.sort,
            self.config.show_hidden,
        );
        self.selected = None;
        self.scroll_to = None;
    }

    /// Re-enumerate drives and mount points.
    pub fn refresh_drives(&mut self, fs: &dyn FileSystem) {
        self.drives = fs.roots();
    }

    /// Enter `path` if it is a directory. Returns whether anything changed.
    pub fn navigate_to(&mut self, fs: &dyn FileSystem, path: &Path) -> bool {
        if !fs.is_dir(path) {
            trace_navigation_ignored(path);
            return false;
        }
        self.current = path.to_path_buf();
        trace_navigated(&self.current);
        self.refresh(fs);
        true
    }

    /// Go to the parent directory; no-op at a root.
    pub fn navigate_up(&mut self, fs: &dyn FileSystem) -> bool {
        let parent = parent_of(&self.current);
        if parent == self.current {
            return false;
        }
        self.navigate_to(fs, &parent)
    }

    /// Go to the home directory.
    pub fn navigate_home(&mut self, fs: &dyn FileSystem) -> bool {
        let home = fs.home_dir();
        self.navigate_to(fs, &home)
    }

    /// Select a row; out of range clears the selection. Selecting a file
    /// copies its name into the filename buffer (except in SelectFolder).
    pub fn select_entry(&mut self, index: usize) {
        let Some(entry) = self.entries.get(index) else {
            self.selected = None;
            return;
        };
        self.selected = Some(index);
        if !entry.is_dir && self.config.mode != DialogMode::SelectFolder {
            self.filename = entry.name.clone();
        }
    }

    /// Double click / tap: enter a directory, or finish with a file in Open
    /// mode. In other modes a file is only selected.
    pub fn activate_entry(
        &mut self,
        fs: &dyn FileSystem,
        settings: &mut dyn SettingsStore,
        index: usize,
    ) {
        let Some(entry) = self.entries.get(index) else {
            return;
        };
        let (is_dir, path) = (entry.is_dir, entry.path.clone());
        if is_dir {
            self.navigate_to(fs, &path);
        } else if self.config.mode == DialogMode::Open {
            self.selected = Some(index);
            self.finalize(settings, path);
        } else {
            self.select_entry(index);
        }
    }

    /// Record a row action to run after the current traversal. One slot; a
    /// later request replaces an earlier one.
    pub fn queue_activate(&mut self, index: usize) {
        self.pending = Some(PendingAction::Activate(index));
    }

    /// Action recorded during the traversal, if any.
    pub fn pending_action(&self) -> Option<PendingAction> {
        self.pending
    }

    /// Apply the recorded action. Call once the row loop has finished.
    pub fn drain_pending(&mut self, fs: &dyn FileSystem, settings: &mut dyn SettingsStore) {
        match self.pending.take() {
            Some(PendingAction::Activate(index)) if self.open => {
                self.activate_entry(fs, settings, index);
            }
            _ => {}
        }
    }

    /// One-shot request to scroll a row into view.
    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.scroll_to.take()
    }

    /// Replace the filename buffer. In Open mode this also selects the first
    /// entry whose name starts with `text` (case-insensitive) and asks the
    /// list to scroll to it; no match keeps the selection.
    pub fn set_filename(&mut self, text: impl Into<String>) {
        self.filename = text.into();
        if self.config.mode != DialogMode::Open || self.filename.is_empty() {
            return;
        }
        let needle = self.filename.to_lowercase();
        if let Some(i) = self
            .entries
            .iter()
            .position(|e| e.name.to_lowercase().starts_with(&needle))
        {
            self.selected = Some(i);
            self.scroll_to = Some(i);
        }
    }

    /// Change the sort order and re-list.
    pub fn set_sort_order(&mut self, fs: &dyn FileSystem, order: SortOrder) {
        self.sort = order;
        self.refresh(fs);
    }

    /// Change the active filter (clamped) and re-list.
    pub fn set_filter_index(&mut self, fs: &dyn FileSystem, index: usize) {
        self.filter_index = clamp_filter_index(index, self.config.filters.len());
        self.refresh(fs);
    }

    /// Create `name` inside the current directory.
    ///
    /// On success the listing is refreshed, the new folder selected and its
    /// path returned. Invalid names are rejected without touching `fs`.
    pub fn request_new_folder(
        &mut self,
        fs: &dyn FileSystem,
        name: &str,
    ) -> Result<PathBuf, FileDialogError> {
        let name = name.trim();
        if !is_valid_folder_name(name) {
            trace_folder_rejected(name, "invalid name");
            return Err(FileDialogError::InvalidName(name.to_string()));
        }
        let path = combine(&self.current, name);
        if fs.exists(&path) {
            trace_folder_rejected(name, "already exists");
            return Err(FileDialogError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }
        if let Err(err) = fs.create_dir_all(&path) {
            trace_folder_rejected(name, "create failed");
            return Err(err.into());
        }
        trace_folder_created(&path);
        self.refresh(fs);
        if let Some(i) = self.entries.iter().position(|e| e.path == path) {
            self.selected = Some(i);
            self.scroll_to = Some(i);
        }
        Ok(path)
    }

    /// Confirm button / Enter.
    pub fn confirm(
        &mut self,
        fs: &dyn FileSystem,
        settings: &mut dyn SettingsStore,
    ) -> ConfirmOutcome {
        if !self.open {
            return ConfirmOutcome::Rejected;
        }
        let extensions = self.active_extensions();
        let Some(path) = build_full_path(
            self.config.mode,
            &self.current,
            &self.entries,
            self.selected,
            &self.filename,
            &extensions,
        ) else {
            return ConfirmOutcome::Rejected;
        };
        match resolve(fs, self.config.mode, path) {
            Resolution::ConfirmOverwrite(path) => {
                trace_overwrite_requested(&path);
                self.pending_overwrite = Some(path.clone());
                ConfirmOutcome::NeedsOverwrite(path)
            }
            Resolution::Finalize(path) => {
                self.finalize(settings, path.clone());
                ConfirmOutcome::Selected(path)
            }
        }
    }

    /// The user agreed to replace the pending target. Returns `false` when
    /// nothing was pending.
    pub fn accept_overwrite(&mut self, settings: &mut dyn SettingsStore) -> bool {
        match self.pending_overwrite.take() {
            Some(path) if self.open => {
                self.finalize(settings, path);
                true
            }
            _ => false,
        }
    }

    /// The user declined to replace the pending target; the browser stays
    /// open.
    pub fn cancel_overwrite(&mut self) {
        self.pending_overwrite = None;
    }

    fn finalize(&mut self, settings: &mut dyn SettingsStore, path: PathBuf) {
        let remembered = if self.config.mode == DialogMode::SelectFolder {
            path.clone()
        } else {
            self.current.clone()
        };
        settings.set_last_path(&remembered);
        trace_selected(self.config.mode, &path);
        self.open = false;
        self.result = BrowserResult::Selected;
        self.clear_transient();
        if let Some(cb) = self.on_file_selected.as_mut() {
            cb(&path);
        }
        self.selected_path = Some(path);
    }

    fn clear_transient(&mut self) {
        self.pending = None;
        self.scroll_to = None;
        self.pending_overwrite = None;
    }
}

fn clamp_filter_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

fn is_valid_folder_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

#[cfg(feature = "tracing")]
fn trace_opened(mode: DialogMode, start: &Path) {
    debug!(event = "browser.opened", ?mode, start = %start.display(), "file browser opened");
}

#[cfg(not(feature = "tracing"))]
fn trace_opened(_mode: DialogMode, _start: &Path) {}

#[cfg(feature = "tracing")]
fn trace_navigated(path: &Path) {
    trace!(event = "browser.navigated", path = %path.display(), "navigated");
}

#[cfg(not(feature = "tracing"))]
fn trace_navigated(_path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_navigation_ignored(path: &Path) {
    trace!(event = "browser.navigation_ignored", path = %path.display(), "not a directory");
}

#[cfg(not(feature = "tracing"))]
fn trace_navigation_ignored(_path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_selected(mode: DialogMode, path: &Path) {
    debug!(event = "browser.selected", ?mode, path = %path.display(), "selection finalized");
}

#[cfg(not(feature = "tracing"))]
fn trace_selected(_mode: DialogMode, _path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_cancelled() {
    debug!(event = "browser.cancelled", "file browser cancelled");
}

#[cfg(not(feature = "tracing"))]
fn trace_cancelled() {}

#[cfg(feature = "tracing")]
fn trace_overwrite_requested(path: &Path) {
    debug!(event = "browser.overwrite_requested", path = %path.display(), "target exists");
}

#[cfg(not(feature = "tracing"))]
fn trace_overwrite_requested(_path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_folder_created(path: &Path) {
    debug!(event = "folder.created", path = %path.display(), "folder created");
}

#[cfg(not(feature = "tracing"))]
fn trace_folder_created(_path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_folder_rejected(name: &str, reason: &'static str) {
    debug!(event = "folder.rejected", name, reason, "folder not created");
}

#[cfg(not(feature = "tracing"))]
fn trace_folder_rejected(_name: &str, _reason: &'static str) {}
