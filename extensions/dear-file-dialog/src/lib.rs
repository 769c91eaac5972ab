#![deny(missing_docs)]
//! Open / Save / Select Folder file browser and modal confirmation prompts
//! for `dear-imgui-rs`, with touch-friendly sizing and DPI/user-scale
//! awareness.
//!
//! The navigation and confirmation state machines ([`FileBrowserCore`],
//! [`ConfirmationCore`]) and the sizing model ([`ScaledLayout`]) carry no
//! ImGui types; filesystem access goes through the [`FileSystem`] trait and
//! the last visited directory through [`SettingsStore`]. The `imgui` feature
//! adds the front-end drawn each frame from the host's render loop:
//!
//! ```no_run
//! use dear_file_dialog::{
//!     DialogConfig, DialogMode, FileBrowserDialog, FileDialogExt, LibraryConfig,
//!     MemorySettings, StdFileSystem,
//! };
//! # use dear_imgui_rs::*;
//! # let mut ctx = Context::create();
//! let fs = StdFileSystem;
//! let mut settings = MemorySettings::new();
//! let mut dialog = FileBrowserDialog::new(LibraryConfig::default());
//! dialog.open(
//!     DialogConfig::new(DialogMode::Open).filter(("Text Files", "*.txt;*.md")),
//!     &fs,
//!     &settings,
//! );
//!
//! // every frame
//! # let ui = ctx.frame();
//! if ui.file_browser().render(&mut dialog, &fs, &mut settings).is_terminal() {
//!     println!("picked {:?}", dialog.selected_path());
//! }
//! ```
//!
//! Note: the default font has no icon glyphs. [`IconSet::font_awesome`] is
//! only useful once a FontAwesome font is merged into the atlas; the default
//! [`IconSet::text_fallback`] works with any font.

mod config;
mod confirm;
mod core;
mod dialog_core;
mod fs;
mod layout;
mod listing;
#[cfg(feature = "tracing")]
pub mod logging;
mod selection;
mod settings;
#[cfg(feature = "imgui")]
mod ui;

pub use config::{ColorConfig, IconSet, LibraryConfig};
pub use confirm::{
    ButtonSet, ConfirmationConfig, ConfirmationCore, DialogButton, DialogIcon, DialogResult,
};
pub use core::{BrowserResult, DialogMode, FileDialogError, FileFilter, SortOrder};
pub use dialog_core::{ConfirmOutcome, DialogConfig, FileBrowserCore, PendingAction};
pub use fs::{
    Breadcrumb, FileEntry, FileSystem, FsMetadata, StdFileSystem, breadcrumbs, combine,
    extension_of, format_size, format_timestamp, parent_of,
};
pub use layout::{BaseSizes, LayoutMetrics, ScaledLayout, effective_scale};
pub use listing::{is_hidden, list_directory, matches_extension, sort_entries};
pub use selection::{
    Resolution, apply_default_extension, build_full_path, is_valid_selection, resolve,
};
pub use settings::{MemorySettings, SettingsStore};
#[cfg(feature = "imgui")]
pub use ui::{ConfirmationDialog, ConfirmationUi, FileBrowserDialog, FileBrowserUi, FileDialogExt};
