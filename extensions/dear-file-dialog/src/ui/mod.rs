use std::path::{Path, PathBuf};

use dear_imgui_rs::{Condition, StyleVar, Ui, WindowFlags};

use crate::config::LibraryConfig;
use crate::confirm::{ConfirmationConfig, DialogResult};
use crate::core::BrowserResult;
use crate::dialog_core::{ConfirmOutcome, DialogConfig, FileBrowserCore};
use crate::fs::FileSystem;
use crate::layout::{LayoutMetrics, ScaledLayout};
use crate::settings::SettingsStore;

mod confirm;
mod file_list;
mod footer;
mod popups;
mod toolbar;

pub use confirm::{ConfirmationDialog, ConfirmationUi};

/// A file browser window: navigation core, sizing and per-window UI state.
pub struct FileBrowserDialog {
    core: FileBrowserCore,
    layout: ScaledLayout,
    library: LibraryConfig,
    overwrite: ConfirmationDialog,
    new_folder: NewFolderState,
    drawn: bool,
}

#[derive(Default)]
struct NewFolderState {
    open_next: bool,
    focus_next: bool,
    name: String,
}

impl FileBrowserDialog {
    /// Closed dialog using `library` colors, icons and touch default.
    pub fn new(library: LibraryConfig) -> Self {
        Self {
            core: FileBrowserCore::new(),
            layout: ScaledLayout::new(library.touch_mode, 1.0),
            overwrite: ConfirmationDialog::new(&library),
            library,
            new_folder: NewFolderState::default(),
            drawn: false,
        }
    }

    /// Start a session. Touch mode is on when either the library or the
    /// session asks for it; a configured scale replaces the current one.
    pub fn open(
        &mut self,
        config: DialogConfig,
        fs: &dyn FileSystem,
        settings: &dyn SettingsStore,
    ) {
        self.layout
            .set_touch_mode(self.library.touch_mode || config.touch_mode);
        if let Some(scale) = config.scale {
            self.layout.set_scale(scale);
        }
        self.overwrite.hide();
        self.new_folder = NewFolderState::default();
        self.drawn = false;
        self.core.open(config, fs, settings);
    }

    /// Cancel the session.
    pub fn close(&mut self) {
        self.overwrite.hide();
        self.core.close();
    }

    /// Whether a session is running.
    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }

    /// Outcome of the last session.
    pub fn result(&self) -> BrowserResult {
        self.core.result()
    }

    /// Chosen path after [`BrowserResult::Selected`].
    pub fn selected_path(&self) -> Option<&Path> {
        self.core.selected_path()
    }

    /// Filter active when the session ended.
    pub fn selected_filter_index(&self) -> usize {
        self.core.selected_filter_index()
    }

    /// Effective scale (DPI times user zoom), see
    /// [`effective_scale`](crate::effective_scale).
    pub fn set_scale(&mut self, scale: f32) {
        self.layout.set_scale(scale);
        self.overwrite.set_scale(scale);
    }

    /// Switch between desktop and touch sizing.
    pub fn set_touch_mode(&mut self, touch: bool) {
        self.layout.set_touch_mode(touch);
    }

    /// Navigation state.
    pub fn core(&self) -> &FileBrowserCore {
        &self.core
    }

    /// Navigation state, mutable (callbacks, programmatic navigation).
    pub fn core_mut(&mut self) -> &mut FileBrowserCore {
        &mut self.core
    }

    /// Sizing model.
    pub fn layout(&self) -> &ScaledLayout {
        &self.layout
    }

    /// Colors and icons.
    pub fn library(&self) -> &LibraryConfig {
        &self.library
    }

    /// Whether the window body ran this frame. The window cannot collapse,
    /// so a body that stops running after it was drawn once means the
    /// title-bar close button was used.
    fn track_window(&mut self, drawn: bool) {
        if drawn {
            self.drawn = true;
        } else if self.drawn && self.core.is_open() {
            self.close();
        }
    }

    /// Try to create the typed folder. Failures are logged by the core and
    /// otherwise leave the browser as it was; the popup closes either way.
    fn submit_new_folder(&mut self, fs: &dyn FileSystem) -> Option<PathBuf> {
        let name = std::mem::take(&mut self.new_folder.name);
        self.core.request_new_folder(fs, &name).ok()
    }

    fn on_confirm_outcome(&mut self, outcome: ConfirmOutcome, metrics: &LayoutMetrics) {
        if let ConfirmOutcome::NeedsOverwrite(path) = outcome {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            self.overwrite.show(
                ConfirmationConfig::overwrite(&name)
                    .touch_mode(metrics.touch)
                    .scale(metrics.scale),
            );
        }
    }
}

/// Entry points on [`Ui`].
pub trait FileDialogExt {
    /// File browser renderer.
    fn file_browser(&self) -> FileBrowserUi<'_>;
    /// Confirmation prompt renderer.
    fn confirmation(&self) -> ConfirmationUi<'_>;
}

impl FileDialogExt for Ui {
    fn file_browser(&self) -> FileBrowserUi<'_> {
        FileBrowserUi { ui: self }
    }

    fn confirmation(&self) -> ConfirmationUi<'_> {
        ConfirmationUi::new(self)
    }
}

/// UI handle for [`FileBrowserDialog`].
pub struct FileBrowserUi<'ui> {
    ui: &'ui Ui,
}

impl<'ui> FileBrowserUi<'ui> {
    /// Draw one frame. Returns the terminal result on the frame the session
    /// ends and [`BrowserResult::None`] otherwise.
    pub fn render(
        &self,
        dialog: &mut FileBrowserDialog,
        fs: &dyn FileSystem,
        settings: &mut dyn SettingsStore,
    ) -> BrowserResult {
        if !dialog.core.is_open() {
            return BrowserResult::None;
        }
        let ui = self.ui;
        let display = ui.io().display_size();
        let resized = dialog.layout.take_resized();
        let metrics = *dialog.layout.metrics(display);

        let size = [
            metrics.dialog_width.max(metrics.dialog_min_size[0]),
            metrics.dialog_height.max(metrics.dialog_min_size[1]),
        ];
        let pos = [
            ((display[0] - size[0]) * 0.5).max(0.0),
            ((display[1] - size[1]) * 0.5).max(0.0),
        ];
        let cond = if resized || metrics.touch {
            Condition::Always
        } else {
            Condition::Appearing
        };
        let mut flags = WindowFlags::NO_COLLAPSE | WindowFlags::NO_SAVED_SETTINGS;
        if metrics.touch {
            flags |= WindowFlags::NO_RESIZE | WindowFlags::NO_MOVE;
        }
        let title = format!(
            "{}##dear_file_dialog",
            dialog.core.config().window_title()
        );

        let drawn = ui
            .window(title)
            .size(size, cond)
            .position(pos, cond)
            .flags(flags)
            .build(|| {
                let _scrollbar = ui.push_style_var(StyleVar::ScrollbarSize(metrics.scrollbar_width));
                let _grab = ui.push_style_var(StyleVar::GrabMinSize(metrics.grab_min_size));

                toolbar::draw_toolbar(ui, dialog, fs, &metrics);
                toolbar::draw_path_bar(ui, dialog, fs, &metrics);
                file_list::draw_file_list(ui, dialog, fs, settings, &metrics);
                if let Some(outcome) = footer::draw_footer(ui, dialog, fs, settings, &metrics) {
                    dialog.on_confirm_outcome(outcome, &metrics);
                }
                popups::draw_new_folder_modal(ui, dialog, fs, &metrics);

                match ConfirmationUi::new(ui).render(&mut dialog.overwrite) {
                    DialogResult::Yes => {
                        dialog.core.accept_overwrite(settings);
                    }
                    DialogResult::None => {
                        if !dialog.overwrite.is_shown() && dialog.core.pending_overwrite().is_some()
                        {
                            dialog.core.cancel_overwrite();
                        }
                    }
                    _ => dialog.core.cancel_overwrite(),
                }
            })
            .is_some();
        dialog.track_window(drawn);

        if dialog.core.is_open() {
            BrowserResult::None
        } else {
            dialog.overwrite.hide();
            dialog.core.result()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DialogMode;
    use crate::fs::test_fs::TestFs;
    use crate::settings::MemorySettings;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn opened() -> FileBrowserDialog {
        let fs = TestFs::default();
        fs.add_dir("/home/user/Documents");
        let mut dialog = FileBrowserDialog::new(LibraryConfig::default());
        dialog.open(DialogConfig::new(DialogMode::Open), &fs, &MemorySettings::new());
        dialog
    }

    #[test]
    fn close_button_cancels_after_first_draw() {
        let mut dialog = opened();
        let cancelled = Rc::new(Cell::new(0));
        let seen = Rc::clone(&cancelled);
        dialog.core_mut().set_on_cancelled(move || seen.set(seen.get() + 1));

        // Not drawn yet: nothing to close.
        dialog.track_window(false);
        assert!(dialog.is_open());

        dialog.track_window(true);
        dialog.track_window(true);
        assert!(dialog.is_open());

        dialog.track_window(false);
        assert!(!dialog.is_open());
        assert_eq!(dialog.result(), BrowserResult::Cancelled);
        dialog.track_window(false);
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn new_folder_submission_keeps_no_error_state() {
        let mut fs = TestFs::default();
        fs.add_dir("/home/user/Documents");
        let mut dialog = FileBrowserDialog::new(LibraryConfig::default());
        dialog.open(DialogConfig::new(DialogMode::Open), &fs, &MemorySettings::new());

        dialog.new_folder.name = "made".to_string();
        assert_eq!(
            dialog.submit_new_folder(&fs),
            Some(PathBuf::from("/home/user/Documents/made"))
        );
        assert!(dialog.new_folder.name.is_empty());

        fs.fail_create = true;
        let before = dialog.core().entries().to_vec();
        dialog.new_folder.name = "other".to_string();
        assert_eq!(dialog.submit_new_folder(&fs), None);
        assert!(dialog.new_folder.name.is_empty());
        assert_eq!(dialog.core().entries(), before.as_slice());
        assert!(dialog.is_open());
    }

    #[test]
    fn reopening_forgets_previous_window() {
        let mut dialog = opened();
        dialog.track_window(true);
        let fs = TestFs::default();
        dialog.open(DialogConfig::new(DialogMode::Save), &fs, &MemorySettings::new());
        dialog.track_window(false);
        assert!(dialog.is_open());
    }
}
