use dear_imgui_rs::{InputTextFlags, Key, Ui};

use crate::core::DialogMode;
use crate::dialog_core::ConfirmOutcome;
use crate::fs::FileSystem;
use crate::layout::LayoutMetrics;
use crate::settings::SettingsStore;

use super::FileBrowserDialog;

/// Filename input, filter combo and the Cancel / confirm buttons.
///
/// Returns the outcome when the confirm button (or Enter in the input) was
/// used this frame.
pub(super) fn draw_footer(
    ui: &Ui,
    dialog: &mut FileBrowserDialog,
    fs: &dyn FileSystem,
    settings: &mut dyn SettingsStore,
    metrics: &LayoutMetrics,
) -> Option<ConfirmOutcome> {
    let mode = dialog.core.config().mode;
    let filters = &dialog.core.config().filters;
    let show_filter = mode != DialogMode::SelectFolder && !filters.is_empty();
    let spacing = metrics.button_spacing;

    ui.align_text_to_frame_padding();
    ui.text(if mode == DialogMode::SelectFolder {
        "Folder:"
    } else {
        "File name:"
    });
    ui.same_line();

    let reserved = if show_filter {
        metrics.sort_combo_width + spacing
    } else {
        0.0
    };
    let input_w = (ui.content_region_avail_width() - reserved).max(60.0);
    ui.set_next_item_width(input_w);

    let mut entered = false;
    if mode == DialogMode::SelectFolder {
        let mut shown = dialog.core.current_path().display().to_string();
        ui.input_text("##filename", &mut shown)
            .read_only(true)
            .build();
    } else {
        let mut buffer = dialog.core.filename().to_string();
        entered = ui
            .input_text("##filename", &mut buffer)
            .flags(InputTextFlags::ENTER_RETURNS_TRUE)
            .build();
        if buffer != dialog.core.filename() {
            dialog.core.set_filename(buffer);
        }
    }

    if show_filter {
        ui.same_line();
        ui.set_next_item_width(reserved - spacing);
        let current = dialog.core.selected_filter_index();
        let mut next = current;
        let preview = dialog
            .core
            .config()
            .filters
            .get(current)
            .map(|f| f.display_string())
            .unwrap_or_default();
        if let Some(_combo) = ui.begin_combo("##filter", preview) {
            for (i, filter) in dialog.core.config().filters.iter().enumerate() {
                if ui
                    .selectable_config(filter.display_string())
                    .selected(i == current)
                    .build()
                {
                    next = i;
                }
            }
        }
        if next != current {
            dialog.core.set_filter_index(fs, next);
        }
    }

    let button = [metrics.button_width, metrics.button_height];
    let group_w = button[0] * 2.0 + spacing;
    let start_x = ui.cursor_pos_x();
    let avail_w = ui.content_region_avail_width();
    ui.set_cursor_pos_x((start_x + avail_w - group_w).max(start_x));

    if ui.button_with_size("Cancel", button) {
        dialog.close();
        return None;
    }
    ui.same_line();
    let can_confirm = dialog.core.can_confirm();
    let disabled = ui.begin_disabled_with_cond(!can_confirm);
    let confirm_clicked = ui.button_with_size(mode.confirm_label(), button);
    drop(disabled);

    let no_popup_pending = !dialog.overwrite.is_shown() && !dialog.new_folder.open_next;
    let enter_on_list =
        can_confirm && no_popup_pending && !ui.io().want_text_input() && ui.is_key_pressed(Key::Enter);
    if (confirm_clicked || entered || enter_on_list) && no_popup_pending {
        return Some(dialog.core.confirm(fs, settings));
    }
    None
}
