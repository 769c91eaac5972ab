use dear_imgui_rs::{InputTextFlags, Key, Ui};

use crate::fs::FileSystem;
use crate::layout::LayoutMetrics;

use super::FileBrowserDialog;

const NEW_FOLDER_POPUP: &str = "New Folder##dear_file_dialog";

pub(super) fn draw_new_folder_modal(
    ui: &Ui,
    dialog: &mut FileBrowserDialog,
    fs: &dyn FileSystem,
    metrics: &LayoutMetrics,
) {
    if !dialog.core.config().allow_create_folder {
        dialog.new_folder = Default::default();
        return;
    }

    if dialog.new_folder.open_next {
        dialog.new_folder.open_next = false;
        dialog.new_folder.focus_next = true;
        dialog.new_folder.name.clear();
        if !ui.is_popup_open(NEW_FOLDER_POPUP) {
            ui.open_popup(NEW_FOLDER_POPUP);
        }
    }

    let Some(_popup) = ui.begin_modal_popup(NEW_FOLDER_POPUP) else {
        return;
    };

    ui.text("Create a new folder in:");
    ui.text_disabled(dialog.core.current_path().display().to_string());
    ui.separator();

    if dialog.new_folder.focus_next {
        ui.set_keyboard_focus_here();
        dialog.new_folder.focus_next = false;
    }
    ui.set_next_item_width(metrics.popup_input_width);
    let entered = ui
        .input_text("##new_folder_name", &mut dialog.new_folder.name)
        .flags(InputTextFlags::ENTER_RETURNS_TRUE | InputTextFlags::AUTO_SELECT_ALL)
        .build();

    let button = [metrics.button_width, metrics.button_height];
    let create = ui.button_with_size("Create", button);
    ui.same_line();
    let cancel = ui.button_with_size("Cancel", button) || ui.is_key_pressed(Key::Escape);

    if cancel {
        dialog.new_folder.name.clear();
        ui.close_current_popup();
    } else if create || entered {
        dialog.submit_new_folder(fs);
        ui.close_current_popup();
    }
}
