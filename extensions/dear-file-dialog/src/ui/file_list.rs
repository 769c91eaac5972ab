use dear_imgui_rs::{
    ListClipper, MouseButton, SelectableFlags, StyleColor, TableColumnFlags, TableFlags, Ui,
};

use crate::fs::{FileSystem, format_size, format_timestamp};
use crate::layout::LayoutMetrics;
use crate::settings::SettingsStore;

use super::FileBrowserDialog;

/// Name / Size / Modified table, virtualized with a list clipper.
///
/// Row clicks only record intent; navigation runs once the table is closed
/// so the entry list is never replaced mid-traversal.
pub(super) fn draw_file_list(
    ui: &Ui,
    dialog: &mut FileBrowserDialog,
    fs: &dyn FileSystem,
    settings: &mut dyn SettingsStore,
    metrics: &LayoutMetrics,
) {
    let colors = dialog.library.colors;
    let icons = dialog.library.icons;
    let row_h = metrics.floored_row_height();
    let footer_h = metrics.input_height + metrics.button_height + ui.frame_height();
    let list_h = (ui.content_region_avail()[1] - footer_h).max(row_h * 3.0);
    let touch = metrics.touch;

    let flags = TableFlags::ROW_BG
        | TableFlags::BORDERS_OUTER
        | TableFlags::BORDERS_INNER_V
        | TableFlags::SCROLL_Y
        | TableFlags::RESIZABLE;

    let _bg = ui.push_style_color(StyleColor::ChildBg, colors.list_background);
    let _border = ui.push_style_color(StyleColor::TableBorderStrong, colors.list_border);
    let _selected = ui.push_style_color(StyleColor::Header, colors.selected_row);
    let _hovered = ui.push_style_color(StyleColor::HeaderHovered, colors.hovered_row);

    if let Some(_table) = ui.begin_table_with_sizing("##file_list", 3, flags, [0.0, list_h], 0.0) {
        ui.table_setup_scroll_freeze(0, 1);
        ui.table_setup_column("Name", TableColumnFlags::WIDTH_STRETCH, 0.0, 0);
        ui.table_setup_column(
            "Size",
            TableColumnFlags::WIDTH_FIXED,
            metrics.size_column_width,
            1,
        );
        ui.table_setup_column(
            "Modified",
            TableColumnFlags::WIDTH_FIXED,
            metrics.date_column_width,
            2,
        );
        ui.table_headers_row();

        if let Some(index) = dialog.core.take_scroll_request() {
            ui.set_scroll_y(index as f32 * row_h);
        }

        let entries = dialog.core.entries();
        let selected = dialog.core.selected_index();
        let mut clicked: Option<usize> = None;
        let mut activated: Option<usize> = None;

        // Double click is a desktop gesture; on touch a tap enters folders.
        let row_flags = if touch {
            SelectableFlags::SPAN_ALL_COLUMNS
        } else {
            SelectableFlags::SPAN_ALL_COLUMNS | SelectableFlags::ALLOW_DOUBLE_CLICK
        };
        let count = i32::try_from(entries.len()).unwrap_or(i32::MAX);
        let clipper = ListClipper::new(count).items_height(row_h).begin(ui);
        for i in clipper.iter() {
            let idx = i as usize;
            let Some(entry) = entries.get(idx) else {
                continue;
            };
            let is_selected = selected == Some(idx);
            ui.table_next_row();

            ui.table_next_column();
            let text_color = if is_selected {
                colors.selected_text
            } else if entry.is_dir {
                colors.directory_text
            } else {
                colors.file_text
            };
            let icon = if entry.is_dir { icons.folder } else { icons.file };
            let label = format!("{icon} {}##row{idx}", entry.name);
            let color = ui.push_style_color(StyleColor::Text, text_color);
            let pressed = ui
                .selectable_config(label)
                .selected(is_selected)
                .flags(row_flags)
                .size([0.0, row_h])
                .build();
            drop(color);

            let double_clicked =
                !touch && ui.is_item_hovered() && ui.is_mouse_double_clicked(MouseButton::Left);
            match row_intent(entry.is_dir, touch, pressed, double_clicked) {
                RowIntent::Select => clicked = Some(idx),
                RowIntent::Activate => activated = Some(idx),
                RowIntent::Nothing => {}
            }

            ui.table_next_column();
            if !entry.is_dir {
                ui.text_colored(colors.secondary_text, format_size(entry.size));
            }
            ui.table_next_column();
            ui.text_colored(colors.secondary_text, format_timestamp(entry.modified));
        }

        if let Some(idx) = clicked {
            dialog.core.select_entry(idx);
        }
        if let Some(idx) = activated {
            dialog.core.queue_activate(idx);
        }
    }

    dialog.core.drain_pending(fs, settings);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RowIntent {
    Nothing,
    Select,
    Activate,
}

fn row_intent(is_dir: bool, touch: bool, pressed: bool, double_clicked: bool) -> RowIntent {
    if touch {
        match (pressed, is_dir) {
            (true, true) => RowIntent::Activate,
            (true, false) => RowIntent::Select,
            (false, _) => RowIntent::Nothing,
        }
    } else if double_clicked {
        RowIntent::Activate
    } else if pressed {
        RowIntent::Select
    } else {
        RowIntent::Nothing
    }
}
