use std::path::PathBuf;

use dear_imgui_rs::{StyleColor, Ui, WindowFlags};

use crate::confirm::BUTTON_LABEL_PADDING;
use crate::core::SortOrder;
use crate::fs::FileSystem;
use crate::layout::LayoutMetrics;

use super::FileBrowserDialog;

/// Up, Home, drives, Refresh, New Folder and the right-aligned sort combo.
pub(super) fn draw_toolbar(
    ui: &Ui,
    dialog: &mut FileBrowserDialog,
    fs: &dyn FileSystem,
    metrics: &LayoutMetrics,
) {
    let icons = dialog.library.icons;
    let touch = metrics.touch;
    let font = ui.current_font();
    let font_size = ui.current_font_size();
    let button = |label: &str| {
        let text = label.split("##").next().unwrap_or(label);
        let text_w = font.calc_text_size(font_size, f32::MAX, 0.0, text)[0];
        let padding = BUTTON_LABEL_PADDING * metrics.scale;
        [metrics.icon_button_width.max(text_w + padding), metrics.button_height]
    };

    let up = toolbar_label(icons.arrow_up, "Back", "up", touch);
    if ui.button_with_size(&up, button(up.as_str())) {
        dialog.core.navigate_up(fs);
    }
    if ui.is_item_hovered() {
        ui.tooltip_text("Parent folder");
    }
    ui.same_line();
    let home = toolbar_label(icons.home, "Home", "home", touch);
    if ui.button_with_size(&home, button(home.as_str())) {
        dialog.core.navigate_home(fs);
    }
    if ui.is_item_hovered() {
        ui.tooltip_text("Home");
    }

    ui.same_line();
    ui.set_next_item_width(metrics.drives_combo_width);
    let mut drive_target: Option<PathBuf> = None;
    if let Some(_combo) = ui.begin_combo("##drives", icons.drives) {
        for drive in dialog.core.drives() {
            let label = format!("{} {}", icons.hdd, drive.display());
            let current = dialog.core.current_path().starts_with(drive);
            if ui.selectable_config(label).selected(current).build() {
                drive_target = Some(drive.clone());
            }
        }
    }
    if let Some(drive) = drive_target {
        dialog.core.navigate_to(fs, &drive);
    }

    ui.same_line();
    let refresh = toolbar_label(icons.refresh, "Refresh", "refresh", touch);
    if ui.button_with_size(&refresh, button(refresh.as_str())) {
        dialog.core.refresh_drives(fs);
        dialog.core.refresh(fs);
    }
    if ui.is_item_hovered() {
        ui.tooltip_text("Refresh");
    }

    if dialog.core.config().allow_create_folder {
        ui.same_line();
        let new_folder = toolbar_label(icons.new_folder, "New", "new_folder", touch);
        if ui.button_with_size(&new_folder, button(new_folder.as_str())) {
            dialog.new_folder.open_next = true;
        }
        if ui.is_item_hovered() {
            ui.tooltip_text("New folder");
        }
    }

    ui.same_line();
    let start_x = ui.cursor_pos_x();
    let avail_w = ui.content_region_avail_width();
    ui.set_cursor_pos_x((start_x + avail_w - metrics.sort_combo_width).max(start_x));
    ui.set_next_item_width(metrics.sort_combo_width);
    let current = dialog.core.sort_order();
    let mut next = current;
    if let Some(_combo) = ui.begin_combo("##sort", current.label(&icons)) {
        for order in SortOrder::ALL {
            if ui
                .selectable_config(order.label(&icons))
                .selected(order == current)
                .build()
            {
                next = order;
            }
        }
    }
    if next != current {
        dialog.core.set_sort_order(fs, next);
    }
}

/// Icon-only on desktop, icon plus caption on touch; `id` keeps the ImGui id
/// stable across modes.
fn toolbar_label(icon: &str, caption: &str, id: &str, touch: bool) -> String {
    if touch {
        format!("{icon} {caption}##{id}")
    } else {
        format!("{icon}##{id}")
    }
}

/// Clickable breadcrumbs of the current directory.
pub(super) fn draw_path_bar(
    ui: &Ui,
    dialog: &mut FileBrowserDialog,
    fs: &dyn FileSystem,
    metrics: &LayoutMetrics,
) {
    let colors = dialog.library.colors;
    let crumbs = dialog.core.breadcrumbs();
    let mut target: Option<PathBuf> = None;

    let _bg = ui.push_style_color(StyleColor::ChildBg, colors.path_background);
    let _text = ui.push_style_color(StyleColor::Text, colors.path_text);
    let _button = ui.push_style_color(StyleColor::Button, [0.0, 0.0, 0.0, 0.0]);
    ui.child_window("##path_bar")
        .size([0.0, metrics.path_bar_height])
        .flags(WindowFlags::HORIZONTAL_SCROLLBAR)
        .build(ui, || {
            for (i, crumb) in crumbs.iter().enumerate() {
                if i > 0 {
                    ui.same_line();
                    ui.text_disabled(">");
                    ui.same_line();
                }
                if ui.button(format!("{}##crumb{i}", crumb.label)) {
                    target = Some(crumb.path.clone());
                }
            }
            // Keep the deepest segment visible.
            ui.set_scroll_here_x(1.0);
        });

    if let Some(path) = target {
        dialog.core.navigate_to(fs, &path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IconSet;
    use pretty_assertions::assert_eq;

    #[test]
    fn touch_toolbar_adds_captions() {
        let icons = IconSet::text_fallback();
        assert_eq!(
            toolbar_label(icons.home, "Home", "home", false),
            format!("{}##home", icons.home)
        );
        assert_eq!(
            toolbar_label(icons.home, "Home", "home", true),
            format!("{} Home##home", icons.home)
        );
        assert_eq!(
            toolbar_label(icons.arrow_up, "Back", "up", true),
            format!("{} Back##up", icons.arrow_up)
        );
    }
}
