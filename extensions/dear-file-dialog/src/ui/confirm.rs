use dear_imgui_rs::{Key, StyleColor, Ui};

use crate::config::{ColorConfig, IconSet, LibraryConfig};
use crate::confirm::{ConfirmationConfig, ConfirmationCore, DialogButton, DialogResult};
use crate::layout::ScaledLayout;

const DEFAULT_BUTTON: [f32; 4] = [0.26, 0.59, 0.98, 0.80];
const ICON_GLYPH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A modal confirmation prompt: state machine plus sizing.
pub struct ConfirmationDialog {
    core: ConfirmationCore,
    layout: ScaledLayout,
    icons: IconSet,
    colors: ColorConfig,
}

impl Default for ConfirmationDialog {
    fn default() -> Self {
        Self::new(&LibraryConfig::default())
    }
}

impl ConfirmationDialog {
    /// Hidden prompt using `library` icons and colors.
    pub fn new(library: &LibraryConfig) -> Self {
        Self {
            core: ConfirmationCore::new(),
            layout: ScaledLayout::new(library.touch_mode, 1.0),
            icons: library.icons,
            colors: library.colors,
        }
    }

    /// Show `config`. Its touch flag and scale (when set) replace the
    /// current sizing.
    pub fn show(&mut self, config: ConfirmationConfig) {
        self.layout.set_touch_mode(config.touch_mode);
        if let Some(scale) = config.scale {
            self.layout.set_scale(scale);
        }
        self.core.show(config);
    }

    /// Hide without a result.
    pub fn hide(&mut self) {
        self.core.hide();
    }

    /// Whether the prompt is on screen.
    pub fn is_shown(&self) -> bool {
        self.core.is_shown()
    }

    /// Effective scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.layout.set_scale(scale);
    }

    /// Called with every terminal result.
    pub fn set_on_result(&mut self, callback: impl FnMut(DialogResult) + 'static) {
        self.core.set_on_result(callback);
    }

    /// State machine.
    pub fn core(&self) -> &ConfirmationCore {
        &self.core
    }

    /// State machine, mutable.
    pub fn core_mut(&mut self) -> &mut ConfirmationCore {
        &mut self.core
    }
}

/// UI handle for [`ConfirmationDialog`].
pub struct ConfirmationUi<'ui> {
    ui: &'ui Ui,
}

impl<'ui> ConfirmationUi<'ui> {
    pub(crate) fn new(ui: &'ui Ui) -> Self {
        Self { ui }
    }

    /// Draw one frame. Returns the result on the frame a button (or
    /// Enter/Escape) resolves the prompt, [`DialogResult::None`] otherwise.
    pub fn render(&self, dialog: &mut ConfirmationDialog) -> DialogResult {
        if !dialog.core.is_shown() {
            return DialogResult::None;
        }
        let ui = self.ui;
        let metrics = *dialog.layout.metrics(ui.io().display_size());
        let config = dialog.core.config().clone();
        let popup_id = format!("{}##dear_confirm_dialog", config.title);

        // The key that triggered `show` is still down on the opening frame.
        let appearing = dialog.core.take_open_request();
        if appearing {
            ui.open_popup(&popup_id);
        }

        let Some(_popup) = ui.begin_modal_popup(&popup_id) else {
            dialog.core.closed_externally();
            return DialogResult::None;
        };

        let spacing = metrics.button_spacing;
        let min_w = config.min_width * metrics.scale;
        let max_w = config.max_width * metrics.scale;
        let icon_w = match config.icon.color() {
            Some(_) => metrics.confirm_icon_size + spacing * 2.0,
            None => 0.0,
        };
        let font = ui.current_font();
        let font_size = ui.current_font_size();
        let longest = std::iter::once(config.message.as_str())
            .chain(config.detail.as_deref())
            .map(|t| font.calc_text_size(font_size, f32::MAX, 0.0, t)[0])
            .fold(0.0_f32, f32::max);
        let button_w = config.buttons.uniform_width(metrics.button_width, metrics.scale, |label| {
            font.calc_text_size(font_size, f32::MAX, 0.0, label)[0]
        });
        let buttons_w = config.buttons.len() as f32 * (button_w + spacing);
        let width = (icon_w + longest).max(buttons_w).clamp(min_w, max_w);

        if let (Some(color), Some(glyph)) = (config.icon.color(), config.icon.glyph(&dialog.icons)) {
            let origin = ui.cursor_screen_pos();
            let radius = metrics.confirm_icon_size * 0.5;
            let center = [origin[0] + spacing + radius, origin[1] + radius];
            let draw_list = ui.get_window_draw_list();
            draw_list.add_circle(center, radius, color).filled(true).build();
            let glyph_size = font.calc_text_size(font_size, f32::MAX, 0.0, glyph);
            draw_list.add_text(
                [center[0] - glyph_size[0] * 0.5, center[1] - glyph_size[1] * 0.5],
                ICON_GLYPH,
                glyph,
            );
            ui.dummy([icon_w, metrics.confirm_icon_size]);
            ui.same_line();
        }

        let text_x = ui.cursor_pos_x();
        {
            let _group = ui.begin_group();
            let _wrap = ui.push_text_wrap_pos(text_x + (width - icon_w).max(1.0));
            ui.text_wrapped(&config.message);
            if let Some(detail) = &config.detail {
                ui.text_colored(dialog.colors.secondary_text, detail);
            }
        }
        ui.dummy([width, spacing]);

        let start_x = ui.cursor_pos_x();
        let total = buttons_w - spacing;
        ui.set_cursor_pos_x((start_x + width - total).max(start_x));

        let focus_default = dialog.core.take_focus_request();
        let mut pressed: Option<DialogButton> = None;
        for (i, button) in config.buttons.buttons().enumerate() {
            if i > 0 {
                ui.same_line();
            }
            let is_default = button == config.default_button;
            let highlight = is_default.then(|| ui.push_style_color(StyleColor::Button, DEFAULT_BUTTON));
            if is_default && focus_default {
                ui.set_keyboard_focus_here();
            }
            if ui.button_with_size(button.label(), [button_w, metrics.button_height]) {
                pressed = Some(button);
            }
            drop(highlight);
        }

        let result = match pressed {
            Some(button) => dialog.core.press(button),
            None if appearing => DialogResult::None,
            None if ui.is_key_pressed(Key::Escape) => dialog.core.press_escape(),
            None if ui.is_key_pressed(Key::Enter) => dialog.core.press_enter(),
            None => DialogResult::None,
        };
        if result.is_some() {
            ui.close_current_popup();
        }
        result
    }
}
