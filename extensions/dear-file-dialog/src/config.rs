//! Library-wide appearance: colors, icons and the touch/desktop switch.
//!
//! A [`LibraryConfig`] is plain data. Build one (or take a preset) and hand
//! it to each dialog at construction; dialogs never read shared state.

/// RGBA colors used by the file browser, stored as `[r, g, b, a]` in 0..=1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorConfig {
    /// File list background
    pub list_background: [f32; 4],
    /// File list border
    pub list_border: [f32; 4],
    /// Directory names
    pub directory_text: [f32; 4],
    /// File names
    pub file_text: [f32; 4],
    /// Size and date columns
    pub secondary_text: [f32; 4],
    /// Text of the selected row
    pub selected_text: [f32; 4],
    /// Selected row highlight
    pub selected_row: [f32; 4],
    /// Hovered row highlight
    pub hovered_row: [f32; 4],
    /// Path bar background
    pub path_background: [f32; 4],
    /// Path bar text
    pub path_text: [f32; 4],
}

const fn rgba(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            list_background: rgba(25, 25, 30, 255),
            list_border: rgba(80, 80, 90, 255),
            directory_text: rgba(100, 200, 255, 255),
            file_text: rgba(220, 220, 220, 255),
            secondary_text: rgba(180, 180, 180, 255),
            selected_text: rgba(255, 255, 255, 255),
            selected_row: rgba(0, 100, 180, 180),
            hovered_row: rgba(60, 60, 70, 255),
            path_background: rgba(40, 40, 45, 255),
            path_text: rgba(180, 180, 180, 255),
        }
    }
}

/// Glyphs drawn on buttons and rows.
///
/// The default set is plain ASCII and renders with any font. Use
/// [`IconSet::font_awesome`] after merging FontAwesome (solid) into the
/// font atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconSet {
    /// Parent folder button
    pub arrow_up: &'static str,
    /// Home button
    pub home: &'static str,
    /// Refresh button
    pub refresh: &'static str,
    /// New folder button
    pub new_folder: &'static str,
    /// Drives combo
    pub drives: &'static str,
    /// Directory rows
    pub folder: &'static str,
    /// File rows
    pub file: &'static str,
    /// Drive items
    pub hdd: &'static str,
    /// Save action
    pub save: &'static str,
    /// Close action
    pub close: &'static str,
    /// Check mark
    pub check: &'static str,
    /// Name ascending
    pub sort_alpha_down: &'static str,
    /// Name descending
    pub sort_alpha_up: &'static str,
    /// Size/date descending
    pub sort_amount_down: &'static str,
    /// Size/date ascending
    pub sort_amount_up: &'static str,
    /// Info dialog icon
    pub info: &'static str,
    /// Warning dialog icon
    pub warning: &'static str,
    /// Error dialog icon
    pub error: &'static str,
    /// Question dialog icon
    pub question: &'static str,
}

impl IconSet {
    /// ASCII fallbacks.
    pub const fn text_fallback() -> Self {
        Self {
            arrow_up: "^",
            home: "H",
            refresh: "R",
            new_folder: "+",
            drives: "D",
            folder: "[D]",
            file: "[F]",
            hdd: "HD",
            save: "S",
            close: "X",
            check: "v",
            sort_alpha_down: "A-Z",
            sort_alpha_up: "Z-A",
            sort_amount_down: "9-1",
            sort_amount_up: "1-9",
            info: "i",
            warning: "!",
            error: "X",
            question: "?",
        }
    }

    /// FontAwesome Free (solid) codepoints.
    pub const fn font_awesome() -> Self {
        Self {
            arrow_up: "\u{f062}",
            home: "\u{f015}",
            refresh: "\u{f021}",
            new_folder: "\u{f65e}",
            drives: "\u{f0a0}",
            folder: "\u{f07b}",
            file: "\u{f15b}",
            hdd: "\u{f0a0}",
            save: "\u{f0c7}",
            close: "\u{f00d}",
            check: "\u{f00c}",
            sort_alpha_down: "\u{f15d}",
            sort_alpha_up: "\u{f15e}",
            sort_amount_down: "\u{f160}",
            sort_amount_up: "\u{f161}",
            info: "\u{f05a}",
            warning: "\u{f071}",
            error: "\u{f057}",
            question: "\u{f059}",
        }
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::text_fallback()
    }
}

/// Appearance shared by every dialog an application creates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LibraryConfig {
    /// Colors
    pub colors: ColorConfig,
    /// Icons
    pub icons: IconSet,
    /// Use touch-sized metrics and single-tap directory navigation
    pub touch_mode: bool,
}

impl LibraryConfig {
    /// Touch preset: default colors and icons with touch sizing.
    pub fn touch() -> Self {
        Self {
            touch_mode: true,
            ..Self::default()
        }
    }

    /// Replace the icon set.
    pub fn with_icons(mut self, icons: IconSet) -> Self {
        self.icons = icons;
        self
    }

    /// Replace the colors.
    pub fn with_colors(mut self, colors: ColorConfig) -> Self {
        self.colors = colors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_preset_only_flips_mode() {
        let touch = LibraryConfig::touch();
        assert!(touch.touch_mode);
        assert_eq!(touch.colors, ColorConfig::default());
        assert_eq!(touch.icons, IconSet::text_fallback());
    }

    #[test]
    fn colors_are_normalized() {
        let c = ColorConfig::default();
        assert_eq!(c.selected_text, [1.0, 1.0, 1.0, 1.0]);
        assert!((c.selected_row[3] - 180.0 / 255.0).abs() < 1e-6);
    }
}
