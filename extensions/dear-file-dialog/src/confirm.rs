//! Modal confirmation prompts (OK/Cancel, Yes/No, Save/Don't Save/Cancel...).
//!
//! [`ConfirmationCore`] holds the whole state machine and knows nothing about
//! ImGui; the `imgui` front-end only feeds it clicks and key presses.

use std::fmt;

use crate::config::IconSet;

#[cfg(feature = "tracing")]
use tracing::debug;

/// A button a confirmation dialog can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogButton {
    /// "OK"
    Ok,
    /// "Cancel"
    Cancel,
    /// "Yes"
    Yes,
    /// "No"
    No,
    /// "Save"
    Save,
    /// "Don't Save"
    DontSave,
    /// "Retry"
    Retry,
}

impl DialogButton {
    /// Left-to-right drawing order, independent of how a set was built:
    /// affirmative actions first, dismissive ones last.
    pub const RENDER_ORDER: [DialogButton; 7] = [
        DialogButton::Save,
        DialogButton::Ok,
        DialogButton::Yes,
        DialogButton::Retry,
        DialogButton::No,
        DialogButton::DontSave,
        DialogButton::Cancel,
    ];

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            DialogButton::Ok => "OK",
            DialogButton::Cancel => "Cancel",
            DialogButton::Yes => "Yes",
            DialogButton::No => "No",
            DialogButton::Save => "Save",
            DialogButton::DontSave => "Don't Save",
            DialogButton::Retry => "Retry",
        }
    }

    /// Result produced by pressing this button.
    pub fn result(self) -> DialogResult {
        match self {
            DialogButton::Ok => DialogResult::Ok,
            DialogButton::Cancel => DialogResult::Cancel,
            DialogButton::Yes => DialogResult::Yes,
            DialogButton::No => DialogResult::No,
            DialogButton::Save => DialogResult::Save,
            DialogButton::DontSave => DialogResult::DontSave,
            DialogButton::Retry => DialogResult::Retry,
        }
    }
}

bitflags::bitflags! {
    /// Set of enabled buttons.
    ///
    /// Flags are declared in render order, so [`ButtonSet::buttons`] always
    /// yields them left to right regardless of how the set was built.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ButtonSet: u8 {
        /// "Save"
        const SAVE = 1 << 0;
        /// "OK"
        const OK = 1 << 1;
        /// "Yes"
        const YES = 1 << 2;
        /// "Retry"
        const RETRY = 1 << 3;
        /// "No"
        const NO = 1 << 4;
        /// "Don't Save"
        const DONT_SAVE = 1 << 5;
        /// "Cancel"
        const CANCEL = 1 << 6;
    }
}

/// Horizontal padding around a button caption at 1.0x.
pub const BUTTON_LABEL_PADDING: f32 = 20.0;

const BUTTON_FLAGS: [(ButtonSet, DialogButton); 7] = [
    (ButtonSet::SAVE, DialogButton::Save),
    (ButtonSet::OK, DialogButton::Ok),
    (ButtonSet::YES, DialogButton::Yes),
    (ButtonSet::RETRY, DialogButton::Retry),
    (ButtonSet::NO, DialogButton::No),
    (ButtonSet::DONT_SAVE, DialogButton::DontSave),
    (ButtonSet::CANCEL, DialogButton::Cancel),
];

impl ButtonSet {
    /// OK + Cancel.
    pub const OK_CANCEL: ButtonSet = ButtonSet::OK.union(ButtonSet::CANCEL);
    /// Yes + No.
    pub const YES_NO: ButtonSet = ButtonSet::YES.union(ButtonSet::NO);
    /// Yes + No + Cancel.
    pub const YES_NO_CANCEL: ButtonSet = ButtonSet::YES_NO.union(ButtonSet::CANCEL);
    /// Save + Don't Save + Cancel.
    pub const SAVE_DONT_SAVE_CANCEL: ButtonSet = ButtonSet::SAVE
        .union(ButtonSet::DONT_SAVE)
        .union(ButtonSet::CANCEL);
    /// Retry + Cancel.
    pub const RETRY_CANCEL: ButtonSet = ButtonSet::RETRY.union(ButtonSet::CANCEL);

    /// Whether `button` is enabled.
    pub fn enables(self, button: DialogButton) -> bool {
        self.contains(button.into())
    }

    /// Number of enabled buttons.
    pub fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Shared width of every enabled button: `base` or the widest caption
    /// plus scaled padding, whichever is larger.
    pub fn uniform_width(self, base: f32, scale: f32, text_width: impl Fn(&str) -> f32) -> f32 {
        self.buttons()
            .map(|b| text_width(b.label()) + BUTTON_LABEL_PADDING * scale)
            .fold(base, f32::max)
    }

    /// Enabled buttons in render order.
    pub fn buttons(self) -> impl Iterator<Item = DialogButton> {
        self.iter().filter_map(|flag| {
            BUTTON_FLAGS
                .iter()
                .find(|(f, _)| *f == flag)
                .map(|(_, button)| *button)
        })
    }
}

impl From<DialogButton> for ButtonSet {
    fn from(button: DialogButton) -> Self {
        match button {
            DialogButton::Save => ButtonSet::SAVE,
            DialogButton::Ok => ButtonSet::OK,
            DialogButton::Yes => ButtonSet::YES,
            DialogButton::Retry => ButtonSet::RETRY,
            DialogButton::No => ButtonSet::NO,
            DialogButton::DontSave => ButtonSet::DONT_SAVE,
            DialogButton::Cancel => ButtonSet::CANCEL,
        }
    }
}

impl FromIterator<DialogButton> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = DialogButton>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ButtonSet::empty(), |set, b| set | ButtonSet::from(b))
    }
}

/// Outcome of a confirmation dialog. `None` means still open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DialogResult {
    /// No decision yet
    #[default]
    None,
    /// OK pressed
    Ok,
    /// Cancel pressed (or Escape)
    Cancel,
    /// Yes pressed
    Yes,
    /// No pressed
    No,
    /// Save pressed
    Save,
    /// Don't Save pressed
    DontSave,
    /// Retry pressed
    Retry,
}

impl DialogResult {
    /// Whether a decision was made.
    pub fn is_some(self) -> bool {
        !matches!(self, DialogResult::None)
    }
}

/// Icon drawn to the left of the message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogIcon {
    /// No icon
    #[default]
    None,
    /// Blue "i"
    Info,
    /// Yellow "!"
    Warning,
    /// Red "X"
    Error,
    /// Green "?"
    Question,
}

impl DialogIcon {
    /// Circle color, `None` for [`DialogIcon::None`].
    pub fn color(self) -> Option<[f32; 4]> {
        match self {
            DialogIcon::None => None,
            DialogIcon::Info => Some([0.2, 0.6, 1.0, 1.0]),
            DialogIcon::Warning => Some([1.0, 0.8, 0.0, 1.0]),
            DialogIcon::Error => Some([1.0, 0.3, 0.3, 1.0]),
            DialogIcon::Question => Some([0.2, 0.8, 0.2, 1.0]),
        }
    }

    /// Glyph drawn inside the circle.
    pub fn glyph(self, icons: &IconSet) -> Option<&'static str> {
        match self {
            DialogIcon::None => None,
            DialogIcon::Info => Some(icons.info),
            DialogIcon::Warning => Some(icons.warning),
            DialogIcon::Error => Some(icons.error),
            DialogIcon::Question => Some(icons.question),
        }
    }
}

/// Everything a confirmation dialog shows.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmationConfig {
    /// Popup title (also its ImGui id)
    pub title: String,
    /// Main message
    pub message: String,
    /// Secondary, dimmed message
    pub detail: Option<String>,
    /// Enabled buttons
    pub buttons: ButtonSet,
    /// Button activated by Enter and focused when the dialog appears
    pub default_button: DialogButton,
    /// Icon
    pub icon: DialogIcon,
    /// Touch sizing
    pub touch_mode: bool,
    /// Minimum width at 1.0x
    pub min_width: f32,
    /// Maximum width at 1.0x
    pub max_width: f32,
    /// Effective scale to apply on show; `None` keeps the dialog's scale
    pub scale: Option<f32>,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            title: "Confirm".to_string(),
            message: String::new(),
            detail: None,
            buttons: ButtonSet::OK_CANCEL,
            default_button: DialogButton::Ok,
            icon: DialogIcon::None,
            touch_mode: false,
            min_width: crate::layout::CONFIRM_WIDTH_RANGE.0,
            max_width: crate::layout::CONFIRM_WIDTH_RANGE.1,
            scale: None,
        }
    }
}

impl ConfirmationConfig {
    /// OK/Cancel prompt with the given title and message.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Set the secondary message.
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the enabled buttons.
    pub fn buttons(mut self, buttons: impl Into<ButtonSet>) -> Self {
        self.buttons = buttons.into();
        self
    }

    /// Set the default button.
    pub fn default_button(mut self, button: DialogButton) -> Self {
        self.default_button = button;
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: DialogIcon) -> Self {
        self.icon = icon;
        self
    }

    /// Use touch sizing.
    pub fn touch_mode(mut self, touch: bool) -> Self {
        self.touch_mode = touch;
        self
    }

    /// Width bounds at 1.0x.
    pub fn width_range(mut self, min: f32, max: f32) -> Self {
        self.min_width = min;
        self.max_width = max.max(min);
        self
    }

    /// Effective scale applied when shown.
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// "Unsaved Changes": Save / Don't Save / Cancel, default Save.
    pub fn save_changes(filename: Option<&str>) -> Self {
        let message = match filename {
            Some(name) if !name.is_empty() => format!("Do you want to save changes to '{name}'?"),
            _ => "Do you want to save changes?".to_string(),
        };
        Self::new("Unsaved Changes", message)
            .buttons(ButtonSet::SAVE_DONT_SAVE_CANCEL)
            .default_button(DialogButton::Save)
            .icon(DialogIcon::Warning)
    }

    /// "Confirm Overwrite": Yes / No, default No.
    pub fn overwrite(filename: &str) -> Self {
        Self::new("Confirm Overwrite", format!("'{filename}' already exists."))
            .detail("Do you want to replace it?")
            .buttons(ButtonSet::YES_NO)
            .default_button(DialogButton::No)
            .icon(DialogIcon::Warning)
    }

    /// Error message with a single OK button.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message)
            .buttons(ButtonSet::OK)
            .default_button(DialogButton::Ok)
            .icon(DialogIcon::Error)
    }
}

type ResultCallback = Box<dyn FnMut(DialogResult)>;

/// Confirmation state machine: Hidden -> Shown -> Hidden, one result per
/// show.
#[derive(Default)]
pub struct ConfirmationCore {
    config: ConfirmationConfig,
    shown: bool,
    last_result: DialogResult,
    open_requested: bool,
    focus_requested: bool,
    on_result: Option<ResultCallback>,
}

impl fmt::Debug for ConfirmationCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationCore")
            .field("config", &self.config)
            .field("shown", &self.shown)
            .field("last_result", &self.last_result)
            .finish_non_exhaustive()
    }
}

impl ConfirmationCore {
    /// Hidden dialog with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show with `config`, replacing any prompt still on screen.
    ///
    /// A default button that is not enabled is replaced by the first
    /// enabled button in render order.
    pub fn show(&mut self, mut config: ConfirmationConfig) {
        if !config.buttons.enables(config.default_button) {
            if let Some(first) = config.buttons.buttons().next() {
                config.default_button = first;
            }
        }
        trace_confirm_shown(&config);
        self.config = config;
        self.shown = true;
        self.last_result = DialogResult::None;
        self.open_requested = true;
        self.focus_requested = true;
    }

    /// Hide without producing a result.
    pub fn hide(&mut self) {
        self.shown = false;
        self.open_requested = false;
        self.focus_requested = false;
    }

    /// The popup disappeared without a button press (closed by the host).
    pub fn closed_externally(&mut self) {
        self.hide();
    }

    /// Whether the prompt is on screen.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Active configuration.
    pub fn config(&self) -> &ConfirmationConfig {
        &self.config
    }

    /// Result of the most recent show-cycle (`None` while still open).
    pub fn last_result(&self) -> DialogResult {
        self.last_result
    }

    /// Called with every terminal result.
    pub fn set_on_result(&mut self, callback: impl FnMut(DialogResult) + 'static) {
        self.on_result = Some(Box::new(callback));
    }

    /// Press `button`. Returns the terminal result, or `None` when hidden or
    /// the button is not enabled.
    pub fn press(&mut self, button: DialogButton) -> DialogResult {
        if !self.shown || !self.config.buttons.enables(button) {
            return DialogResult::None;
        }
        let result = button.result();
        self.shown = false;
        self.open_requested = false;
        self.focus_requested = false;
        self.last_result = result;
        trace_confirm_resolved(&self.config.title, result);
        if let Some(cb) = self.on_result.as_mut() {
            cb(result);
        }
        result
    }

    /// Escape: Cancel if enabled, else No if enabled, else nothing.
    pub fn press_escape(&mut self) -> DialogResult {
        let buttons = self.config.buttons;
        if buttons.enables(DialogButton::Cancel) {
            self.press(DialogButton::Cancel)
        } else if buttons.enables(DialogButton::No) {
            self.press(DialogButton::No)
        } else {
            DialogResult::None
        }
    }

    /// Enter: the default button.
    pub fn press_enter(&mut self) -> DialogResult {
        self.press(self.config.default_button)
    }

    /// `true` once after [`ConfirmationCore::show`]: the popup must be opened.
    pub fn take_open_request(&mut self) -> bool {
        std::mem::take(&mut self.open_requested)
    }

    /// `true` on the first displayed frame only: focus the default button.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

#[cfg(feature = "tracing")]
fn trace_confirm_shown(config: &ConfirmationConfig) {
    debug!(
        event = "confirm.shown",
        title = %config.title,
        buttons = ?config.buttons,
        default = ?config.default_button,
        "confirmation shown"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_confirm_shown(_config: &ConfirmationConfig) {}

#[cfg(feature = "tracing")]
fn trace_confirm_resolved(title: &str, result: DialogResult) {
    debug!(event = "confirm.resolved", title, ?result, "confirmation resolved");
}

#[cfg(not(feature = "tracing"))]
fn trace_confirm_resolved(_title: &str, _result: DialogResult) {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn render_order_ignores_insertion_order() {
        let set: ButtonSet = [
            DialogButton::Cancel,
            DialogButton::DontSave,
            DialogButton::No,
            DialogButton::Ok,
            DialogButton::Retry,
            DialogButton::Yes,
            DialogButton::Save,
        ]
        .into_iter()
        .collect();
        assert_eq!(set, ButtonSet::all());
        let order: Vec<DialogButton> = set.buttons().collect();
        assert_eq!(order, DialogButton::RENDER_ORDER.to_vec());
        let labels: Vec<&str> = ButtonSet::SAVE_DONT_SAVE_CANCEL
            .buttons()
            .map(DialogButton::label)
            .collect();
        assert_eq!(labels, vec!["Save", "Don't Save", "Cancel"]);
    }

    #[test]
    fn button_width_fits_longest_caption() {
        // 8px per character stands in for the font.
        let measure = |label: &str| label.chars().count() as f32 * 8.0;
        assert_eq!(ButtonSet::OK_CANCEL.uniform_width(80.0, 1.0, measure), 80.0);
        // "Don't Save" = 10 chars -> 80 + 20 padding.
        assert_eq!(
            ButtonSet::SAVE_DONT_SAVE_CANCEL.uniform_width(80.0, 1.0, measure),
            100.0
        );
        assert_eq!(
            ButtonSet::SAVE_DONT_SAVE_CANCEL.uniform_width(160.0, 2.0, measure),
            160.0
        );
        assert_eq!(
            ButtonSet::SAVE_DONT_SAVE_CANCEL.uniform_width(80.0, 2.0, measure),
            120.0
        );
    }

    #[test]
    fn enter_delivers_default_exactly_once() {
        let mut core = ConfirmationCore::new();
        core.show(
            ConfirmationConfig::new("Q", "Sure?")
                .buttons(ButtonSet::YES_NO)
                .default_button(DialogButton::No),
        );
        assert_eq!(core.press_enter(), DialogResult::No);
        assert!(!core.is_shown());
        assert_eq!(core.press_enter(), DialogResult::None);
        assert_eq!(core.press(DialogButton::Yes), DialogResult::None);
        assert_eq!(core.last_result(), DialogResult::No);
    }

    #[test]
    fn escape_prefers_cancel_then_no() {
        let mut core = ConfirmationCore::new();
        core.show(ConfirmationConfig::new("t", "m").buttons(ButtonSet::YES_NO_CANCEL));
        assert_eq!(core.press_escape(), DialogResult::Cancel);

        core.show(ConfirmationConfig::new("t", "m").buttons(ButtonSet::YES_NO));
        assert_eq!(core.press_escape(), DialogResult::No);

        core.show(ConfirmationConfig::error("Oops", "failed"));
        assert_eq!(core.press_escape(), DialogResult::None);
        assert!(core.is_shown());
        assert_eq!(core.press(DialogButton::Ok), DialogResult::Ok);
    }

    #[test]
    fn disabled_buttons_are_inert() {
        let mut core = ConfirmationCore::new();
        core.show(ConfirmationConfig::new("t", "m"));
        assert_eq!(core.press(DialogButton::Retry), DialogResult::None);
        assert!(core.is_shown());
    }

    #[test]
    fn focus_and_open_requests_fire_once_per_show() {
        let mut core = ConfirmationCore::new();
        core.show(ConfirmationConfig::default());
        assert!(core.take_open_request());
        assert!(core.take_focus_request());
        assert!(!core.take_open_request());
        assert!(!core.take_focus_request());
        core.hide();
        core.show(ConfirmationConfig::default());
        assert!(core.take_focus_request());
    }

    #[test]
    fn default_outside_set_falls_back_to_first_enabled() {
        let mut core = ConfirmationCore::new();
        core.show(
            ConfirmationConfig::new("t", "m")
                .buttons(ButtonSet::RETRY_CANCEL)
                .default_button(DialogButton::Ok),
        );
        assert_eq!(core.config().default_button, DialogButton::Retry);
        assert_eq!(core.press_enter(), DialogResult::Retry);
    }

    #[test]
    fn callback_sees_each_result() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut core = ConfirmationCore::new();
        core.set_on_result(move |r| sink.borrow_mut().push(r));
        core.show(ConfirmationConfig::save_changes(Some("a.txt")));
        core.press(DialogButton::DontSave);
        core.show(ConfirmationConfig::save_changes(None));
        core.hide();
        core.show(ConfirmationConfig::overwrite("a.txt"));
        core.press_enter();
        assert_eq!(*seen.borrow(), vec![DialogResult::DontSave, DialogResult::No]);
    }

    #[test]
    fn presets() {
        let c = ConfirmationConfig::overwrite("report.txt");
        assert_eq!(c.title, "Confirm Overwrite");
        assert_eq!(c.message, "'report.txt' already exists.");
        assert_eq!(c.detail.as_deref(), Some("Do you want to replace it?"));
        assert_eq!(c.default_button, DialogButton::No);
        let s = ConfirmationConfig::save_changes(Some("a.txt"));
        assert_eq!(s.message, "Do you want to save changes to 'a.txt'?");
        assert_eq!(s.buttons, ButtonSet::SAVE_DONT_SAVE_CANCEL);
        assert_eq!(DialogIcon::Warning.color(), Some([1.0, 0.8, 0.0, 1.0]));
        assert_eq!(DialogIcon::None.glyph(&IconSet::default()), None);
    }
}
