use std::path::PathBuf;
use thiserror::Error;

use crate::config::IconSet;

/// Dialog mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogMode {
    /// Pick an existing file
    #[default]
    Open,
    /// Choose a destination file name
    Save,
    /// Pick a directory (the current directory is the selection)
    SelectFolder,
}

impl DialogMode {
    /// Label of the confirm button for this mode.
    pub fn confirm_label(self) -> &'static str {
        match self {
            DialogMode::Open => "Open",
            DialogMode::Save => "Save",
            DialogMode::SelectFolder => "Select",
        }
    }

    /// Default window title for this mode.
    pub fn default_title(self) -> &'static str {
        match self {
            DialogMode::Open => "Open File",
            DialogMode::Save => "Save File",
            DialogMode::SelectFolder => "Select Folder",
        }
    }
}

/// Outcome of a file browser session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrowserResult {
    /// Still open (or never opened)
    #[default]
    None,
    /// A path was chosen; see `selected_path`
    Selected,
    /// The user closed the dialog without choosing
    Cancelled,
}

impl BrowserResult {
    /// Whether this value ends the session.
    pub fn is_terminal(self) -> bool {
        !matches!(self, BrowserResult::None)
    }
}

/// Sort orders offered by the browser toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Name, A to Z
    #[default]
    NameAsc,
    /// Name, Z to A
    NameDesc,
    /// Size, smallest first
    SizeAsc,
    /// Size, largest first
    SizeDesc,
    /// Modification time, oldest first
    DateAsc,
    /// Modification time, newest first
    DateDesc,
}

impl SortOrder {
    /// All orders in toolbar order.
    pub const ALL: [SortOrder; 6] = [
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::SizeAsc,
        SortOrder::SizeDesc,
        SortOrder::DateAsc,
        SortOrder::DateDesc,
    ];

    /// Whether the order is descending.
    pub fn is_descending(self) -> bool {
        matches!(
            self,
            SortOrder::NameDesc | SortOrder::SizeDesc | SortOrder::DateDesc
        )
    }

    /// Toolbar label, e.g. `"Name A-Z"` with the text icon set.
    pub fn label(self, icons: &IconSet) -> String {
        match self {
            SortOrder::NameAsc => format!("Name {}", icons.sort_alpha_down),
            SortOrder::NameDesc => format!("Name {}", icons.sort_alpha_up),
            SortOrder::SizeAsc => format!("Size {}", icons.sort_amount_up),
            SortOrder::SizeDesc => format!("Size {}", icons.sort_amount_down),
            SortOrder::DateAsc => format!("Date {}", icons.sort_amount_up),
            SortOrder::DateDesc => format!("Date {}", icons.sort_amount_down),
        }
    }
}

/// File filter (e.g. `"Text Files"` -> `"*.txt;*.log"`).
///
/// The pattern is kept verbatim for display; [`FileFilter::extensions`]
/// derives the normalized, lower-case, dotted list used for matching.
/// A pattern without any `*.ext` item other than `*.*` matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileFilter {
    /// Human readable description
    pub description: String,
    /// Wildcard pattern, items separated by `;` or `,`
    pub pattern: String,
}

impl FileFilter {
    /// Create a filter from a description and a wildcard pattern.
    pub fn new(description: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            pattern: pattern.into(),
        }
    }

    /// Lower-case dotted extensions, e.g. `"*.jml;*.JMD"` -> `[".jml", ".jmd"]`.
    ///
    /// `"*.*"` contributes nothing, so a catch-all filter yields an empty
    /// list, which callers treat as "no filtering".
    pub fn extensions(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut rest = self.pattern.as_str();
        while let Some(start) = rest.find("*.") {
            rest = &rest[start + 2..];
            let end = rest.find([';', ',']).unwrap_or(rest.len());
            let ext = rest[..end].trim();
            if !ext.is_empty() && ext != "*" {
                let dotted = format!(".{}", ext.to_lowercase());
                if !out.contains(&dotted) {
                    out.push(dotted);
                }
            }
            rest = &rest[end..];
        }
        out
    }

    /// `"description|pattern"`, the classic filter string form.
    pub fn filter_string(&self) -> String {
        format!("{}|{}", self.description, self.pattern)
    }

    /// `"description (pattern)"`, used by the filter combo.
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.description, self.pattern)
    }
}

impl From<(&str, &str)> for FileFilter {
    fn from(value: (&str, &str)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Errors surfaced by the fallible dialog operations.
///
/// The render loop never propagates these: failures degrade to "nothing
/// happened" and are logged when the `tracing` feature is enabled.
#[derive(Error, Debug)]
pub enum FileDialogError {
    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Folder name rejected before touching the filesystem
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    /// Navigation target is missing or not a directory
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Persisted settings could not be parsed
    #[error("settings error: {0}")]
    Settings(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extension_list_is_lowercased_and_dotted() {
        let f = FileFilter::new("Jamal", "*.jml;*.JMD");
        assert_eq!(f.extensions(), vec![".jml".to_string(), ".jmd".to_string()]);
    }

    #[test]
    fn extension_list_accepts_commas_and_spaces() {
        let f = FileFilter::new("Images", "*.png, *.jpg,*.png");
        assert_eq!(f.extensions(), vec![".png".to_string(), ".jpg".to_string()]);
    }

    #[test]
    fn wildcard_all_means_unfiltered() {
        assert!(FileFilter::new("All Files", "*.*").extensions().is_empty());
        assert!(FileFilter::new("Nothing", "").extensions().is_empty());
    }

    #[test]
    fn display_and_filter_strings() {
        let f = FileFilter::from(("Text Files", "*.txt"));
        assert_eq!(f.display_string(), "Text Files (*.txt)");
        assert_eq!(f.filter_string(), "Text Files|*.txt");
    }

    #[test]
    fn sort_labels_follow_icon_set() {
        let icons = IconSet::text_fallback();
        let labels: Vec<String> = SortOrder::ALL.iter().map(|o| o.label(&icons)).collect();
        assert_eq!(
            labels,
            ["Name A-Z", "Name Z-A", "Size 1-9", "Size 9-1", "Date 1-9", "Date 9-1"]
        );
    }
}
