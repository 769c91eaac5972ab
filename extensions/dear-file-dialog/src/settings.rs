use std::path::{Path, PathBuf};

use crate::core::FileDialogError;

/// Persistence for the last directory a selection was made from.
///
/// Read when a browser opens, written only after a successful selection.
pub trait SettingsStore {
    /// Previously stored directory, if any.
    fn last_path(&self) -> Option<PathBuf>;
    /// Remember `path` for the next session.
    fn set_last_path(&mut self, path: &Path);
}

/// In-memory settings with an ini-style text form.
///
/// Hosts that already keep a settings file can embed the text produced by
/// [`MemorySettings::to_ini_string`] and feed it back through
/// [`MemorySettings::from_ini_str`] at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySettings {
    last_path: Option<PathBuf>,
}

const LAST_PATH_KEY: &str = "LastPath";

impl MemorySettings {
    /// Empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// `LastPath=<path>` line, or an empty string when nothing is stored.
    pub fn to_ini_string(&self) -> String {
        match &self.last_path {
            Some(p) => format!("{LAST_PATH_KEY}={}\n", p.display()),
            None => String::new(),
        }
    }

    /// Parse `key=value` lines. Blank lines, `;`/`#` comments, `[section]`
    /// headers and unknown keys are ignored; a non-empty line without `=` is
    /// an error.
    pub fn from_ini_str(text: &str) -> Result<Self, FileDialogError> {
        let mut out = Self::default();
        for (n, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty()
                || line.starts_with([';', '#'])
                || (line.starts_with('[') && line.ends_with(']'))
            {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(FileDialogError::Settings(format!(
                    "line {}: expected key=value",
                    n + 1
                )));
            };
            if key.trim() == LAST_PATH_KEY {
                let value = value.trim();
                out.last_path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
        }
        Ok(out)
    }
}

impl SettingsStore for MemorySettings {
    fn last_path(&self) -> Option<PathBuf> {
        self.last_path.clone()
    }

    fn set_last_path(&mut self, path: &Path) {
        self.last_path = Some(path.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ini_round_trip() {
        let mut s = MemorySettings::new();
        assert_eq!(s.to_ini_string(), "");
        s.set_last_path(Path::new("/home/user/projects"));
        let text = s.to_ini_string();
        assert_eq!(text, "LastPath=/home/user/projects\n");
        assert_eq!(MemorySettings::from_ini_str(&text).unwrap(), s);
    }

    #[test]
    fn ini_parsing_skips_noise() {
        let text = "[FileDialog][Settings]\n; comment\n\nOther=1\nLastPath = /data \n";
        let s = MemorySettings::from_ini_str(text).unwrap();
        assert_eq!(s.last_path(), Some(PathBuf::from("/data")));
    }

    #[test]
    fn ini_parsing_rejects_garbage() {
        let err = MemorySettings::from_ini_str("LastPath=/a\nnot a pair").unwrap_err();
        assert!(matches!(err, FileDialogError::Settings(ref m) if m.starts_with("line 2")));
    }
}
