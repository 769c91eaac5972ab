#![cfg(feature = "imgui")]

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

use dear_file_dialog::{
    BrowserResult, ConfirmationConfig, ConfirmationDialog, DialogConfig, DialogMode, DialogResult,
    FileBrowserDialog, FileDialogExt, LibraryConfig, MemorySettings, StdFileSystem,
};
use dear_imgui_rs::{Context, Key, Ui};

// One ImGui context at a time per process.
fn test_guard() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

fn context() -> Context {
    let mut imgui = Context::create();
    {
        let io = imgui.io_mut();
        io.set_display_size([800.0, 600.0]);
        io.set_delta_time(1.0 / 60.0);
    }
    let _ = imgui.font_atlas_mut().build();
    let _ = imgui.set_ini_filename::<PathBuf>(None);
    imgui
}

fn run_frame<R>(imgui: &mut Context, draw: impl FnOnce(&Ui) -> R) -> R {
    let out = {
        let ui = imgui.frame();
        draw(ui)
    };
    let _ = imgui.render();
    out
}

fn temp_dir(prefix: &str) -> PathBuf {
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "dear-file-dialog-{prefix}-{}-{t}",
        std::process::id()
    ));
    std::fs::create_dir_all(dir.join("child")).unwrap();
    std::fs::write(dir.join("readme.txt"), b"hi").unwrap();
    dir
}

/// Open a browser and draw a few frames without panicking.
#[test]
fn file_browser_smoke_test() {
    let _guard = test_guard();
    let mut imgui = context();
    let dir = temp_dir("smoke");
    let fs = StdFileSystem;
    let mut settings = MemorySettings::new();

    let mut dialog = FileBrowserDialog::new(LibraryConfig::default());
    dialog.open(
        DialogConfig::new(DialogMode::Open)
            .initial_path(&dir)
            .filter(("Text Files", "*.txt")),
        &fs,
        &settings,
    );
    assert!(dialog.is_open());

    for _ in 0..3 {
        let result = run_frame(&mut imgui, |ui| {
            ui.file_browser().render(&mut dialog, &fs, &mut settings)
        });
        assert_eq!(result, BrowserResult::None);
    }
    assert!(dialog.is_open());

    dialog.close();
    let result = run_frame(&mut imgui, |ui| {
        ui.file_browser().render(&mut dialog, &fs, &mut settings)
    });
    assert_eq!(result, BrowserResult::None);
    assert_eq!(dialog.result(), BrowserResult::Cancelled);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn touch_mode_save_browser_renders() {
    let _guard = test_guard();
    let mut imgui = context();
    let dir = temp_dir("touch");
    let fs = StdFileSystem;
    let mut settings = MemorySettings::new();

    let mut dialog = FileBrowserDialog::new(LibraryConfig::default());
    dialog.open(
        DialogConfig::new(DialogMode::Save)
            .initial_path(&dir)
            .initial_filename("report")
            .touch_mode(true)
            .scale(1.5),
        &fs,
        &settings,
    );
    assert!(dialog.layout().touch_mode());

    run_frame(&mut imgui, |ui| {
        ui.file_browser().render(&mut dialog, &fs, &mut settings)
    });
    assert!(dialog.is_open());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn confirmation_dialog_renders_until_answered() {
    let _guard = test_guard();
    let mut imgui = context();

    let mut dialog = ConfirmationDialog::default();
    dialog.show(ConfirmationConfig::save_changes(Some("draft.txt")));
    assert!(dialog.is_shown());

    for _ in 0..2 {
        let result = run_frame(&mut imgui, |ui| ui.confirmation().render(&mut dialog));
        assert_eq!(result, DialogResult::None);
    }
    assert!(dialog.is_shown());

    assert_eq!(dialog.core_mut().press_escape(), DialogResult::Cancel);
    let result = run_frame(&mut imgui, |ui| ui.confirmation().render(&mut dialog));
    assert_eq!(result, DialogResult::None);
    assert!(!dialog.is_shown());
}

fn press(imgui: &mut Context, key: Key, down: bool) {
    imgui.io_mut().add_key_event(key, down);
}

#[test]
fn enter_that_shows_a_prompt_does_not_answer_it() {
    let _guard = test_guard();
    let mut imgui = context();

    let mut dialog = ConfirmationDialog::default();
    dialog.show(ConfirmationConfig::save_changes(Some("draft.txt")));

    press(&mut imgui, Key::Enter, true);
    let result = run_frame(&mut imgui, |ui| ui.confirmation().render(&mut dialog));
    assert_eq!(result, DialogResult::None);
    assert!(dialog.is_shown());

    press(&mut imgui, Key::Enter, false);
    run_frame(&mut imgui, |ui| ui.confirmation().render(&mut dialog));
    assert!(dialog.is_shown());

    press(&mut imgui, Key::Enter, true);
    let result = run_frame(&mut imgui, |ui| ui.confirmation().render(&mut dialog));
    assert_eq!(result, DialogResult::Save);
    assert!(!dialog.is_shown());
}

#[test]
fn escape_on_opening_frame_is_ignored() {
    let _guard = test_guard();
    let mut imgui = context();

    let mut dialog = ConfirmationDialog::default();
    dialog.show(ConfirmationConfig::overwrite("report.txt"));

    press(&mut imgui, Key::Escape, true);
    run_frame(&mut imgui, |ui| ui.confirmation().render(&mut dialog));
    assert!(dialog.is_shown());

    press(&mut imgui, Key::Escape, false);
    run_frame(&mut imgui, |ui| ui.confirmation().render(&mut dialog));
    press(&mut imgui, Key::Escape, true);
    let result = run_frame(&mut imgui, |ui| ui.confirmation().render(&mut dialog));
    assert_eq!(result, DialogResult::No);
}

#[test]
fn enter_save_over_existing_file_asks_first() {
    let _guard = test_guard();
    let mut imgui = context();
    let dir = temp_dir("enter_overwrite");
    let fs = StdFileSystem;
    let mut settings = MemorySettings::new();

    let mut dialog = FileBrowserDialog::new(LibraryConfig::default());
    dialog.open(
        DialogConfig::new(DialogMode::Save)
            .initial_path(&dir)
            .initial_filename("readme")
            .filter(("Text Files", "*.txt")),
        &fs,
        &settings,
    );
    run_frame(&mut imgui, |ui| {
        ui.file_browser().render(&mut dialog, &fs, &mut settings)
    });

    press(&mut imgui, Key::Enter, true);
    let result = run_frame(&mut imgui, |ui| {
        ui.file_browser().render(&mut dialog, &fs, &mut settings)
    });
    assert_eq!(result, BrowserResult::None);
    assert!(dialog.is_open());
    assert_eq!(
        dialog.core().pending_overwrite(),
        Some(dir.join("readme.txt").as_path())
    );

    std::fs::remove_dir_all(&dir).unwrap();
}
