use fltk::dialog::{self, FileDialogOptions, FileDialogType, NativeFileChooser};

/// Native open dialog. Returns `None` when cancelled.
pub fn native_open_dialog(title: &str, filter: &str) -> Option<String> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseFile);
    nfc.set_title(title);
    nfc.set_filter(filter);
    nfc.show();
    chosen(&nfc)
}

/// Native save dialog preset to `default_name`. Returns `None` when cancelled.
pub fn native_save_dialog(title: &str, filter: &str, default_name: &str) -> Option<String> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
    nfc.set_title(title);
    nfc.set_filter(filter);
    nfc.set_preset_file(default_name);
    nfc.set_option(FileDialogOptions::SaveAsConfirm);
    nfc.show();
    chosen(&nfc)
}

fn chosen(nfc: &NativeFileChooser) -> Option<String> {
    if let Some(err) = nfc.error_message() {
        if !err.is_empty() && err != "No error" {
            tracing::warn!("File dialog error: {}", err);
            return None;
        }
    }
    let filename = nfc.filename();
    let s = filename.to_string_lossy();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Yes/no confirmation. Returns true for the affirmative answer.
pub fn confirm(question: &str, yes: &str, no: &str) -> bool {
    dialog::choice2_default(question, no, yes, "") == Some(1)
}
