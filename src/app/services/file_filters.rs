/// Filter for the project Load/Save dialogs.
///
/// FLTK format: "Description\tPattern\nDescription2\tPattern2".
/// FLTK adds "All Files (*)" itself, so it is not listed here.
pub fn project_files_filter() -> String {
    ["Playground Projects\t*.json"].join("\n")
}

/// Filter for the "Export HTML" dialog.
pub fn html_files_filter() -> String {
    ["HTML Files\t*.{html,htm}"].join("\n")
}

/// Append `extension` when the chosen path has none.
///
/// Native save dialogs on Linux do not add the extension of the active filter.
pub fn ensure_extension(path: &str, extension: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    if name.contains('.') {
        path.to_string()
    } else {
        format!("{}.{}", path, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_filter_format() {
        let filter = project_files_filter();
        assert!(filter.contains('\t'));
        assert!(filter.ends_with("*.json"));
    }

    #[test]
    fn test_html_filter_format() {
        let filter = html_files_filter();
        assert!(filter.starts_with("HTML Files"));
        assert!(filter.contains("*.{html,htm}"));
    }

    #[test]
    fn test_ensure_extension_adds_missing() {
        assert_eq!(ensure_extension("/tmp/project", "json"), "/tmp/project.json");
    }

    #[test]
    fn test_ensure_extension_keeps_existing() {
        assert_eq!(ensure_extension("/tmp/page.htm", "html"), "/tmp/page.htm");
        assert_eq!(ensure_extension("C:\\work\\p.json", "json"), "C:\\work\\p.json");
    }

    #[test]
    fn test_ensure_extension_ignores_dotted_directories() {
        assert_eq!(ensure_extension("/home/me/.config/project", "json"), "/home/me/.config/project.json");
    }
}
