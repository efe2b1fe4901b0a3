//! The playground's state container: three buffers plus preferences.
//!
//! Every setter writes through to the key/value store before returning.
//! Storage failures are logged and otherwise ignored; the in-memory value
//! always reflects the latest update.

use serde::Serialize;

use crate::app::domain::buffers::{BufferKind, SourceSnapshot};
use crate::app::domain::settings::{AUTO_RUN_KEY, Preferences, TEMPLATE_KEY, THEME_KEY, Theme};
use crate::app::domain::template::{Template, TemplateId};
use crate::app::infrastructure::storage::KvStore;

pub struct SourceStore {
    kv: KvStore,
    markup: String,
    styles: String,
    script: String,
    preferences: Preferences,
}

impl SourceStore {
    /// Restore buffers and preferences from `kv`, defaulting anything missing.
    pub fn load(kv: KvStore) -> Self {
        let defaults = Preferences::default();
        let preferences = Preferences {
            theme: kv.get_or(THEME_KEY, defaults.theme),
            auto_run: kv.get_or(AUTO_RUN_KEY, defaults.auto_run),
            selected_template: kv.get_or(TEMPLATE_KEY, defaults.selected_template),
        };

        Self {
            markup: kv.get_or(BufferKind::Markup.storage_key(), String::new()),
            styles: kv.get_or(BufferKind::Styles.storage_key(), String::new()),
            script: kv.get_or(BufferKind::Script.storage_key(), String::new()),
            preferences,
            kv,
        }
    }

    pub fn buffer(&self, kind: BufferKind) -> &str {
        match kind {
            BufferKind::Markup => &self.markup,
            BufferKind::Styles => &self.styles,
            BufferKind::Script => &self.script,
        }
    }

    /// Copy all three buffers at once.
    pub fn snapshot(&self) -> SourceSnapshot {
        SourceSnapshot::new(self.markup.clone(), self.styles.clone(), self.script.clone())
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// Replace one buffer. Returns false if the text was already current.
    pub fn set_buffer(&mut self, kind: BufferKind, text: impl Into<String>) -> bool {
        let text = text.into();
        let slot = match kind {
            BufferKind::Markup => &mut self.markup,
            BufferKind::Styles => &mut self.styles,
            BufferKind::Script => &mut self.script,
        };
        if *slot == text {
            return false;
        }
        *slot = text;
        let key = kind.storage_key();
        let value = self.buffer(kind).to_string();
        self.persist(key, &value);
        true
    }

    pub fn set_markup(&mut self, text: impl Into<String>) -> bool {
        self.set_buffer(BufferKind::Markup, text)
    }

    pub fn set_styles(&mut self, text: impl Into<String>) -> bool {
        self.set_buffer(BufferKind::Styles, text)
    }

    pub fn set_script(&mut self, text: impl Into<String>) -> bool {
        self.set_buffer(BufferKind::Script, text)
    }

    /// Overwrite all three buffers.
    pub fn replace_all(&mut self, snapshot: SourceSnapshot) {
        self.set_markup(snapshot.markup);
        self.set_styles(snapshot.styles);
        self.set_script(snapshot.script);
    }

    /// Clear all three buffers.
    pub fn reset(&mut self) {
        self.replace_all(SourceSnapshot::default());
    }

    /// Seed the buffers from a template and remember the selection.
    pub fn load_template(&mut self, id: TemplateId) -> &'static Template {
        let template = id.template();
        self.replace_all(SourceSnapshot::new(template.markup, template.styles, template.script));
        self.set_selected_template(id);
        template
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.preferences.theme = theme;
        self.persist(THEME_KEY, &theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.preferences.theme.toggled();
        self.set_theme(theme);
        theme
    }

    pub fn set_auto_run(&mut self, enabled: bool) {
        self.preferences.auto_run = enabled;
        self.persist(AUTO_RUN_KEY, &enabled);
    }

    pub fn set_selected_template(&mut self, id: TemplateId) {
        self.preferences.selected_template = id;
        self.persist(TEMPLATE_KEY, &id);
    }

    fn persist<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if let Err(e) = self.kv.set(key, value) {
            tracing::warn!(key, "Failed to persist: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> SourceStore {
        SourceStore::load(KvStore::open(dir.path().join("storage.json")))
    }

    #[test]
    fn test_fresh_store_defaults() {
        let store = SourceStore::load(KvStore::in_memory());
        assert!(store.snapshot().is_empty());
        assert_eq!(store.preferences(), Preferences::default());
    }

    #[test]
    fn test_updates_persist_synchronously() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = open(&dir);
            store.set_markup("<p>x</p>");
            store.set_styles("p { color: red }");
            store.set_script("console.log('a')");
            store.set_theme(Theme::Light);
            store.set_auto_run(false);
        }
        let store = open(&dir);
        assert_eq!(
            store.snapshot(),
            SourceSnapshot::new("<p>x</p>", "p { color: red }", "console.log('a')")
        );
        assert_eq!(store.preferences().theme, Theme::Light);
        assert!(!store.preferences().auto_run);
    }

    #[test]
    fn test_malformed_entries_use_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("storage.json"),
            r#"{"code-editor-theme": "\"purple\"", "code-editor-autorun": "{", "code-editor-html": "\"<b>kept</b>\""}"#,
        )
        .unwrap();
        let store = open(&dir);
        assert_eq!(store.preferences().theme, Theme::Dark);
        assert!(store.preferences().auto_run);
        assert_eq!(store.buffer(BufferKind::Markup), "<b>kept</b>");
    }

    #[test]
    fn test_set_buffer_reports_change() {
        let mut store = SourceStore::load(KvStore::in_memory());
        assert!(store.set_script("a"));
        assert!(!store.set_script("a"));
    }

    #[test]
    fn test_load_calculator_template() {
        let mut store = SourceStore::load(KvStore::in_memory());
        store.set_markup("old");
        let template = store.load_template(TemplateId::Calculator);

        assert_eq!(store.buffer(BufferKind::Markup), template.markup);
        assert_eq!(store.buffer(BufferKind::Styles), template.styles);
        assert_eq!(store.buffer(BufferKind::Script), template.script);
        assert_eq!(store.preferences().selected_template, TemplateId::Calculator);
    }

    #[test]
    fn test_reset_clears_buffers_only() {
        let mut store = SourceStore::load(KvStore::in_memory());
        store.load_template(TemplateId::Basic);
        store.set_theme(Theme::Light);
        store.reset();
        assert!(store.snapshot().is_empty());
        assert_eq!(store.preferences().theme, Theme::Light);
    }

    #[test]
    fn test_toggle_theme() {
        let mut store = SourceStore::load(KvStore::in_memory());
        assert_eq!(store.toggle_theme(), Theme::Light);
        assert_eq!(store.toggle_theme(), Theme::Dark);
    }
}
