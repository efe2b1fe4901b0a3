use std::fs;
use std::path::Path;

use fltk::{
    app::{self, Sender},
    dialog,
    group::Flex,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::controllers::console::ConsoleController;
use super::controllers::preview::{
    PreviewController, RunTrigger, cleanup_preview_files, export_standalone, write_browser_copy,
    write_preview_file,
};
use super::domain::buffers::BufferKind;
use super::domain::diagnostics::capture_time;
use super::domain::messages::Message;
use super::domain::project::{DEFAULT_EXPORT_FILE_NAME, DEFAULT_PROJECT_FILE_NAME, ProjectFile};
use super::domain::settings::Theme;
use super::domain::template::TemplateId;
use super::infrastructure::error::Result;
use super::services::file_filters::{ensure_extension, html_files_filter, project_files_filter};
use super::services::relay::RelaySubscriber;
use super::services::scheduler::DEBOUNCE;
use super::services::source_store::SourceStore;
use crate::ui::console_panel::{CONSOLE_HEIGHT, ConsolePanel};
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::editor_pane::EditorPane;
use crate::ui::file_dialogs::{confirm, native_open_dialog, native_save_dialog};
use crate::ui::main_window::MainWidgets;
use crate::ui::menu::{AUTO_RUN_ITEM, CONSOLE_ITEM, SETTINGS_ITEM, set_checked};
use crate::ui::preview_window::PreviewWindow;
use crate::ui::settings_bar::{SETTINGS_BAR_HEIGHT, SettingsBar};
use crate::ui::theme::{apply_theme, palette};
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;
use crate::ui::toolbar::Toolbar;

const LOAD_FAILED: &str = "Could not load the file. Make sure it is a valid JSON file.";

pub struct AppState {
    pub store: SourceStore,
    pub preview: PreviewController,
    pub console: ConsoleController,
    relay: RelaySubscriber,
    pub preview_window: PreviewWindow,
    pub window: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub toolbar: Toolbar,
    pub settings_bar: SettingsBar,
    pub editors: Flex,
    pub panes: Vec<EditorPane>,
    pub console_panel: ConsolePanel,
    pub sender: Sender<Message>,
    pub settings_visible: bool,
    /// Last directory used in a file open/save dialog.
    pub last_directory: Option<String>,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        store: SourceStore,
        preview_window: PreviewWindow,
        relay: RelaySubscriber,
        sender: Sender<Message>,
    ) -> Self {
        let prefs = store.preferences();
        let MainWidgets {
            wind,
            flex,
            menu,
            toolbar,
            settings_bar,
            editors,
            panes,
            console,
        } = widgets;

        let mut state = Self {
            preview: PreviewController::new(prefs.auto_run),
            console: ConsoleController::new(),
            store,
            relay,
            preview_window,
            window: wind,
            flex,
            menu,
            toolbar,
            settings_bar,
            editors,
            panes,
            console_panel: console,
            sender,
            settings_visible: false,
            last_directory: None,
        };
        state.sync_editors_from_store();
        state.toolbar.set_run_enabled(!prefs.auto_run);
        state.apply_current_theme();
        state.console_panel.refresh(&state.console, prefs.theme);
        state
    }

    fn theme(&self) -> Theme {
        self.store.preferences().theme
    }

    /// Push the store's buffers into the editors.
    fn sync_editors_from_store(&mut self) {
        let snapshot = self.store.snapshot();
        for pane in &mut self.panes {
            pane.set_text(snapshot.get(pane.kind));
        }
    }

    // --- Editing and runs ---

    /// An editor changed. Programmatic updates already match the store and
    /// are ignored here.
    pub fn buffer_edited(&mut self, kind: BufferKind) {
        let Some(text) = self.panes.iter().find(|p| p.kind == kind).map(|p| p.text()) else {
            return;
        };
        if self.store.set_buffer(kind, text) {
            self.schedule_auto_run();
        }
    }

    /// Arm the debounce timer if auto-run is on.
    pub fn schedule_auto_run(&mut self) {
        if let Some(ticket) = self.preview.scheduler.on_edit() {
            let s = self.sender;
            app::add_timeout3(DEBOUNCE.as_secs_f64(), move |_| {
                s.send(Message::AutoRunDue(ticket));
            });
        }
    }

    pub fn auto_run_due(&mut self, ticket: u64) {
        let snapshot = self.store.snapshot();
        if let Some(page) = self.preview.on_timer(ticket, &snapshot) {
            self.show_page(&page, RunTrigger::Auto);
        }
    }

    /// Manual run. Not debounced.
    pub fn run(&mut self) {
        let snapshot = self.store.snapshot();
        let page = self.preview.run_now(&snapshot);
        self.show_page(&page, RunTrigger::Manual);
    }

    /// Render the restored buffers once at launch.
    pub fn initial_run(&mut self) {
        let snapshot = self.store.snapshot();
        let page = self.preview.startup(&snapshot);
        self.show_page(&page, RunTrigger::Startup);
    }

    fn show_page(&mut self, page: &str, trigger: RunTrigger) {
        let manual = trigger.is_manual();
        let result = write_preview_file(page).and_then(|path| {
            self.preview_window
                .load_page(&path, self.preview.runs(), manual)
        });
        if let Err(e) = result {
            tracing::warn!("Preview failed: {}", e);
            if manual {
                dialog::alert_default(&format!("Could not show the preview: {}", e));
            }
        }
    }

    // --- Relay ---

    /// Move pending relay messages into the console.
    pub fn drain_relay(&mut self) {
        let delivered = self.relay.deliver_into(self.console.log_mut(), capture_time);
        if delivered > 0 {
            let theme = self.theme();
            self.console_panel.refresh(&self.console, theme);
        }
    }

    // --- Project files ---

    pub fn project_save(&mut self) {
        let Some(path) = native_save_dialog(
            "Save Project",
            &project_files_filter(),
            &self.preset_path(DEFAULT_PROJECT_FILE_NAME),
        ) else {
            return;
        };
        let path = ensure_extension(&path, "json");
        self.remember_directory(&path);

        let project = ProjectFile::from_snapshot(&self.store.snapshot(), capture_time());
        let result = project.to_json().and_then(|json| Ok(fs::write(&path, json)?));
        if let Err(e) = result {
            dialog::alert_default(&format!("Error saving project: {}", e));
        }
    }

    pub fn project_load(&mut self) {
        let Some(path) = native_open_dialog("Load Project", &project_files_filter()) else {
            return;
        };
        self.remember_directory(&path);

        match read_project(Path::new(&path)) {
            Ok(project) => {
                self.store.replace_all(project.snapshot());
                self.sync_editors_from_store();
                self.schedule_auto_run();
            }
            Err(e) => {
                tracing::warn!("Rejected project {}: {}", path, e);
                dialog::alert_default(LOAD_FAILED);
            }
        }
    }

    pub fn export_html(&mut self) {
        let Some(path) = native_save_dialog(
            "Export HTML",
            &html_files_filter(),
            &self.preset_path(DEFAULT_EXPORT_FILE_NAME),
        ) else {
            return;
        };
        let path = ensure_extension(&path, "html");
        self.remember_directory(&path);

        if let Err(e) = export_standalone(&self.store.snapshot(), Path::new(&path)) {
            dialog::alert_default(&format!("Error exporting HTML: {}", e));
        }
    }

    pub fn open_in_browser(&mut self) {
        let result = write_browser_copy(&self.store.snapshot())
            .and_then(|path| Ok(open::that(&path)?));
        if let Err(e) = result {
            dialog::alert_default(&format!("Could not open the browser: {}", e));
        }
    }

    fn preset_path(&self, file_name: &str) -> String {
        match self.last_directory {
            Some(ref dir) => Path::new(dir).join(file_name).to_string_lossy().to_string(),
            None => file_name.to_string(),
        }
    }

    fn remember_directory(&mut self, path: &str) {
        if let Some(parent) = Path::new(path).parent() {
            self.last_directory = Some(parent.to_string_lossy().to_string());
        }
    }

    // --- Buffers ---

    pub fn reset(&mut self) {
        if !confirm("Are you sure you want to clear all the code?", "Reset", "Cancel") {
            return;
        }
        self.store.reset();
        self.sync_editors_from_store();
        self.schedule_auto_run();
    }

    pub fn load_template(&mut self, id: TemplateId) {
        self.store.load_template(id);
        self.sync_editors_from_store();
        self.toolbar.select_template(id);
        self.schedule_auto_run();
    }

    // --- View ---

    pub fn toggle_theme(&mut self) {
        let theme = self.store.toggle_theme();
        set_checked(&self.menu, "View/Dark Mode", theme.is_dark());
        self.apply_current_theme();
    }

    fn apply_current_theme(&mut self) {
        let theme = self.theme();
        apply_theme(&mut self.window, &mut self.menu, theme);
        self.toolbar.apply_theme(theme, self.console.visible);
        self.settings_bar.apply_theme(theme);
        self.editors.set_color(palette(theme).window);
        for pane in &mut self.panes {
            pane.apply_theme(theme);
        }
        self.console_panel.apply_theme(theme);
        self.console_panel.refresh(&self.console, theme);
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&self.window, theme.is_dark());
        self.window.redraw();
    }

    pub fn toggle_settings(&mut self) {
        self.settings_visible = !self.settings_visible;
        let visible = self.settings_visible;
        set_strip(&mut self.flex, &mut self.settings_bar.group, visible, SETTINGS_BAR_HEIGHT);
        set_checked(&self.menu, SETTINGS_ITEM, visible);
        self.window.redraw();
    }

    pub fn toggle_console(&mut self) {
        let visible = self.console.toggle();
        set_strip(&mut self.flex, &mut self.console_panel.group, visible, CONSOLE_HEIGHT);
        set_checked(&self.menu, CONSOLE_ITEM, visible);
        self.toolbar.apply_theme(self.theme(), visible);
        if visible {
            let theme = self.theme();
            self.console_panel.refresh(&self.console, theme);
        }
        self.window.redraw();
    }

    pub fn clear_console(&mut self) {
        self.console.clear();
        let theme = self.theme();
        self.console_panel.refresh(&self.console, theme);
    }

    pub fn set_auto_run(&mut self, enabled: bool) {
        self.store.set_auto_run(enabled);
        self.preview.scheduler.set_auto_run(enabled);
        self.toolbar.set_run_enabled(!enabled);
        self.settings_bar.set_auto_run(enabled);
        set_checked(&self.menu, AUTO_RUN_ITEM, enabled);
        if enabled {
            self.schedule_auto_run();
        }
    }

    pub fn show_about(&mut self) {
        show_about_dialog();
    }

    /// Release the preview and its temp files before exit.
    pub fn shutdown(&mut self) {
        self.preview.scheduler.set_auto_run(false);
        self.preview_window.close();
        cleanup_preview_files();
    }
}

/// Show or collapse a fixed-height child of the main column.
fn set_strip<W: WidgetExt>(flex: &mut Flex, widget: &mut W, visible: bool, height: i32) {
    if visible {
        widget.show();
        flex.fixed(&*widget, height);
    } else {
        widget.hide();
        flex.fixed(&*widget, 0);
    }
    flex.layout();
}

fn read_project(path: &Path) -> Result<ProjectFile> {
    let contents = fs::read_to_string(path)?;
    ProjectFile::parse(&contents)
}
