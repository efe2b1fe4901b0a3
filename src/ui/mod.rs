pub mod console_panel;
pub mod dialogs;
pub mod editor_pane;
pub mod file_dialogs;
pub mod main_window;
pub mod menu;
pub mod preview_window;
pub mod settings_bar;
pub mod theme;
pub mod toolbar;
