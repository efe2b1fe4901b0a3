use fltk::{
    app::Sender,
    group::{Flex, FlexType},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::domain::buffers::BufferKind;
use crate::app::domain::messages::Message;
use crate::app::domain::settings::Preferences;

use super::console_panel::ConsolePanel;
use super::editor_pane::EditorPane;
use super::settings_bar::SettingsBar;
use super::toolbar::{TOOLBAR_HEIGHT, Toolbar};

pub const MENU_HEIGHT: i32 = 30;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub toolbar: Toolbar,
    pub settings_bar: SettingsBar,
    pub editors: Flex,
    pub panes: Vec<EditorPane>,
    pub console: ConsolePanel,
}

/// Build the main window: menu, toolbar, settings strip, the three editor
/// panes side by side and the console panel. The settings strip and the
/// console start collapsed.
pub fn build_main_window(prefs: &Preferences, sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 1200, 760, "FerrisPen");
    wind.set_xclass("FerrisPen");

    let mut flex = Flex::new(0, 0, 1200, 760, None);
    flex.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    flex.fixed(&menu, MENU_HEIGHT);

    let toolbar = Toolbar::new(prefs.selected_template, prefs.theme, sender);
    flex.fixed(&toolbar.group, TOOLBAR_HEIGHT);

    let mut settings_bar = SettingsBar::new(prefs.auto_run, sender);
    settings_bar.group.hide();
    flex.fixed(&settings_bar.group, 0);

    let mut editors = Flex::default();
    editors.set_type(FlexType::Row);
    editors.set_margins(8, 8, 8, 8);
    editors.set_spacing(6);
    let panes: Vec<EditorPane> = BufferKind::ALL
        .iter()
        .map(|kind| EditorPane::new(*kind, sender))
        .collect();
    editors.end();

    let mut console = ConsolePanel::new(sender);
    console.group.hide();
    flex.fixed(&console.group, 0);

    flex.end();
    wind.end();
    wind.resizable(&flex);

    MainWidgets {
        wind,
        flex,
        menu,
        toolbar,
        settings_bar,
        editors,
        panes,
        console,
    }
}
