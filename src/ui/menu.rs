use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::settings::Preferences;
use crate::app::domain::shortcuts::{KeyBinding, ShortcutAction, ShortcutKey, binding_for};
use crate::app::domain::template::TemplateId;

const RUN_ITEM: &str = "Project/Run";
pub const AUTO_RUN_ITEM: &str = "Project/Run Automatically";
pub const CONSOLE_ITEM: &str = "View/Console";
pub const SETTINGS_ITEM: &str = "View/Settings Bar";

/// FLTK shortcut for a binding. Ctrl maps to Cmd on macOS.
pub fn shortcut_of(binding: &KeyBinding) -> Shortcut {
    #[cfg(target_os = "macos")]
    let base = Shortcut::Command;
    #[cfg(not(target_os = "macos"))]
    let base = Shortcut::Ctrl;

    let base = if binding.shift { base | Shortcut::Shift } else { base };
    match binding.key {
        ShortcutKey::Enter => base | Key::Enter,
        ShortcutKey::Char(c) => base | c,
    }
}

/// A plain action item: selecting it sends `message`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionItem {
    pub path: &'static str,
    pub shortcut: Shortcut,
    pub flag: MenuFlag,
    pub message: Message,
}

/// Project menu actions in menu order. They stay active under auto-run;
/// only the toolbar Run button is greyed out.
pub fn project_items() -> [ActionItem; 7] {
    let bound = |action| shortcut_of(binding_for(action));
    let item = |path, shortcut, flag, message| ActionItem { path, shortcut, flag, message };
    [
        item(RUN_ITEM, bound(ShortcutAction::Run), MenuFlag::Normal, Message::Run),
        item("Project/Save Project...", bound(ShortcutAction::Save), MenuFlag::Normal, Message::ProjectSave),
        item("Project/Load Project...", Shortcut::Ctrl | 'o', MenuFlag::Normal, Message::ProjectLoad),
        item("Project/Export HTML...", Shortcut::Ctrl | 'e', MenuFlag::Normal, Message::ExportHtml),
        item("Project/Open in Browser", Shortcut::Ctrl | Shortcut::Shift | 'b', MenuFlag::MenuDivider, Message::OpenInBrowser),
        item("Project/Reset...", bound(ShortcutAction::Reset), MenuFlag::MenuDivider, Message::Reset),
        item("Project/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, Message::Quit),
    ]
}

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, prefs: &Preferences) {
    let s = sender;
    let bound = |action| shortcut_of(binding_for(action));

    // Project
    for item in project_items() {
        let msg = item.message;
        menu.add(item.path, item.shortcut, item.flag, { let s = *s; move |_| s.send(msg) });
        if msg == Message::Run {
            let auto_flag = if prefs.auto_run { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
            menu.add(AUTO_RUN_ITEM, Shortcut::None, auto_flag | MenuFlag::MenuDivider, {
                let s = *s;
                move |m| {
                    let checked = m.find_item(AUTO_RUN_ITEM).map_or(false, |item| item.value());
                    s.send(Message::SetAutoRun(checked));
                }
            });
        }
    }

    // Templates
    for id in TemplateId::all() {
        let id = *id;
        let path = format!("Templates/{}", id.template().display_name);
        menu.add(&path, Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::LoadTemplate(id)) });
    }

    // View
    menu.add(CONSOLE_ITEM, Shortcut::Ctrl | '`', MenuFlag::Toggle, { let s = *s; move |_| s.send(Message::ToggleConsole) });
    menu.add("View/Clear Console", Shortcut::Ctrl | 'l', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::ClearConsole) });
    menu.add(SETTINGS_ITEM, bound(ShortcutAction::ToggleSettings), MenuFlag::Toggle, { let s = *s; move |_| s.send(Message::ToggleSettings) });
    let dark_flag = if prefs.theme.is_dark() { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Dark Mode", bound(ShortcutAction::ToggleTheme), dark_flag, { let s = *s; move |_| s.send(Message::ToggleTheme) });

    // Help
    menu.add("Help/About FerrisPen", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
}

/// Set or clear a toggle item.
pub fn set_checked(menu: &MenuBar, path: &str, checked: bool) {
    if let Some(mut item) = menu.find_item(path) {
        if checked {
            item.set();
        } else {
            item.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_item_keeps_binding_and_stays_active() {
        let items = project_items();
        let run = items.iter().find(|i| i.message == Message::Run).unwrap();
        assert_eq!(run.path, RUN_ITEM);
        assert_eq!(run.shortcut, shortcut_of(binding_for(ShortcutAction::Run)));
        assert!(!run.flag.contains(MenuFlag::Inactive));
    }

    #[test]
    fn test_no_project_item_is_inactive() {
        assert!(project_items().iter().all(|i| !i.flag.contains(MenuFlag::Inactive)));
    }

    #[test]
    fn test_bound_actions_reach_their_messages() {
        let items = project_items();
        for action in [ShortcutAction::Run, ShortcutAction::Save, ShortcutAction::Reset] {
            let shortcut = shortcut_of(binding_for(action));
            let item = items.iter().find(|i| i.shortcut == shortcut).unwrap();
            assert_eq!(item.message, Message::for_shortcut(action));
        }
    }
}
