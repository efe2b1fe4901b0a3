//! Keyboard bindings of the playground.
//!
//! The table is FLTK-free so it can be checked in tests; `ui::menu` turns
//! each entry into a menu shortcut.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Run,
    Save,
    Reset,
    ToggleTheme,
    ToggleSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Enter,
    Char(char),
}

/// Ctrl (Cmd on macOS) + optional Shift + key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub action: ShortcutAction,
    pub key: ShortcutKey,
    pub shift: bool,
    pub label: &'static str,
}

pub const BINDINGS: [KeyBinding; 5] = [
    KeyBinding { action: ShortcutAction::Run, key: ShortcutKey::Enter, shift: false, label: "Ctrl+Enter" },
    KeyBinding { action: ShortcutAction::Save, key: ShortcutKey::Char('s'), shift: false, label: "Ctrl+S" },
    KeyBinding { action: ShortcutAction::Reset, key: ShortcutKey::Char('r'), shift: true, label: "Ctrl+Shift+R" },
    KeyBinding { action: ShortcutAction::ToggleTheme, key: ShortcutKey::Char('d'), shift: false, label: "Ctrl+D" },
    KeyBinding { action: ShortcutAction::ToggleSettings, key: ShortcutKey::Char(','), shift: false, label: "Ctrl+," },
];

pub fn binding_for(action: ShortcutAction) -> &'static KeyBinding {
    BINDINGS
        .iter()
        .find(|b| b.action == action)
        .unwrap_or(&BINDINGS[0])
}

/// Resolve a Ctrl-modified key press. Letter keys match case-insensitively.
pub fn match_key(key: ShortcutKey, shift: bool) -> Option<ShortcutAction> {
    let normalized = match key {
        ShortcutKey::Char(c) => ShortcutKey::Char(c.to_ascii_lowercase()),
        other => other,
    };
    BINDINGS
        .iter()
        .find(|b| b.key == normalized && b.shift == shift)
        .map(|b| b.action)
}

/// Help text listing every binding, three per line.
pub fn help_text() -> String {
    let entries: Vec<String> = BINDINGS
        .iter()
        .map(|b| format!("{}: {}", b.label, action_name(b.action)))
        .collect();
    entries
        .chunks(3)
        .map(|line| line.join(" | "))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn action_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Run => "Run",
        ShortcutAction::Save => "Save",
        ShortcutAction::Reset => "Reset",
        ShortcutAction::ToggleTheme => "Toggle theme",
        ShortcutAction::ToggleSettings => "Settings",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_one_binding() {
        for action in [
            ShortcutAction::Run,
            ShortcutAction::Save,
            ShortcutAction::Reset,
            ShortcutAction::ToggleTheme,
            ShortcutAction::ToggleSettings,
        ] {
            assert_eq!(BINDINGS.iter().filter(|b| b.action == action).count(), 1);
            assert_eq!(binding_for(action).action, action);
        }
    }

    #[test]
    fn test_match_key() {
        assert_eq!(match_key(ShortcutKey::Enter, false), Some(ShortcutAction::Run));
        assert_eq!(match_key(ShortcutKey::Char('s'), false), Some(ShortcutAction::Save));
        assert_eq!(match_key(ShortcutKey::Char('R'), true), Some(ShortcutAction::Reset));
        assert_eq!(match_key(ShortcutKey::Char('d'), false), Some(ShortcutAction::ToggleTheme));
        assert_eq!(match_key(ShortcutKey::Char(','), false), Some(ShortcutAction::ToggleSettings));
    }

    #[test]
    fn test_reset_requires_shift() {
        assert_eq!(match_key(ShortcutKey::Char('r'), false), None);
        assert_eq!(match_key(ShortcutKey::Char('s'), true), None);
    }

    #[test]
    fn test_help_text_mentions_all_labels() {
        let help = help_text();
        for b in BINDINGS.iter() {
            assert!(help.contains(b.label));
        }
        assert_eq!(help.lines().count(), 2);
    }
}
