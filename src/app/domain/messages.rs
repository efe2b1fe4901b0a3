use super::buffers::BufferKind;
use super::shortcuts::ShortcutAction;
use super::template::TemplateId;

/// All messages that can be sent through the FLTK channel.
/// Menu callbacks, editor callbacks and timers send one of these; the
/// dispatch loop in main handles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // Project
    Run,
    ProjectSave,
    ProjectLoad,
    ExportHtml,
    OpenInBrowser,
    Reset,
    Quit,
    WindowClose,

    // Editing
    BufferEdited(BufferKind),
    LoadTemplate(TemplateId),

    // Scheduler
    AutoRunDue(u64),

    // Relay
    RelayPending,

    // View
    ToggleConsole,
    ClearConsole,
    ToggleSettings,
    ToggleTheme,
    SetAutoRun(bool),

    // Help
    ShowAbout,
}

impl Message {
    /// The message a keyboard binding sends.
    pub fn for_shortcut(action: ShortcutAction) -> Self {
        match action {
            ShortcutAction::Run => Self::Run,
            ShortcutAction::Save => Self::ProjectSave,
            ShortcutAction::Reset => Self::Reset,
            ShortcutAction::ToggleTheme => Self::ToggleTheme,
            ShortcutAction::ToggleSettings => Self::ToggleSettings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::shortcuts::BINDINGS;

    #[test]
    fn test_every_binding_maps_to_distinct_message() {
        let messages: Vec<Message> = BINDINGS.iter().map(|b| Message::for_shortcut(b.action)).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Message::for_shortcut(ShortcutAction::Save), Message::ProjectSave);
    }
}
