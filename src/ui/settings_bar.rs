use fltk::{
    app::Sender,
    button::CheckButton,
    enums::{Align, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::settings::{AUTO_RUN_DELAY_MS, Theme};
use crate::app::domain::shortcuts::help_text;

use super::theme::palette;

pub const SETTINGS_BAR_HEIGHT: i32 = 56;

/// Collapsible strip under the toolbar. Hidden by giving it zero height.
pub struct SettingsBar {
    pub group: Flex,
    auto_run: CheckButton,
    hint: Frame,
    shortcuts_title: Frame,
    shortcuts: Frame,
}

impl SettingsBar {
    pub fn new(auto_run: bool, sender: &Sender<Message>) -> Self {
        let mut group = Flex::default();
        group.set_type(FlexType::Row);
        group.set_frame(FrameType::FlatBox);
        group.set_margins(12, 6, 12, 6);
        group.set_spacing(16);

        let mut auto_run_check = CheckButton::default().with_label("Run automatically");
        auto_run_check.set_checked(auto_run);
        auto_run_check.set_label_size(13);
        group.fixed(&auto_run_check, 160);

        let mut hint = Frame::default().with_label(&format!(
            "Changes run automatically after a {} ms pause",
            AUTO_RUN_DELAY_MS
        ));
        hint.set_align(Align::Left | Align::Inside);
        hint.set_label_size(11);
        group.fixed(&hint, 280);

        let mut shortcuts_title = Frame::default().with_label("Keyboard shortcuts:");
        shortcuts_title.set_align(Align::Right | Align::Inside);
        shortcuts_title.set_label_font(Font::HelveticaBold);
        shortcuts_title.set_label_size(11);
        group.fixed(&shortcuts_title, 130);

        let mut shortcuts = Frame::default().with_label(&help_text());
        shortcuts.set_align(Align::Left | Align::Inside);
        shortcuts.set_label_size(11);

        group.end();

        let s = *sender;
        auto_run_check.set_callback(move |c| s.send(Message::SetAutoRun(c.is_checked())));

        Self {
            group,
            auto_run: auto_run_check,
            hint,
            shortcuts_title,
            shortcuts,
        }
    }

    pub fn set_auto_run(&mut self, enabled: bool) {
        self.auto_run.set_checked(enabled);
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        let p = palette(theme);
        self.group.set_color(p.header);
        self.auto_run.set_color(p.header);
        self.auto_run.set_label_color(p.text);
        self.hint.set_label_color(p.muted);
        self.shortcuts_title.set_label_color(p.muted);
        self.shortcuts.set_label_color(p.muted);
        self.group.redraw();
    }
}
