use fltk::{
    app::Sender,
    browser::Browser,
    button::Button,
    enums::{Align, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
};

use crate::app::controllers::console::ConsoleController;
use crate::app::domain::messages::Message;
use crate::app::domain::settings::Theme;

use super::theme::palette;

pub const CONSOLE_HEIGHT: i32 = 220;
const CONSOLE_HEADER_HEIGHT: i32 = 30;

/// Bottom panel listing the preview's console output.
pub struct ConsolePanel {
    pub group: Flex,
    header: Flex,
    title: Frame,
    clear: Button,
    close: Button,
    browser: Browser,
}

impl ConsolePanel {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut group = Flex::default();
        group.set_type(FlexType::Column);
        group.set_frame(FrameType::FlatBox);

        let mut header = Flex::default();
        header.set_type(FlexType::Row);
        header.set_frame(FrameType::FlatBox);
        header.set_margins(10, 3, 6, 3);
        header.set_spacing(4);

        let mut title = Frame::default().with_label("Console (0)");
        title.set_align(Align::Left | Align::Inside);
        title.set_label_font(Font::HelveticaBold);
        title.set_label_size(13);

        let mut clear = Button::default().with_label("Clear");
        clear.set_tooltip("Clear console");
        clear.set_frame(FrameType::FlatBox);
        clear.set_label_size(12);
        header.fixed(&clear, 56);

        let mut close = Button::default().with_label("x");
        close.set_tooltip("Close console");
        close.set_frame(FrameType::FlatBox);
        header.fixed(&close, 24);

        header.end();
        group.fixed(&header, CONSOLE_HEADER_HEIGHT);

        let mut browser = Browser::default();
        browser.set_frame(FrameType::FlatBox);
        browser.set_text_font(Font::Courier);
        browser.set_text_size(13);

        group.end();

        let s = *sender;
        clear.set_callback(move |_| s.send(Message::ClearConsole));
        let s = *sender;
        close.set_callback(move |_| s.send(Message::ToggleConsole));

        Self {
            group,
            header,
            title,
            clear,
            close,
            browser,
        }
    }

    /// Rebuild the rows from the console model and scroll to the newest one.
    pub fn refresh(&mut self, console: &ConsoleController, theme: Theme) {
        self.title.set_label(&console.header_label());
        self.browser.clear();
        for row in console.rows(theme) {
            self.browser.add(&row);
        }
        if !console.log().is_empty() {
            self.browser.bottom_line(self.browser.size());
        }
        self.group.redraw();
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        let p = palette(theme);
        self.group.set_color(p.panel);
        self.header.set_color(p.header);
        self.title.set_label_color(p.text);
        for button in [&mut self.clear, &mut self.close] {
            button.set_color(p.header);
            button.set_label_color(p.muted);
        }
        self.browser.set_color(p.panel);
        self.browser.set_selection_color(p.selection);
        self.group.redraw();
    }
}
