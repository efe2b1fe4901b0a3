use std::cell::Cell;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    draw,
    enums::{Align, Color, Event, Font, FrameType, Key},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
    text::{TextBuffer, TextEditor},
};

use crate::app::domain::buffers::BufferKind;
use crate::app::domain::messages::Message;
use crate::app::domain::settings::Theme;
use crate::app::domain::shortcuts::{ShortcutKey, match_key};
use crate::app::infrastructure::buffer::buffer_text_no_leak;

use super::theme::palette;

pub const PANE_HEADER_HEIGHT: i32 = 28;
const INDENT: &str = "  ";
const PLACEHOLDER_INSET: i32 = 4;

/// One source editor with its header: name on the left, language on the right.
pub struct EditorPane {
    pub kind: BufferKind,
    pub group: Flex,
    title: Frame,
    language: Frame,
    header: Flex,
    pub editor: TextEditor,
    buffer: TextBuffer,
    placeholder_color: Rc<Cell<Color>>,
}

impl EditorPane {
    /// Build the pane inside the currently open group.
    pub fn new(kind: BufferKind, sender: &Sender<Message>) -> Self {
        let mut group = Flex::default();
        group.set_type(FlexType::Column);
        group.set_frame(FrameType::FlatBox);

        let mut header = Flex::default();
        header.set_type(FlexType::Row);
        header.set_frame(FrameType::FlatBox);
        header.set_margins(8, 0, 8, 0);

        let mut title = Frame::default().with_label(kind.display_name());
        title.set_align(Align::Left | Align::Inside);
        title.set_label_font(Font::HelveticaBold);
        title.set_label_size(13);

        let mut language = Frame::default().with_label(kind.language());
        language.set_align(Align::Right | Align::Inside);
        language.set_label_size(11);

        header.end();
        group.fixed(&header, PANE_HEADER_HEIGHT);

        let mut buffer = TextBuffer::default();
        let mut editor = TextEditor::new(0, 0, 0, 0, "");
        editor.set_buffer(buffer.clone());
        editor.set_text_font(Font::Courier);
        editor.set_text_size(14);
        editor.set_linenumber_width(40);
        editor.set_linenumber_size(12);

        group.end();

        let placeholder_color = Rc::new(Cell::new(Color::from_rgb(156, 163, 175)));
        {
            let buf = buffer.clone();
            let color = placeholder_color.clone();
            editor.draw(move |ed| {
                if buf.length() == 0 {
                    draw_placeholder(ed, kind.placeholder(), color.get());
                }
            });
        }

        let s = *sender;
        let buf = buffer.clone();
        let mut ed = editor.clone();
        buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                s.send(Message::BufferEdited(kind));
                // Leaving or entering the empty state repaints the whole text area.
                let len = buf.length();
                if len == 0 || len == inserted {
                    ed.redraw();
                }
            }
        });

        let s = *sender;
        editor.handle(move |ed, event| handle_key(ed, event, &s));

        Self {
            kind,
            group,
            title,
            language,
            header,
            editor,
            buffer,
            placeholder_color,
        }
    }

    pub fn text(&self) -> String {
        buffer_text_no_leak(&self.buffer)
    }

    /// Replace the editor contents. No-op when the text is already current,
    /// which keeps the cursor where it is.
    pub fn set_text(&mut self, text: &str) {
        if self.text() != text {
            self.buffer.set_text(text);
        }
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        let p = palette(theme);
        self.group.set_color(p.panel);
        self.header.set_color(p.header);
        self.title.set_label_color(p.text);
        self.language.set_label_color(p.muted);
        self.editor.set_color(p.editor_bg);
        self.editor.set_text_color(p.editor_fg);
        self.editor.set_cursor_color(p.cursor);
        self.editor.set_selection_color(p.selection);
        self.editor.set_linenumber_bgcolor(p.linenumber_bg);
        self.editor.set_linenumber_fgcolor(p.linenumber_fg);
        self.placeholder_color.set(p.muted);
        self.group.redraw();
    }
}

/// Muted sample text over an empty editor, aligned with the first text column.
fn draw_placeholder(ed: &TextEditor, text: &str, color: Color) {
    let x = ed.x() + ed.linenumber_width() + PLACEHOLDER_INSET;
    let y = ed.y() + PLACEHOLDER_INSET;
    let w = ed.w() - ed.linenumber_width() - 2 * PLACEHOLDER_INSET;
    let h = ed.h() - 2 * PLACEHOLDER_INSET;
    if w <= 0 || h <= 0 {
        return;
    }
    draw::push_clip(x, y, w, h);
    draw::set_font(ed.text_font(), ed.text_size());
    draw::set_draw_color(color);
    draw::draw_text2(text, x, y, w, h, Align::TopLeft | Align::Inside | Align::Clip);
    draw::pop_clip();
}

fn handle_key(editor: &mut TextEditor, event: Event, sender: &Sender<Message>) -> bool {
    if event != Event::KeyDown {
        return false;
    }
    let key = app::event_key();

    if app::is_event_ctrl() || app::is_event_command() {
        let shortcut_key = if key == Key::Enter || key == Key::KPEnter {
            Some(ShortcutKey::Enter)
        } else {
            key.to_char().map(ShortcutKey::Char)
        };
        if let Some(action) = shortcut_key.and_then(|k| match_key(k, app::is_event_shift())) {
            sender.send(Message::for_shortcut(action));
            return true;
        }
        return false;
    }

    if key == Key::Tab && !app::is_event_shift() && !app::is_event_alt() {
        insert_indent(editor);
        return true;
    }
    false
}

fn insert_indent(editor: &mut TextEditor) {
    let Some(mut buf) = editor.buffer() else {
        return;
    };
    if buf.selected() {
        if let Some((start, _end)) = buf.selection_position() {
            buf.remove_selection();
            editor.set_insert_position(start);
        }
    }
    let pos = editor.insert_position();
    buf.insert(pos, INDENT);
    editor.set_insert_position(pos + INDENT.len() as i32);
    editor.show_insert_position();
}
