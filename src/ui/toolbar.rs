use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, Color, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    menu::Choice,
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::settings::Theme;
use crate::app::domain::template::TemplateId;

use super::theme::{accent, palette};

pub const TOOLBAR_HEIGHT: i32 = 44;

pub struct Toolbar {
    pub group: Flex,
    title: Frame,
    templates: Choice,
    run: Button,
    console: Button,
    settings: Button,
    theme: Button,
}

impl Toolbar {
    pub fn new(selected: TemplateId, theme: Theme, sender: &Sender<Message>) -> Self {
        let mut group = Flex::default();
        group.set_type(FlexType::Row);
        group.set_frame(FrameType::FlatBox);
        group.set_margins(10, 7, 10, 7);
        group.set_spacing(6);

        let mut title = Frame::default().with_label("FerrisPen");
        title.set_align(Align::Left | Align::Inside);
        title.set_label_font(Font::HelveticaBold);
        title.set_label_size(17);
        group.fixed(&title, 110);

        let mut templates = Choice::default();
        for id in TemplateId::all() {
            templates.add_choice(id.template().display_name);
        }
        templates.set_value(template_index(selected));
        templates.set_tooltip("Load a template");
        group.fixed(&templates, 150);

        // Flexible gap between the template picker and the actions.
        Frame::default();

        let mut run = action_button("Run", accent::RUN);
        group.fixed(&run, 60);
        let mut save = action_button("Save", accent::SAVE);
        group.fixed(&save, 60);
        let mut load = action_button("Load", accent::LOAD);
        group.fixed(&load, 60);
        let mut export = action_button("Export", accent::EXPORT);
        group.fixed(&export, 70);
        let mut reset = action_button("Reset", accent::RESET);
        group.fixed(&reset, 60);

        let mut console = Button::default().with_label("Console");
        console.set_frame(FrameType::FlatBox);
        console.set_label_size(13);
        group.fixed(&console, 76);
        let mut settings = Button::default().with_label("Settings");
        settings.set_frame(FrameType::FlatBox);
        settings.set_label_size(13);
        group.fixed(&settings, 76);
        let mut theme_button = Button::default().with_label(theme.toggle_label());
        theme_button.set_frame(FrameType::FlatBox);
        theme_button.set_label_size(13);
        group.fixed(&theme_button, 64);

        group.end();

        let s = *sender;
        templates.set_callback(move |c| {
            if let Some(id) = TemplateId::all().get(c.value().max(0) as usize) {
                s.send(Message::LoadTemplate(*id));
            }
        });
        let s = *sender;
        run.set_callback(move |_| s.send(Message::Run));
        let s = *sender;
        save.set_callback(move |_| s.send(Message::ProjectSave));
        let s = *sender;
        load.set_callback(move |_| s.send(Message::ProjectLoad));
        let s = *sender;
        export.set_callback(move |_| s.send(Message::ExportHtml));
        let s = *sender;
        reset.set_callback(move |_| s.send(Message::Reset));
        let s = *sender;
        console.set_callback(move |_| s.send(Message::ToggleConsole));
        let s = *sender;
        settings.set_callback(move |_| s.send(Message::ToggleSettings));
        let s = *sender;
        theme_button.set_callback(move |_| s.send(Message::ToggleTheme));

        Self {
            group,
            title,
            templates,
            run,
            console,
            settings,
            theme: theme_button,
        }
    }

    /// Grey out Run while auto-run is on.
    pub fn set_run_enabled(&mut self, enabled: bool) {
        if enabled {
            self.run.activate();
        } else {
            self.run.deactivate();
        }
    }

    pub fn select_template(&mut self, id: TemplateId) {
        self.templates.set_value(template_index(id));
    }

    pub fn apply_theme(&mut self, theme: Theme, console_open: bool) {
        let p = palette(theme);
        self.group.set_color(p.panel);
        self.title.set_label_color(p.text);
        self.templates.set_color(p.button);
        self.templates.set_text_color(p.button_fg);
        for button in [&mut self.settings, &mut self.theme] {
            button.set_color(p.button);
            button.set_label_color(p.button_fg);
        }
        if console_open {
            self.console.set_color(accent::ACTIVE);
            self.console.set_label_color(Color::White);
        } else {
            self.console.set_color(p.button);
            self.console.set_label_color(p.button_fg);
        }
        self.theme.set_label(theme.toggle_label());
        self.group.redraw();
    }
}

fn action_button(label: &str, color: Color) -> Button {
    let mut button = Button::default().with_label(label);
    button.set_frame(FrameType::FlatBox);
    button.set_color(color);
    button.set_selection_color(color.darker());
    button.set_label_color(Color::White);
    button.set_label_size(13);
    button
}

fn template_index(id: TemplateId) -> i32 {
    TemplateId::all()
        .iter()
        .position(|t| *t == id)
        .map_or(0, |i| i as i32)
}
