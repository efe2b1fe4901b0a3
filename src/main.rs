#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use fltk::{app, prelude::*};

use ferris_pen::app::Message;
use ferris_pen::app::infrastructure::logging::init_logging;
use ferris_pen::app::infrastructure::storage::KvStore;
use ferris_pen::app::services::relay;
use ferris_pen::app::services::source_store::SourceStore;
use ferris_pen::app::state::AppState;
use ferris_pen::ui::main_window::build_main_window;
use ferris_pen::ui::menu::build_menu;
use ferris_pen::ui::preview_window::PreviewWindow;

/// Interval of the GTK event pump, in seconds.
const GTK_PUMP_INTERVAL: f64 = 0.016;

fn main() {
    init_logging();

    #[cfg(target_os = "linux")]
    if let Err(e) = gtk::init() {
        tracing::error!("Failed to initialize GTK: {}", e);
    }

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let store = SourceStore::load(KvStore::open_default());
    let prefs = store.preferences();

    let mut widgets = build_main_window(&prefs, &sender);
    build_menu(&mut widgets.menu, &sender, &prefs);

    let (publisher, subscriber) = relay::channel();
    let mut preview_window = PreviewWindow::new(publisher, sender);
    if let Err(e) = preview_window.init_webview() {
        tracing::error!("{}", e);
    }

    widgets.wind.set_callback(move |_| {
        if app::event() == fltk::enums::Event::Close {
            sender.send(Message::WindowClose);
        }
    });

    let mut state = AppState::new(widgets, store, preview_window, subscriber, sender);
    state.window.show();
    state.preview_window.sync_position(
        state.window.x(),
        state.window.y(),
        state.window.w(),
        state.window.h(),
    );

    #[cfg(target_os = "windows")]
    ferris_pen::ui::theme::set_windows_titlebar_theme(&state.window, prefs.theme.is_dark());

    app::add_timeout3(GTK_PUMP_INTERVAL, |handle| {
        PreviewWindow::pump();
        app::repeat_timeout3(GTK_PUMP_INTERVAL, handle);
    });

    state.initial_run();

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::Run => state.run(),
                Message::ProjectSave => state.project_save(),
                Message::ProjectLoad => state.project_load(),
                Message::ExportHtml => state.export_html(),
                Message::OpenInBrowser => state.open_in_browser(),
                Message::Reset => state.reset(),
                Message::Quit | Message::WindowClose => {
                    state.shutdown();
                    app.quit();
                }

                Message::BufferEdited(kind) => state.buffer_edited(kind),
                Message::LoadTemplate(id) => state.load_template(id),
                Message::AutoRunDue(ticket) => state.auto_run_due(ticket),
                Message::RelayPending => state.drain_relay(),

                Message::ToggleConsole => state.toggle_console(),
                Message::ClearConsole => state.clear_console(),
                Message::ToggleSettings => state.toggle_settings(),
                Message::ToggleTheme => state.toggle_theme(),
                Message::SetAutoRun(enabled) => state.set_auto_run(enabled),

                Message::ShowAbout => state.show_about(),
            }
        }
    }
}
