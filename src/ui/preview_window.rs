//! Preview window hosting the sandboxed document.
//!
//! On Linux this is a separate GTK window containing a wry WebView. The
//! host page's IPC messages are published on the diagnostic relay. Other
//! platforms open the host page in the system browser, where no relay is
//! available.

use std::path::{Path, PathBuf};

use fltk::app::Sender;

use crate::app::domain::messages::Message;
use crate::app::infrastructure::error::Result;
use crate::app::services::relay::RelayPublisher;

#[cfg(target_os = "linux")]
use crate::app::infrastructure::error::AppError;
#[cfg(target_os = "linux")]
use gtk::glib;
#[cfg(target_os = "linux")]
use gtk::prelude::*;
#[cfg(target_os = "linux")]
use wry::{WebView, WebViewBuilder, WebViewBuilderExtUnix};

#[cfg(target_os = "linux")]
const PLACEHOLDER_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<style>
  body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    display: flex;
    justify-content: center;
    align-items: center;
    height: 100vh;
    margin: 0;
    background: #f5f5f5;
    color: #666;
  }
</style>
</head>
<body>
<p>Press Run to see the result</p>
</body>
</html>"#;

/// Build a `file://` URL for `path`. `run` is appended as a query so that
/// every run navigates to a fresh document.
pub fn page_url(path: &Path, run: u64) -> String {
    format!("file://{}?run={}", path.display(), run)
}

#[cfg(target_os = "linux")]
pub struct PreviewWindow {
    window: gtk::Window,
    webview: Option<WebView>,
    relay: RelayPublisher,
    sender: Sender<Message>,
    placeholder_path: PathBuf,
}

#[cfg(target_os = "linux")]
impl PreviewWindow {
    /// Create the window hidden. Requires `gtk::init()`.
    pub fn new(relay: RelayPublisher, sender: Sender<Message>) -> Self {
        let window = gtk::Window::new(gtk::WindowType::Toplevel);
        window.set_title("FerrisPen Preview");
        window.set_default_size(700, 800);
        window.set_decorated(true);
        window.set_deletable(true);

        window.connect_delete_event(|win, _| {
            win.hide();
            glib::Propagation::Stop
        });

        Self {
            window,
            webview: None,
            relay,
            sender,
            placeholder_path: std::env::temp_dir().join("ferrispen_placeholder.html"),
        }
    }

    /// Create the WebView and wire its IPC channel to the relay.
    pub fn init_webview(&mut self) -> Result<()> {
        if self.webview.is_some() {
            return Ok(());
        }

        let vbox = gtk::Box::new(gtk::Orientation::Vertical, 0);
        vbox.set_hexpand(true);
        vbox.set_vexpand(true);
        self.window.add(&vbox);

        std::fs::write(&self.placeholder_path, PLACEHOLDER_HTML)?;
        let initial_url = page_url(&self.placeholder_path, 0);

        let relay = self.relay.clone();
        let sender = self.sender;
        let webview = WebViewBuilder::new()
            .with_transparent(false)
            .with_url(&initial_url)
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                if relay.publish_wire(request.body()) {
                    sender.send(Message::RelayPending);
                }
            })
            .build_gtk(&vbox)
            .map_err(|e| AppError::Preview(format!("Failed to create WebView: {}", e)))?;

        if let Some(widget) = vbox.children().first() {
            widget.set_hexpand(true);
            widget.set_vexpand(true);
        }

        vbox.show_all();
        self.webview = Some(webview);
        Ok(())
    }

    /// Navigate to the host page at `path`, discarding the previous document.
    pub fn load_page(&mut self, path: &Path, run: u64, _manual: bool) -> Result<()> {
        let Some(ref webview) = self.webview else {
            return Err(AppError::Preview("WebView is not initialized".to_string()));
        };
        webview
            .load_url(&page_url(path, run))
            .map_err(|e| AppError::Preview(format!("Failed to load preview: {}", e)))?;
        if !self.window.is_visible() {
            self.show();
        }
        Ok(())
    }

    pub fn show(&self) {
        self.window.show_all();
    }

    /// Place the preview to the right of the main FLTK window.
    pub fn sync_position(&self, main_x: i32, main_y: i32, main_w: i32, main_h: i32) {
        self.window.move_(main_x + main_w + 10, main_y);
        self.window.resize((main_w / 2).max(400), main_h);
    }

    /// Run pending GTK events. Called from a repeating FLTK timeout.
    pub fn pump() {
        while gtk::events_pending() {
            gtk::main_iteration_do(false);
        }
    }

    pub fn close(&mut self) {
        self.webview = None;
        self.window.close();
        let _ = std::fs::remove_file(&self.placeholder_path);
    }
}

#[cfg(not(target_os = "linux"))]
pub struct PreviewWindow {
    last_page: Option<PathBuf>,
}

#[cfg(not(target_os = "linux"))]
impl PreviewWindow {
    pub fn new(_relay: RelayPublisher, _sender: Sender<Message>) -> Self {
        Self { last_page: None }
    }

    pub fn init_webview(&mut self) -> Result<()> {
        Ok(())
    }

    /// Remember the page; open it in the browser only on a manual run.
    pub fn load_page(&mut self, path: &Path, _run: u64, manual: bool) -> Result<()> {
        self.last_page = Some(path.to_path_buf());
        if manual {
            self.show();
        }
        Ok(())
    }

    pub fn show(&self) {
        if let Some(ref path) = self.last_page {
            if let Err(e) = open::that(path) {
                tracing::warn!("Could not open preview in browser: {}", e);
            }
        }
    }

    pub fn sync_position(&self, _x: i32, _y: i32, _w: i32, _h: i32) {}

    pub fn pump() {}

    pub fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_is_unique_per_run() {
        let path = Path::new("/tmp/ferrispen/preview.html");
        assert_eq!(page_url(path, 3), "file:///tmp/ferrispen/preview.html?run=3");
        assert_ne!(page_url(path, 3), page_url(path, 4));
    }
}
