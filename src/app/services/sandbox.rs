//! The isolation boundary around the composed document.
//!
//! The preview webview never loads the composed document directly. It loads
//! a host page whose only content is an `<iframe sandbox srcdoc>` holding the
//! document, plus a listener that forwards the frame's console messages to
//! the native side over `window.ipc`.

/// A permission granted to the sandboxed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Scripts,
    Modals,
    Forms,
    Popups,
}

impl Capability {
    /// The `sandbox` attribute token for this capability.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Scripts => "allow-scripts",
            Self::Modals => "allow-modals",
            Self::Forms => "allow-forms",
            Self::Popups => "allow-popups",
        }
    }
}

/// The exact set of capabilities the preview frame runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxPolicy {
    capabilities: &'static [Capability],
}

impl SandboxPolicy {
    /// Scripts, modal dialogs, form submission and popups. No same-origin
    /// access, so the frame cannot reach the host page or its storage.
    pub const PLAYGROUND: SandboxPolicy = SandboxPolicy {
        capabilities: &[
            Capability::Scripts,
            Capability::Modals,
            Capability::Forms,
            Capability::Popups,
        ],
    };

    pub fn capabilities(&self) -> &'static [Capability] {
        self.capabilities
    }

    /// Value of the iframe `sandbox` attribute.
    pub fn attribute_value(&self) -> String {
        self.capabilities
            .iter()
            .map(Capability::token)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self::PLAYGROUND
    }
}

const HOST_STYLE: &str = "html, body { margin: 0; height: 100%; background: #ffffff; }\niframe { border: 0; width: 100%; height: 100%; display: block; }";

/// Forwards console messages from the frame to the native relay.
const HOST_LISTENER: &str = r#"(function () {
  var frame = document.getElementById('preview');
  window.addEventListener('message', function (event) {
    if (event.source !== frame.contentWindow) {
      return;
    }
    var data = event.data;
    if (!data || data.type !== 'console') {
      return;
    }
    if (window.ipc && typeof window.ipc.postMessage === 'function') {
      window.ipc.postMessage(JSON.stringify({
        type: 'console',
        level: data.level,
        message: data.message
      }));
    }
  });
})();"#;

/// Build the page that hosts `composed` inside a sandboxed frame.
pub fn host_page(composed: &str, policy: &SandboxPolicy) -> String {
    let mut page = String::with_capacity(composed.len() * 2 + 1024);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    page.push_str("<title>FerrisPen Preview</title>\n<style>\n");
    page.push_str(HOST_STYLE);
    page.push_str("\n</style>\n</head>\n<body>\n");
    page.push_str("<iframe id=\"preview\" title=\"output\" sandbox=\"");
    page.push_str(&policy.attribute_value());
    page.push_str("\" srcdoc=\"");
    page.push_str(&escape_attribute(composed));
    page.push_str("\"></iframe>\n<script>\n");
    page.push_str(HOST_LISTENER);
    page.push_str("\n</script>\n</body>\n</html>\n");
    page
}

/// Escape text for a double-quoted HTML attribute.
fn escape_attribute(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
