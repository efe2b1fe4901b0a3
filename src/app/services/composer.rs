//! Builds the documents the preview and the export run.
//!
//! `compose` produces the instrumented document loaded into the sandboxed
//! frame; `compose_standalone` produces the plain document written by
//! "Export HTML". Both are pure functions of the snapshot.

use std::borrow::Cow;

use crate::app::domain::buffers::SourceSnapshot;

/// Name of the frame-global function the guarded user script reports through.
pub const REPORT_FN: &str = "__ferrisPenReport";

/// Severities whose console functions are wrapped, in wrapping order.
pub const WRAPPED_LEVELS: [&str; 4] = ["log", "error", "warn", "info"];

const BASE_STYLE: &str = "body {\n  margin: 0;\n  padding: 20px;\n  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;\n}";

/// Runs before the user script. Wraps the console, installs the global
/// error listeners and defines the reporter used by the guarded block.
const INSTRUMENTATION: &str = r#"(function () {
  var relay = function (level, args) {
    try {
      window.parent.postMessage({
        type: 'console',
        level: level,
        message: Array.prototype.join.call(args, ' ')
      }, '*');
    } catch (e) {}
  };

  ['log', 'error', 'warn', 'info'].forEach(function (level) {
    var original = console[level];
    console[level] = function () {
      original.apply(console, arguments);
      relay(level, arguments);
    };
  });

  var banner = function (message) {
    var div = document.createElement('div');
    div.setAttribute('data-ferrispen-error', '');
    div.setAttribute('style', 'background: #ffebee; color: #c62828; padding: 10px; margin: 10px 0; border-radius: 4px; border-left: 4px solid #c62828;');
    var label = document.createElement('strong');
    label.textContent = 'Error: ';
    div.appendChild(label);
    div.appendChild(document.createTextNode(message));
    (document.body || document.documentElement).appendChild(div);
  };

  var describe = function (error) {
    return error && error.message !== undefined ? String(error.message) : String(error);
  };

  var report = function (message) {
    relay('error', [message]);
    banner(message);
  };

  window.__ferrisPenReport = function (error) {
    report(describe(error));
  };

  window.addEventListener('error', function (event) {
    report(event.message);
  });

  window.addEventListener('unhandledrejection', function (event) {
    report(describe(event.reason));
  });
})();"#;

/// Compose the instrumented preview document.
pub fn compose(snapshot: &SourceSnapshot) -> String {
    let script = escape_script_close(&snapshot.script);

    let mut doc = String::with_capacity(
        snapshot.markup.len() + snapshot.styles.len() + script.len() + INSTRUMENTATION.len() + 512,
    );
    push_head(&mut doc, None, &snapshot.styles);
    doc.push_str("<body>\n");
    doc.push_str(&snapshot.markup);
    doc.push_str("\n<script>\n");
    doc.push_str(INSTRUMENTATION);
    doc.push_str("\n</script>\n<script>\ntry {\n");
    doc.push_str(&script);
    doc.push_str("\n} catch (error) {\n  window.");
    doc.push_str(REPORT_FN);
    doc.push_str("(error);\n}\n</script>\n</body>\n</html>\n");
    doc
}

/// Compose a self-contained document without sandbox or relay instrumentation.
pub fn compose_standalone(snapshot: &SourceSnapshot) -> String {
    let script = escape_script_close(&snapshot.script);

    let mut doc = String::new();
    push_head(&mut doc, Some("My Project"), &snapshot.styles);
    doc.push_str("<body>\n");
    doc.push_str(&snapshot.markup);
    doc.push_str("\n<script>\n");
    doc.push_str(&script);
    doc.push_str("\n</script>\n</body>\n</html>\n");
    doc
}

fn push_head(doc: &mut String, title: Option<&str>, styles: &str) {
    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    doc.push_str("<meta charset=\"UTF-8\">\n");
    doc.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    if let Some(title) = title {
        doc.push_str("<title>");
        doc.push_str(title);
        doc.push_str("</title>\n");
    }
    doc.push_str("<style>\n");
    if title.is_none() {
        doc.push_str(BASE_STYLE);
        doc.push('\n');
    }
    doc.push_str(styles);
    doc.push_str("\n</style>\n</head>\n");
}

/// Rewrite `</script` (any case) as `<\/script` so user code cannot close
/// its own script element.
fn escape_script_close(script: &str) -> Cow<'_, str> {
    let lower = script.to_ascii_lowercase();
    if !lower.contains("</script") {
        return Cow::Borrowed(script);
    }

    let mut out = String::with_capacity(script.len() + 8);
    let mut last = 0;
    for (idx, _) in lower.match_indices("</script") {
        out.push_str(&script[last..idx]);
        out.push_str("<\\/");
        last = idx + 2;
    }
    out.push_str(&script[last..]);
    Cow::Owned(out)
}
