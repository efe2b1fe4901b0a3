/// One of the three editable sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Markup,
    Styles,
    Script,
}

impl BufferKind {
    pub const ALL: [BufferKind; 3] = [Self::Markup, Self::Styles, Self::Script];

    /// Key the buffer is persisted under.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Markup => "code-editor-html",
            Self::Styles => "code-editor-css",
            Self::Script => "code-editor-js",
        }
    }

    /// Pane title shown above the editor.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Markup => "HTML",
            Self::Styles => "CSS",
            Self::Script => "JavaScript",
        }
    }

    /// Language tag shown at the right of the pane header.
    pub fn language(&self) -> &'static str {
        match self {
            Self::Markup => "XML",
            Self::Styles => "CSS",
            Self::Script => "JAVASCRIPT",
        }
    }

    /// Sample text drawn in an empty editor. Never part of the buffer.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Markup => "<!-- Write your HTML here -->\n<div>\n  <h1>Hello World!</h1>\n  <p>This is my first project</p>\n</div>",
            Self::Styles => "/* Write your CSS here */\nbody {\n  font-family: Arial, sans-serif;\n  background: #f0f0f0;\n}\n\nh1 {\n  color: #333;\n  text-align: center;\n}",
            Self::Script => "// Write your JavaScript here\nconsole.log(\"Hello World!\");\n\nfunction greet() {\n  alert(\"Hello from JavaScript!\");\n}\n\n// greet();",
        }
    }
}

/// An owned copy of all three buffers, taken at a single instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSnapshot {
    pub markup: String,
    pub styles: String,
    pub script: String,
}

impl SourceSnapshot {
    pub fn new(markup: impl Into<String>, styles: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            styles: styles.into(),
            script: script.into(),
        }
    }

    pub fn get(&self, kind: BufferKind) -> &str {
        match kind {
            BufferKind::Markup => &self.markup,
            BufferKind::Styles => &self.styles,
            BufferKind::Script => &self.script,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty() && self.styles.is_empty() && self.script.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_distinct() {
        let keys: Vec<_> = BufferKind::ALL.iter().map(|k| k.storage_key()).collect();
        assert_eq!(keys, vec!["code-editor-html", "code-editor-css", "code-editor-js"]);
    }

    #[test]
    fn test_placeholders_open_with_a_comment() {
        assert!(BufferKind::Markup.placeholder().starts_with("<!--"));
        assert!(BufferKind::Styles.placeholder().starts_with("/*"));
        assert!(BufferKind::Script.placeholder().starts_with("//"));
        for kind in BufferKind::ALL {
            assert!(kind.placeholder().lines().count() > 1);
        }
    }

    #[test]
    fn test_snapshot_get() {
        let snap = SourceSnapshot::new("<p>x</p>", "p{}", "1");
        assert_eq!(snap.get(BufferKind::Markup), "<p>x</p>");
        assert_eq!(snap.get(BufferKind::Styles), "p{}");
        assert_eq!(snap.get(BufferKind::Script), "1");
        assert!(!snap.is_empty());
        assert!(SourceSnapshot::default().is_empty());
    }
}
