//! Named-placeholder templates.
//!
//! Templates use Jinja2 expression delimiters, `{{ name }}`, and nothing
//! else: there are no statements, filters or loops. A placeholder whose name
//! is not bound renders as the empty string, as Jinja2's default undefined
//! value does.

use {
    crate::{compiler::FragmentMap, EccError, Result},
    std::{
        fs,
        path::{Path, PathBuf},
    },
    tracing::warn,
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

#[derive(Debug, Clone)]
pub struct Template {
    path: PathBuf,
    segments: Vec<Segment>,
}

impl Template {
    pub fn read(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| EccError::io(path, e))?;
        Self::parse(&source, path)
    }

    /// Split `source` into literal text and placeholders. `path` is used for
    /// error reporting.
    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        // A single trailing newline belongs to the file, not the document.
        let source = source
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(source);

        let error = |offset: usize, detail: String| EccError::Template {
            path: path.to_path_buf(),
            line: source[..offset].matches('\n').count() + 1,
            detail,
        };

        let mut segments = Vec::new();
        let mut rest = 0;
        while let Some(found) = source[rest..].find(OPEN) {
            let open = rest + found;
            let inner_start = open + OPEN.len();
            let Some(len) = source[inner_start..].find(CLOSE) else {
                return Err(error(open, "unterminated '{{' placeholder".to_string()));
            };
            let name = source[inner_start..inner_start + len].trim();
            if !is_identifier(name) {
                return Err(error(
                    open,
                    format!("placeholder '{name}' is not a plain identifier"),
                ));
            }

            if open > rest {
                segments.push(Segment::Text(source[rest..open].to_string()));
            }
            segments.push(Segment::Placeholder(name.to_string()));
            rest = inner_start + len + CLOSE.len();
        }
        if rest < source.len() {
            segments.push(Segment::Text(source[rest..].to_string()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            segments,
        })
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Substitute every placeholder and terminate the document with one newline.
    pub fn render(&self, fragments: &FragmentMap) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(name) => match fragments.get(name) {
                    Some(fragment) => out.push_str(fragment),
                    None => {
                        warn!(template = %self.path.display(), %name, "unbound placeholder")
                    }
                },
            }
        }
        out.push('\n');
        out
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
