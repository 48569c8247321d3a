//! Log line templates
//!
//! A template is literal text with `{Field}` placeholders. A placeholder may
//! carry a padding spec after a colon, using the same shape as Rust format
//! strings: `[[fill]align][width]`, where `align` is `<`, `>` or `^` and
//! `width` is at most 65535.
//! `{{` and `}}` produce literal braces.
//!
//! ```
//! use loggo::core::{RenderData, Template};
//!
//! let template = Template::compile("[{Level:>5}] {Message}").unwrap();
//! let data = RenderData {
//!     level: "INFO",
//!     time: String::new(),
//!     message: "ready".to_string(),
//!     caller: "unknown".to_string(),
//! };
//! assert_eq!(template.execute(&data).unwrap(), "[ INFO] ready");
//! ```
//!
//! Compilation checks syntax only. Field names are resolved when the
//! template is executed, so a template naming a field the render data does
//! not expose compiles fine and fails on every execution.

use super::render_data::RenderData;

/// Template compile or execute failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unclosed placeholder opened at offset {offset}")]
    Unclosed { offset: usize },

    #[error("unmatched '}}' at offset {offset}")]
    UnmatchedClose { offset: usize },

    #[error("empty placeholder at offset {offset}")]
    EmptyPlaceholder { offset: usize },

    #[error("invalid field name '{name}' at offset {offset}")]
    InvalidName { name: String, offset: usize },

    #[error("invalid format spec '{spec}' for field '{name}'")]
    InvalidSpec { name: String, spec: String },

    #[error("unknown field '{name}' in render data")]
    UnknownField { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Padding {
    fill: char,
    align: Align,
    width: usize,
}

impl Padding {
    fn parse(name: &str, spec: &str) -> Result<Option<Self>, TemplateError> {
        if spec.is_empty() {
            return Ok(None);
        }

        let invalid = || TemplateError::InvalidSpec {
            name: name.to_string(),
            spec: spec.to_string(),
        };

        let chars: Vec<char> = spec.chars().collect();
        let (fill, align, rest) = match chars.as_slice() {
            [fill, a, rest @ ..] if align_of(*a).is_some() => (*fill, align_of(*a), rest),
            [a, rest @ ..] if align_of(*a).is_some() => (' ', align_of(*a), rest),
            rest => (' ', None, rest),
        };

        if rest.is_empty() || !rest.iter().all(char::is_ascii_digit) {
            return Err(invalid());
        }
        // Capped like Rust format widths; larger values are rejected
        let width = rest
            .iter()
            .collect::<String>()
            .parse::<u16>()
            .map(usize::from)
            .map_err(|_| invalid())?;

        Ok(Some(Self {
            fill,
            align: align.unwrap_or(Align::Left),
            width,
        }))
    }

    fn apply(&self, value: &str, out: &mut String) {
        let len = value.chars().count();
        let gap = self.width.saturating_sub(len);
        let (before, after) = match self.align {
            Align::Left => (0, gap),
            Align::Right => (gap, 0),
            Align::Center => (gap / 2, gap - gap / 2),
        };
        out.extend(std::iter::repeat(self.fill).take(before));
        out.push_str(value);
        out.extend(std::iter::repeat(self.fill).take(after));
    }
}

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        name: String,
        padding: Option<Padding>,
    },
}

/// A compiled template, ready to be executed against [`RenderData`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source` into a template
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::UnmatchedClose { offset }),
                '{' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(TemplateError::Unclosed { offset }),
                            c => body.push(c),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed { offset });
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Self::parse_field(&body, offset)?);
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    fn parse_field(body: &str, offset: usize) -> Result<Segment, TemplateError> {
        let (name, spec) = match body.split_once(':') {
            Some((name, spec)) => (name.trim(), spec),
            None => (body.trim(), ""),
        };

        if name.is_empty() {
            return Err(TemplateError::EmptyPlaceholder { offset });
        }
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(TemplateError::InvalidName {
                name: name.to_string(),
                offset,
            });
        }

        Ok(Segment::Field {
            name: name.to_string(),
            padding: Padding::parse(name, spec)?,
        })
    }

    /// Render this template with `data`
    pub fn execute(&self, data: &RenderData) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(data.message.len() + 64);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { name, padding } => {
                    let value = data
                        .field(name)
                        .ok_or_else(|| TemplateError::UnknownField { name: name.clone() })?;
                    match padding {
                        Some(padding) => padding.apply(value, &mut out),
                        None => out.push_str(value),
                    }
                }
            }
        }

        Ok(out)
    }

    /// Names of the fields referenced by this template, in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}
