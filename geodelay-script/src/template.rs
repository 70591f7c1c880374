/// The template used when none is provided.
///
/// Each host gets a `case` arm matched against the short host name of the machine running the
/// script, so the same file can be shipped to the whole fleet.
pub const DEFAULT_TEMPLATE: &str = r#"# {{ host }} ({{ city }}, {{ address }})
case "$(hostname -s)" in
{{ host }})
    {{ rule }}
    ;;
esac

"#;

/// A template that could not be parsed. Lines are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `{{ ... }}` naming something other than a supported placeholder.
    #[error("line {line}: unknown placeholder `{name}`")]
    UnknownPlaceholder { line: usize, name: String },
    /// A `{{` without a matching `}}` on the same line.
    #[error("line {line}: unterminated placeholder")]
    Unterminated { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Host,
    City,
    Address,
    Rule,
}

impl Placeholder {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "host" => Some(Self::Host),
            "city" => Some(Self::City),
            "address" => Some(Self::Address),
            "rule" => Some(Self::Rule),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(Placeholder),
}

/// A template line. Lines containing `{{ rule }}` are repeated once per rule.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    segments: Vec<Segment>,
    per_rule: bool,
}

/// The values a single host block is rendered with.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    /// Short host name.
    pub host: &'a str,
    pub city: &'a str,
    pub address: &'a str,
    pub rules: &'a [String],
}

/// A parsed per-host block template.
///
/// Supported placeholders are `{{ host }}`, `{{ city }}`, `{{ address }}` and `{{ rule }}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    lines: Vec<Line>,
}

impl Default for Template {
    /// The [`DEFAULT_TEMPLATE`].
    ///
    /// It only uses supported, terminated placeholders, so parsing it cannot fail.
    fn default() -> Self {
        Self::parse(DEFAULT_TEMPLATE).expect("default template is valid")
    }
}

impl Template {
    /// Parses `source`, failing on unknown or unterminated placeholders.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let lines = source
            .split_inclusive('\n')
            .enumerate()
            .map(|(index, line)| parse_line(line, index + 1))
            .collect::<Result<_, _>>()?;

        Ok(Self { lines })
    }

    /// Renders one host block.
    pub fn render(&self, block: &Block<'_>) -> String {
        let mut out = String::new();

        for line in &self.lines {
            if line.per_rule {
                for rule in block.rules {
                    render_line(&mut out, line, block, rule);
                }
            } else {
                render_line(&mut out, line, block, "");
            }
        }

        out
    }
}

fn render_line(out: &mut String, line: &Line, block: &Block<'_>, rule: &str) {
    for segment in &line.segments {
        let value = match segment {
            Segment::Text(text) => text.as_str(),
            Segment::Placeholder(Placeholder::Host) => block.host,
            Segment::Placeholder(Placeholder::City) => block.city,
            Segment::Placeholder(Placeholder::Address) => block.address,
            Segment::Placeholder(Placeholder::Rule) => rule,
        };
        out.push_str(value);
    }
}

fn parse_line(mut rest: &str, line: usize) -> Result<Line, TemplateError> {
    let mut segments = Vec::new();
    let mut per_rule = false;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            segments.push(Segment::Text(rest[..start].to_string()));
        }

        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or(TemplateError::Unterminated { line })?;
        let name = after[..end].trim();

        let placeholder = Placeholder::parse(name)
            .ok_or_else(|| TemplateError::UnknownPlaceholder { line, name: name.to_string() })?;
        per_rule |= placeholder == Placeholder::Rule;
        segments.push(Segment::Placeholder(placeholder));

        rest = &after[end + 2..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }

    Ok(Line { segments, per_rule })
}
