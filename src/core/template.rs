/// Narrative templates — parsing and rendering against the world state.

use thiserror::Error;

use crate::schema::world::WorldState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed brace")]
    UnclosedBrace,
    #[error("unmatched closing brace")]
    UnmatchedClose,
    #[error("empty braces")]
    EmptyBraces,
    #[error("nested braces are not allowed")]
    NestedBraces,
    #[error("unknown field reference '{0}': expected world.<name|population|resources|culture|impact>")]
    UnknownField(String),
}

/// A world-state field that a template may interpolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldField {
    Name,
    Population,
    Resources,
    Culture,
    Impact,
}

impl WorldField {
    fn parse(content: &str) -> Option<Self> {
        match content.strip_prefix("world.")? {
            "name" => Some(Self::Name),
            "population" => Some(Self::Population),
            "resources" => Some(Self::Resources),
            "culture" => Some(Self::Culture),
            "impact" => Some(Self::Impact),
            _ => None,
        }
    }

    fn render(self, world: &WorldState, out: &mut String) {
        match self {
            Self::Name => out.push_str(&world.name),
            Self::Population => out.push_str(&group_thousands(world.population)),
            Self::Resources => out.push_str(&world.resources),
            Self::Culture => out.push_str(&world.culture),
            Self::Impact => out.push_str(&world.impact.to_string()),
        }
    }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// World field interpolation: `{world.field}`.
    Field(WorldField),
}

/// A parsed template — a sequence of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{world.name}`, `{world.population}`, `{world.resources}`,
    ///   `{world.culture}`, `{world.impact}` → `Field`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' {
                if i + 1 < len && chars[i + 1] == '{' {
                    literal_buf.push('{');
                    i += 2;
                    continue;
                }

                if !literal_buf.is_empty() {
                    segments.push(TemplateSegment::Literal(std::mem::take(&mut literal_buf)));
                }

                let start = i + 1;
                let mut end = start;
                while end < len && chars[end] != '}' {
                    if chars[end] == '{' {
                        return Err(TemplateError::NestedBraces);
                    }
                    end += 1;
                }
                if end == len {
                    return Err(TemplateError::UnclosedBrace);
                }

                let content: String = chars[start..end].iter().collect();
                let content = content.trim();
                if content.is_empty() {
                    return Err(TemplateError::EmptyBraces);
                }
                let field = WorldField::parse(content)
                    .ok_or_else(|| TemplateError::UnknownField(content.to_string()))?;
                segments.push(TemplateSegment::Field(field));
                i = end + 1;
            } else if chars[i] == '}' {
                if i + 1 < len && chars[i + 1] == '}' {
                    literal_buf.push('}');
                    i += 2;
                    continue;
                }
                return Err(TemplateError::UnmatchedClose);
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    /// Render the template with the given world's current values.
    pub fn render(&self, world: &WorldState) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Field(field) => field.render(world, &mut out),
            }
        }
        out
    }

    /// Returns true if the template reads any world field.
    pub fn is_dynamic(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, TemplateSegment::Field(_)))
    }
}

/// Format an integer with comma thousands separators: `12500` → `"12,500"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
