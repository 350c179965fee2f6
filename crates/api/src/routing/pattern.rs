//! Path patterns with `{name}` placeholders.
//!
//! A pattern is split on `/` into literal and placeholder segments. A path
//! matches when it has the same number of segments and every literal segment
//! is equal; each placeholder captures one non-empty segment.

use std::cmp::Ordering;

/// Rejected at registration time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),
    #[error("pattern {pattern:?} has an empty segment at position {index}")]
    EmptySegment { pattern: String, index: usize },
    #[error("pattern {pattern:?} has a malformed placeholder {segment:?}")]
    MalformedPlaceholder { pattern: String, segment: String },
    #[error("pattern {pattern:?} repeats placeholder {name:?}")]
    DuplicatePlaceholder { pattern: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern such as `/locations/{locationID}/assets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(raw.to_string()))?;

        let mut segments = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        for (index, part) in split_segments(rest).enumerate() {
            if part.is_empty() {
                return Err(PatternError::EmptySegment {
                    pattern: raw.to_string(),
                    index,
                });
            }

            let opens = part.contains('{');
            let closes = part.contains('}');
            if !opens && !closes {
                segments.push(Segment::Literal(part.to_string()));
                continue;
            }

            let name = part
                .strip_prefix('{')
                .and_then(|p| p.strip_suffix('}'))
                .filter(|n| !n.is_empty() && !n.contains(['{', '}']))
                .ok_or_else(|| PatternError::MalformedPlaceholder {
                    pattern: raw.to_string(),
                    segment: part.to_string(),
                })?;
            if names.contains(&name) {
                return Err(PatternError::DuplicatePlaceholder {
                    pattern: raw.to_string(),
                    name: name.to_string(),
                });
            }
            names.push(name);
            segments.push(Segment::Param(name.to_string()));
        }

        Ok(Self { segments })
    }

    /// Match `path` against this pattern, returning the captured
    /// placeholder values on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let rest = path.strip_prefix('/')?;
        let mut params = PathParams::default();
        let mut parts = split_segments(rest);

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => params.0.push((name.clone(), part.to_string())),
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// Orders two patterns that both match the same path: at the first
    /// position where they differ, a literal segment beats a placeholder.
    pub fn specificity_cmp(&self, other: &Self) -> Ordering {
        let rank = |s: &Segment| match s {
            Segment::Literal(_) => 1u8,
            Segment::Param(_) => 0u8,
        };
        self.segments
            .iter()
            .map(rank)
            .cmp(other.segments.iter().map(rank))
    }
}

/// `"/"` has no segments; otherwise split on `/`.
fn split_segments(rest: &str) -> impl Iterator<Item = &str> {
    let parts = if rest.is_empty() { None } else { Some(rest.split('/')) };
    parts.into_iter().flatten()
}

/// Placeholder values captured for the matched route, attached to the
/// request extensions by the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
