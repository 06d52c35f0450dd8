//! Route templates.
//!
//! A template such as `/Example/{firstName}/{lastName}` matches a request
//! path segment by segment and yields the [`RouteValues`] the materializer
//! gives highest precedence.

use parmenides_extract::RouteValues;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed path template with `{name}` placeholders.
///
/// Literal segments compare ignoring ASCII case; placeholders capture one
/// whole segment each.
///
/// # Example
///
/// ```
/// use parmenides::RouteTemplate;
///
/// let template = RouteTemplate::parse("/Example/{firstName}/{lastName}");
/// let values = template.match_path("/example/Ada/Lovelace").unwrap();
///
/// assert_eq!(values.get("firstName"), Some("Ada"));
/// assert!(template.match_path("/example/Ada").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    template: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parses a template.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Static(s.to_string()),
            })
            .collect();

        Self {
            template: template.to_string(),
            segments,
        }
    }

    /// Returns the template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Returns the placeholder names in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Matches a request path, returning the captured values.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteValues> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut values = RouteValues::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(literal) if literal.eq_ignore_ascii_case(part) => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => values.push(name.clone(), part),
            }
        }
        Some(values)
    }
}
