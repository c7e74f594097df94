//! Rendering template for the `go_package` value.
//!
//! Supports the subset of Go `text/template` syntax the tool has always
//! accepted for this purpose: literal text plus `{{index . N}}` actions that
//! pull capture group `N` of the package match. `{{N}}` is accepted as a
//! shorthand. Anything else inside `{{ }}` is rejected when the template is
//! parsed, so a bad template fails the run before any file is touched.

use crate::{GoPackageError, Result};
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Group(usize),
}

#[derive(Debug, Clone)]
pub struct GoPackageTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl GoPackageTemplate {
    pub fn parse(source: &str) -> Result<Self> {
        let action_regex = Regex::new(r"\{\{\s*(.*?)\s*\}\}")?;
        let mut segments = Vec::new();
        let mut last_end = 0;

        for captures in action_regex.captures_iter(source) {
            let (Some(whole), Some(action)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            push_literal(&mut segments, &source[last_end..whole.start()])?;
            segments.push(Segment::Group(parse_action(action.as_str())?));
            last_end = whole.end();
        }
        push_literal(&mut segments, &source[last_end..])?;

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Highest group index the template refers to, if any.
    pub fn max_group(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Group(index) => Some(*index),
                Segment::Literal(_) => None,
            })
            .max()
    }

    /// Render against the capture groups, group 0 being the whole match.
    pub fn render<S: AsRef<str>>(&self, groups: &[S]) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Group(index) => {
                    let group = groups.get(*index).ok_or_else(|| {
                        GoPackageError::TemplateRender(format!(
                            "index out of range: {} (match has {} groups)",
                            index,
                            groups.len()
                        ))
                    })?;
                    out.push_str(group.as_ref());
                }
            }
        }
        Ok(out)
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) -> Result<()> {
    if text.contains("{{") {
        return Err(GoPackageError::TemplateParse(format!(
            "unclosed action in {:?}",
            text
        )));
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}

fn parse_action(action: &str) -> Result<usize> {
    let words: Vec<&str> = action.split_whitespace().collect();
    let index = match words.as_slice() {
        ["index", ".", index] => index,
        [index] => index,
        _ => {
            return Err(GoPackageError::TemplateParse(format!(
                "unsupported action {{{{{}}}}}, expected {{{{index . N}}}}",
                action
            )));
        }
    };
    index.parse::<usize>().map_err(|_| {
        GoPackageError::TemplateParse(format!("invalid group index {:?}", index))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let template = GoPackageTemplate::parse("github.com/example/example/{{index . 1}}").unwrap();
        let rendered = template.render(&["foo/bar", "foo/bar"]).unwrap();
        assert_eq!(rendered, "github.com/example/example/foo/bar");
        assert_eq!(template.max_group(), Some(1));
    }

    #[test]
    fn test_shorthand_and_spacing() {
        let template = GoPackageTemplate::parse("{{ 2 }};{{index .   1}}").unwrap();
        assert_eq!(template.render(&["a/b", "a", "b"]).unwrap(), "b;a");
    }

    #[test]
    fn test_literal_only() {
        let template = GoPackageTemplate::parse("fixed/path").unwrap();
        assert_eq!(template.render::<&str>(&[]).unwrap(), "fixed/path");
        assert_eq!(template.max_group(), None);
    }

    #[test]
    fn test_out_of_range_is_render_error() {
        let template = GoPackageTemplate::parse("x/{{index . 3}}").unwrap();
        let err = template.render(&["a", "a"]).unwrap_err();
        assert!(matches!(err, GoPackageError::TemplateRender(_)));
    }

    #[test]
    fn test_unsupported_action_is_parse_error() {
        let err = GoPackageTemplate::parse("{{.Name}}").unwrap_err();
        assert!(matches!(err, GoPackageError::TemplateParse(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unclosed_action_is_parse_error() {
        assert!(GoPackageTemplate::parse("prefix/{{index . 1").is_err());
        assert!(GoPackageTemplate::parse("{{index . x}}").is_err());
    }
}
