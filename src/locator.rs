//! Shallow scanner for `package` directives and `option` statements.
//!
//! This is deliberately not a grammar for the schema language. Two fixed
//! regular expressions find the spans the rewriter needs; comments, string
//! escapes other than `\"` and multi-line option values are not understood.
//! Scanning works on raw bytes, so content need not be valid UTF-8.

use regex::bytes::Regex;
use std::ops::Range;

/// First `package <name>;` statement of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDirective {
    /// Whole directive, from `package` through the terminating `;`.
    pub span: Range<usize>,
    /// Raw name bytes between the keyword and `;`, untrimmed on the right.
    pub name: Range<usize>,
}

impl PackageDirective {
    pub fn name<'a>(&self, content: &'a [u8]) -> &'a [u8] {
        &content[self.name.clone()]
    }
}

/// A single-line `option <name> = "<value>";` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionStatement {
    /// Whole statement including its leading indent.
    pub span: Range<usize>,
    /// Horizontal whitespace preceding `option` on the same line.
    pub indent: Range<usize>,
    pub name: Range<usize>,
    /// Inner value, between the quotes.
    pub value: Range<usize>,
}

impl OptionStatement {
    pub fn name<'a>(&self, content: &'a [u8]) -> &'a [u8] {
        &content[self.name.clone()]
    }

    pub fn indent<'a>(&self, content: &'a [u8]) -> &'a [u8] {
        &content[self.indent.clone()]
    }

    pub fn value<'a>(&self, content: &'a [u8]) -> &'a [u8] {
        &content[self.value.clone()]
    }
}

/// Compiled scanners for one run.
#[derive(Debug, Clone)]
pub struct Locator {
    package_regex: Regex,
    option_regex: Regex,
}

impl Locator {
    pub fn new() -> Self {
        Self {
            // Names and values may hold arbitrary bytes
            package_regex: Regex::new(r"\bpackage\s+((?-u:.)*?);").unwrap(),
            option_regex: Regex::new(
                r#"([ \t]*)\boption\s+(\S+)\s*=\s*"((?-u:[^"\\]|\\.)*)"\s*;"#,
            )
            .unwrap(),
        }
    }

    /// Locate the first package directive; later ones are ignored.
    pub fn locate_package(&self, content: &[u8]) -> Option<PackageDirective> {
        let captures = self.package_regex.captures(content)?;
        let whole = captures.get(0)?;
        let name = captures.get(1)?;
        Some(PackageDirective {
            span: whole.range(),
            name: name.range(),
        })
    }

    /// Locate every option statement in textual order.
    pub fn locate_options(&self, content: &[u8]) -> Vec<OptionStatement> {
        self.option_regex
            .captures_iter(content)
            .filter_map(|captures| {
                Some(OptionStatement {
                    span: captures.get(0)?.range(),
                    indent: captures.get(1)?.range(),
                    name: captures.get(2)?.range(),
                    value: captures.get(3)?.range(),
                })
            })
            .collect()
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::new()
    }
}

/// Last option named `name`, in textual order.
pub fn find_option<'a>(
    content: &[u8],
    options: &'a [OptionStatement],
    name: &str,
) -> Option<&'a OptionStatement> {
    options
        .iter()
        .rev()
        .find(|option| option.name(content) == name.as_bytes())
}
