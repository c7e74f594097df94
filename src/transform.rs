use crate::template::GoPackageTemplate;
use crate::Result;
use regex::Regex;
use tracing::{debug, warn};

/// Capture groups of the package-name match with `.` already turned into `/`.
/// Group 0 is the whole match; groups that did not participate are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub groups: Vec<String>,
}

impl NameMatch {
    pub fn full(&self) -> &str {
        self.groups.first().map(String::as_str).unwrap_or("")
    }
}

/// Derives the `go_package` value from a package name.
#[derive(Debug, Clone)]
pub struct NameTransformer {
    package_regex: Regex,
    template: GoPackageTemplate,
}

impl NameTransformer {
    pub fn new(package_regex: Regex, template: GoPackageTemplate) -> Self {
        Self {
            package_regex,
            template,
        }
    }

    pub fn from_sources(package_pattern: &str, template: &str) -> Result<Self> {
        let transformer = Self::new(
            Regex::new(package_pattern)?,
            GoPackageTemplate::parse(template)?,
        );
        if transformer.refers_past_groups() {
            warn!(
                "Template {:?} refers to a group {:?} does not capture; every match will fail to render",
                transformer.template.source(),
                transformer.package_regex.as_str()
            );
        }
        Ok(transformer)
    }

    /// Whether the template uses a group index the pattern can never produce.
    pub fn refers_past_groups(&self) -> bool {
        self.template
            .max_group()
            .is_some_and(|index| index >= self.package_regex.captures_len())
    }

    pub fn package_regex(&self) -> &Regex {
        &self.package_regex
    }

    pub fn template(&self) -> &GoPackageTemplate {
        &self.template
    }

    /// Match the raw package name. `None` means the name did not pass the filter.
    pub fn transform(&self, raw_name: &str) -> Option<NameMatch> {
        let captures = self.package_regex.captures(raw_name)?;
        let groups = captures
            .iter()
            .map(|group| {
                group
                    .map(|m| m.as_str().replace('.', "/"))
                    .unwrap_or_default()
            })
            .collect();
        Some(NameMatch { groups })
    }

    /// Transform and render in one step. The rendered value is not escaped.
    pub fn render(&self, raw_name: &str) -> Result<Option<String>> {
        match self.transform(raw_name) {
            Some(name_match) => {
                debug!("Package {:?} matched as {:?}", raw_name, name_match.full());
                Ok(Some(self.template.render(name_match.groups.as_slice())?))
            }
            None => Ok(None),
        }
    }
}
