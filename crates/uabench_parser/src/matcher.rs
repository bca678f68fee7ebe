//! Compiled rule evaluation.
//!
//! Each rule list compiles to a vector of matchers tried in declaration
//! order; the first regex that matches decides that category. Replacement
//! templates take precedence over their positional capture groups.

use regex::{Captures, Regex, RegexBuilder};

use crate::client::{Browser, Device, OTHER, Os};
use crate::error::RulesError;
use crate::rules::{DeviceRule, OsRule, UserAgentRule};

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex, RulesError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source| RulesError::BadRegex {
            pattern: pattern.to_string(),
            source: Box::new(source),
        })
}

/// Expands `$1`..`$9` in a replacement template from the captures; unmatched
/// groups expand to nothing. Any other `$` is literal.
fn expand(template: &str, caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$'
            && let Some(group) = chars.peek().and_then(|next| next.to_digit(10))
        {
            chars.next();
            if let Some(m) = caps.get(group as usize) {
                out.push_str(m.as_str());
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Resolves one output field: the expanded template when the rule carries a
/// replacement, otherwise the positional capture. Trimmed; empty -> None.
fn field(caps: &Captures<'_>, replacement: Option<&str>, group: usize) -> Option<String> {
    let value = match replacement {
        Some(template) => expand(template, caps),
        None => caps
            .get(group)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn family_or_other(caps: &Captures<'_>, replacement: Option<&str>, group: usize) -> String {
    field(caps, replacement, group).unwrap_or_else(|| OTHER.to_string())
}

#[derive(Debug)]
pub(crate) struct UaMatcher {
    regex: Regex,
    family: Option<String>,
    v1: Option<String>,
    v2: Option<String>,
    v3: Option<String>,
}

impl UaMatcher {
    pub(crate) fn compile(rule: UserAgentRule) -> Result<Self, RulesError> {
        Ok(Self {
            regex: compile(&rule.regex, false)?,
            family: rule.family_replacement,
            v1: rule.v1_replacement,
            v2: rule.v2_replacement,
            v3: rule.v3_replacement,
        })
    }

    pub(crate) fn eval(&self, line: &str) -> Option<Browser> {
        let caps = self.regex.captures(line)?;
        Some(Browser {
            family: family_or_other(&caps, self.family.as_deref(), 1),
            major: field(&caps, self.v1.as_deref(), 2),
            minor: field(&caps, self.v2.as_deref(), 3),
            patch: field(&caps, self.v3.as_deref(), 4),
        })
    }
}

#[derive(Debug)]
pub(crate) struct OsMatcher {
    regex: Regex,
    family: Option<String>,
    v1: Option<String>,
    v2: Option<String>,
    v3: Option<String>,
    v4: Option<String>,
}

impl OsMatcher {
    pub(crate) fn compile(rule: OsRule) -> Result<Self, RulesError> {
        Ok(Self {
            regex: compile(&rule.regex, false)?,
            family: rule.os_replacement,
            v1: rule.os_v1_replacement,
            v2: rule.os_v2_replacement,
            v3: rule.os_v3_replacement,
            v4: rule.os_v4_replacement,
        })
    }

    pub(crate) fn eval(&self, line: &str) -> Option<Os> {
        let caps = self.regex.captures(line)?;
        Some(Os {
            family: family_or_other(&caps, self.family.as_deref(), 1),
            major: field(&caps, self.v1.as_deref(), 2),
            minor: field(&caps, self.v2.as_deref(), 3),
            patch: field(&caps, self.v3.as_deref(), 4),
            patch_minor: field(&caps, self.v4.as_deref(), 5),
        })
    }
}

#[derive(Debug)]
pub(crate) struct DeviceMatcher {
    regex: Regex,
    family: Option<String>,
    brand: Option<String>,
    model: Option<String>,
}

impl DeviceMatcher {
    pub(crate) fn compile(rule: DeviceRule) -> Result<Self, RulesError> {
        let case_insensitive = rule.regex_flag.as_deref() == Some("i");
        Ok(Self {
            regex: compile(&rule.regex, case_insensitive)?,
            family: rule.device_replacement,
            brand: rule.brand_replacement,
            model: rule.model_replacement,
        })
    }

    pub(crate) fn eval(&self, line: &str) -> Option<Device> {
        let caps = self.regex.captures(line)?;
        Some(Device {
            family: family_or_other(&caps, self.family.as_deref(), 1),
            // Brand has no positional fallback in uap-core data.
            brand: self
                .brand
                .as_deref()
                .and_then(|template| field(&caps, Some(template), 0)),
            model: field(&caps, self.model.as_deref(), 1),
        })
    }
}
