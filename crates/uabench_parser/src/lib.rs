//! Rule-set driven user agent parser, the workload under benchmark.
//!
//! Implements the uap-core subset the benchmark needs: the three rule lists
//! of a `regexes.yaml`, first-match-wins evaluation, and replacement
//! templates. Construction happens once, outside any timed region; `parse`
//! is synchronous, infallible, and side-effect-free.

pub mod client;
pub mod error;
mod matcher;
pub mod rules;

use std::fs;
use std::path::Path;

pub use crate::client::{Browser, Client, Device, Os};
pub use crate::error::RulesError;
pub use crate::rules::RuleSet;

use crate::matcher::{DeviceMatcher, OsMatcher, UaMatcher};

#[derive(Debug)]
pub struct UserAgentParser {
    ua: Vec<UaMatcher>,
    os: Vec<OsMatcher>,
    device: Vec<DeviceMatcher>,
}

impl UserAgentParser {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, RulesError> {
        Self::from_rules(serde_yaml::from_str(text)?)
    }

    pub fn from_rules(rules: RuleSet) -> Result<Self, RulesError> {
        Ok(Self {
            ua: rules
                .user_agent_parsers
                .into_iter()
                .map(UaMatcher::compile)
                .collect::<Result<_, _>>()?,
            os: rules
                .os_parsers
                .into_iter()
                .map(OsMatcher::compile)
                .collect::<Result<_, _>>()?,
            device: rules
                .device_parsers
                .into_iter()
                .map(DeviceMatcher::compile)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Parses one user agent line. Categories that no rule matches come back
    /// as their `Other` defaults.
    pub fn parse(&self, line: &str) -> Client {
        Client {
            browser: self
                .ua
                .iter()
                .find_map(|m| m.eval(line))
                .unwrap_or_default(),
            os: self
                .os
                .iter()
                .find_map(|m| m.eval(line))
                .unwrap_or_default(),
            device: self
                .device
                .iter()
                .find_map(|m| m.eval(line))
                .unwrap_or_default(),
        }
    }
}
