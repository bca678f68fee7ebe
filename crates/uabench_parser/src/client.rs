use std::fmt;

/// Fully resolved parse result for one user agent line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Client {
    pub browser: Browser,
    pub os: Os,
    pub device: Device,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Browser {
    pub family: String,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Os {
    pub family: String,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
    pub patch_minor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub family: String,
    pub brand: Option<String>,
    pub model: Option<String>,
}

pub(crate) const OTHER: &str = "Other";

impl Default for Browser {
    fn default() -> Self {
        Self {
            family: OTHER.to_string(),
            major: None,
            minor: None,
            patch: None,
        }
    }
}

impl Default for Os {
    fn default() -> Self {
        Self {
            family: OTHER.to_string(),
            major: None,
            minor: None,
            patch: None,
            patch_minor: None,
        }
    }
}

impl Default for Device {
    fn default() -> Self {
        Self {
            family: OTHER.to_string(),
            brand: None,
            model: None,
        }
    }
}

/// Joins leading present version segments with dots, stopping at the first
/// missing one, e.g. `12.0` when major/minor are known but patch is not.
fn write_version(f: &mut fmt::Formatter<'_>, segments: &[&Option<String>]) -> fmt::Result {
    let mut first = true;
    for segment in segments {
        let Some(segment) = segment else { break };
        f.write_str(if first { " " } else { "." })?;
        f.write_str(segment)?;
        first = false;
    }
    Ok(())
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.family)?;
        write_version(f, &[&self.major, &self.minor, &self.patch])
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.family)?;
        write_version(f, &[&self.major, &self.minor, &self.patch, &self.patch_minor])
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.family)
    }
}

/// The one-line rendering the benchmark echoes per parse.
impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.browser, self.os, self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_renders_other_everywhere() {
        assert_eq!(Client::default().to_string(), "Other/Other/Other");
    }

    #[test]
    fn version_stops_at_first_missing_segment() {
        let browser = Browser {
            family: "Firefox".into(),
            major: Some("121".into()),
            minor: None,
            patch: Some("2".into()),
        };
        assert_eq!(browser.to_string(), "Firefox 121");
    }

    #[test]
    fn full_rendering() {
        let client = Client {
            browser: Browser {
                family: "Chrome".into(),
                major: Some("120".into()),
                minor: Some("0".into()),
                patch: Some("6099".into()),
            },
            os: Os {
                family: "Mac OS X".into(),
                major: Some("10".into()),
                minor: Some("15".into()),
                patch: None,
                patch_minor: None,
            },
            device: Device {
                family: "Mac".into(),
                brand: Some("Apple".into()),
                model: Some("Mac".into()),
            },
        };
        assert_eq!(client.to_string(), "Chrome 120.0.6099/Mac OS X 10.15/Mac");
    }
}
