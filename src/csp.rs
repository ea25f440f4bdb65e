//! Content-Security-Policy header value builder.
//!
//! Only formats the header. Source tokens are emitted exactly as given.

use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Name of the HTTP header the generated value belongs in.
pub const HEADER_NAME: &str = "Content-Security-Policy";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CspError {
    #[error("Unknown CSP directive: {0}")]
    UnknownDirective(String),
}

/// Recognised CSP directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CspDirective {
    DefaultSrc,
    ScriptSrc,
    StyleSrc,
    ImgSrc,
    ConnectSrc,
    FontSrc,
    ObjectSrc,
    MediaSrc,
    FrameSrc,
    Sandbox,
    ReportUri,
    ChildSrc,
    FormAction,
    FrameAncestors,
    PluginTypes,
    BaseUri,
    ReportTo,
    WorkerSrc,
}

impl CspDirective {
    pub const ALL: [CspDirective; 18] = [
        CspDirective::DefaultSrc,
        CspDirective::ScriptSrc,
        CspDirective::StyleSrc,
        CspDirective::ImgSrc,
        CspDirective::ConnectSrc,
        CspDirective::FontSrc,
        CspDirective::ObjectSrc,
        CspDirective::MediaSrc,
        CspDirective::FrameSrc,
        CspDirective::Sandbox,
        CspDirective::ReportUri,
        CspDirective::ChildSrc,
        CspDirective::FormAction,
        CspDirective::FrameAncestors,
        CspDirective::PluginTypes,
        CspDirective::BaseUri,
        CspDirective::ReportTo,
        CspDirective::WorkerSrc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CspDirective::DefaultSrc => "default-src",
            CspDirective::ScriptSrc => "script-src",
            CspDirective::StyleSrc => "style-src",
            CspDirective::ImgSrc => "img-src",
            CspDirective::ConnectSrc => "connect-src",
            CspDirective::FontSrc => "font-src",
            CspDirective::ObjectSrc => "object-src",
            CspDirective::MediaSrc => "media-src",
            CspDirective::FrameSrc => "frame-src",
            CspDirective::Sandbox => "sandbox",
            CspDirective::ReportUri => "report-uri",
            CspDirective::ChildSrc => "child-src",
            CspDirective::FormAction => "form-action",
            CspDirective::FrameAncestors => "frame-ancestors",
            CspDirective::PluginTypes => "plugin-types",
            CspDirective::BaseUri => "base-uri",
            CspDirective::ReportTo => "report-to",
            CspDirective::WorkerSrc => "worker-src",
        }
    }
}

impl fmt::Display for CspDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CspDirective {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CspDirective::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CspError::UnknownDirective(s.to_string()))
    }
}

/// Directives and their sources, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspConfig {
    directives: Vec<(CspDirective, Vec<String>)>,
}

impl CspConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sources of `directive`. A directive that is already present
    /// keeps its position and has its sources replaced.
    pub fn insert<I, S>(&mut self, directive: CspDirective, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        match self.directives.iter_mut().find(|(d, _)| *d == directive) {
            Some((_, existing)) => *existing = sources,
            None => self.directives.push((directive, sources)),
        }
        self
    }

    /// Builder-style [`CspConfig::insert`].
    pub fn with<I, S>(mut self, directive: CspDirective, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(directive, sources);
        self
    }

    pub fn get(&self, directive: CspDirective) -> Option<&[String]> {
        self.directives
            .iter()
            .find(|(d, _)| *d == directive)
            .map(|(_, sources)| sources.as_slice())
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CspDirective, &[String])> {
        self.directives.iter().map(|(d, s)| (*d, s.as_slice()))
    }
}

impl fmt::Display for CspConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (directive, sources)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", directive, sources.join(" "))?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for CspConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = CspConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of CSP directives to source lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<CspConfig, A::Error> {
                let mut config = CspConfig::new();
                while let Some((directive, sources)) =
                    map.next_entry::<CspDirective, Vec<String>>()?
                {
                    config.insert(directive, sources);
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(ConfigVisitor)
    }
}

/// Formats `config` as a CSP header value:
/// `"<directive> <source> <source>; <directive> ..."`.
///
/// A directive with no sources still gets its separating space.
pub fn generator(config: &CspConfig) -> String {
    config.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_joins_directives() {
        let config = CspConfig::new()
            .with(CspDirective::DefaultSrc, ["'self'"])
            .with(CspDirective::ScriptSrc, ["'self'", "example.com"]);
        assert_eq!(
            generator(&config),
            "default-src 'self'; script-src 'self' example.com"
        );
    }

    #[test]
    fn test_generator_keeps_insertion_order() {
        let config = CspConfig::new()
            .with(CspDirective::ImgSrc, ["*"])
            .with(CspDirective::DefaultSrc, ["'none'"]);
        assert_eq!(generator(&config), "img-src *; default-src 'none'");
    }

    #[test]
    fn test_generator_empty_sources_keeps_trailing_space() {
        let config = CspConfig::new()
            .with(CspDirective::Sandbox, Vec::<String>::new())
            .with(CspDirective::ObjectSrc, ["'none'"]);
        assert_eq!(generator(&config), "sandbox ; object-src 'none'");

        let only = CspConfig::new().with(CspDirective::Sandbox, Vec::<String>::new());
        assert_eq!(generator(&only), "sandbox ");
    }

    #[test]
    fn test_generator_empty_config() {
        assert_eq!(generator(&CspConfig::new()), "");
    }

    #[test]
    fn test_generator_does_not_deduplicate_sources() {
        let config = CspConfig::new().with(CspDirective::StyleSrc, ["a.com", "a.com"]);
        assert_eq!(generator(&config), "style-src a.com a.com");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut config = CspConfig::new();
        config
            .insert(CspDirective::DefaultSrc, ["'self'"])
            .insert(CspDirective::ScriptSrc, ["'self'"])
            .insert(CspDirective::DefaultSrc, ["'none'"]);
        assert_eq!(config.len(), 2);
        assert_eq!(
            config.get(CspDirective::DefaultSrc),
            Some(&["'none'".to_string()][..])
        );
        assert_eq!(generator(&config), "default-src 'none'; script-src 'self'");
    }

    #[test]
    fn test_directive_from_str() {
        assert_eq!("frame-ancestors".parse(), Ok(CspDirective::FrameAncestors));
        for directive in CspDirective::ALL {
            assert_eq!(directive.as_str().parse(), Ok(directive));
        }
        assert_eq!(
            "upgrade-insecure-requests".parse::<CspDirective>(),
            Err(CspError::UnknownDirective("upgrade-insecure-requests".to_string()))
        );
    }

    #[test]
    fn test_deserialize_preserves_key_order() {
        let config: CspConfig = serde_json::from_str(
            r#"{"script-src": ["'self'", "cdn.example.com"], "default-src": ["'self'"]}"#,
        )
        .unwrap();
        assert_eq!(
            generator(&config),
            "script-src 'self' cdn.example.com; default-src 'self'"
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_directive() {
        let result = serde_json::from_str::<CspConfig>(r#"{"bogus-src": ["'self'"]}"#);
        assert!(result.is_err());
    }
}
