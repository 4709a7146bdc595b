//! Route path patterns.
//!
//! A pattern is a `/`-separated list of literal segments and `:name`
//! parameters. Empty segments are ignored, so `/about/` and `/about` are the
//! same pattern and match the same paths.

use super::RouteError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if !path.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let mut segments = Vec::new();
        for part in split(path) {
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("empty parameter name")),
                Some(name) => {
                    let taken = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(p) if p == name));
                    if taken {
                        return Err(invalid("duplicate parameter name"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }
        Ok(Self { segments })
    }

    /// True when the pattern has no parameters.
    pub fn is_static(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Normalized form used to detect duplicate registrations.
    pub fn canonical(&self) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|s| match s {
                Segment::Literal(l) => l.clone(),
                Segment::Param(p) => format!(":{}", p),
            })
            .collect();
        format!("/{}", parts.join("/"))
    }

    /// Match a request path, returning captured parameters.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = split(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(l) if l == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_matches_only_root() {
        let root = PathPattern::parse("/").unwrap();
        assert!(root.is_static());
        assert_eq!(root.canonical(), "/");
        assert_eq!(root.matches("/"), Some(BTreeMap::new()));
        assert_eq!(root.matches(""), Some(BTreeMap::new()));
        assert_eq!(root.matches("/about"), None);
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let about = PathPattern::parse("/about/").unwrap();
        assert_eq!(about.canonical(), "/about");
        assert!(about.matches("/about").is_some());
        assert!(about.matches("/about/").is_some());
        assert!(about.matches("/about/team").is_none());
    }

    #[test]
    fn test_params_are_captured() {
        let user = PathPattern::parse("/users/:id/posts/:post").unwrap();
        assert!(!user.is_static());
        let params = user.matches("/users/42/posts/7").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert_eq!(params.get("post").map(String::as_str), Some("7"));
        assert!(user.matches("/users/42/comments/7").is_none());
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            PathPattern::parse("about"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/users/:"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/:id/:id"),
            Err(RouteError::InvalidPattern { .. })
        ));
    }
}
