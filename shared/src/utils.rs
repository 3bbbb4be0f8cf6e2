// Style paths: the address of a leaf inside a theme tree.
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Ordered property names leading from a theme root to a leaf,
/// written in dotted form as `plot.bar.candle.upCandle.fill`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct StylePath {
    segments: Vec<String>,
}

impl StylePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the dotted form. Empty segments (`a..b`, leading dots) are dropped;
    /// whitespace is kept, since it is part of the property name.
    pub fn parse(dotted: &str) -> Self {
        Self::from_segments(dotted.split('.'))
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + Clone {
        self.segments.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// A new path one segment deeper.
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(Self::parse(segment).segments);
        Self { segments }
    }

    /// Every proper prefix, shortest first (`a`, `a.b` for `a.b.c`).
    pub fn ancestors(&self) -> impl Iterator<Item = StylePath> + '_ {
        (1..self.segments.len()).map(move |n| StylePath {
            segments: self.segments[..n].to_vec(),
        })
    }
}

impl fmt::Display for StylePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for StylePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for StylePath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for StylePath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl<S: AsRef<str>> From<&[S]> for StylePath {
    fn from(segments: &[S]) -> Self {
        Self::from_segments(segments)
    }
}

impl From<StylePath> for String {
    fn from(path: StylePath) -> Self {
        path.to_string()
    }
}
