use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::error::LookupError;

/// Delimiter between segments of a textual key path (`encoder/z`).
pub const KEY_DELIMITER: char = '/';

/// A nested-lookup address into the output namespace.
///
/// The first segment names a root entry (a node name, `inputs`, `out`, or a
/// flat input alias); each further segment descends one level into a nested
/// mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    segments: Vec<CompactString>,
}

impl KeyPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::<CompactString>::into)
                .collect(),
        }
    }

    /// Parse a `/`-delimited key. Empty segments are kept: `a//b` and `a/`
    /// carry an empty segment that no mapping resolves.
    pub fn parse_str(key: &str) -> Self {
        Self::new(key.split(KEY_DELIMITER))
    }

    /// Accept either a delimited string or an array of segment strings.
    pub fn parse_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::parse_str(s)),
            Value::Array(arr) => {
                let mut parts = Vec::with_capacity(arr.len());
                for v in arr {
                    parts.push(v.as_str()?.to_string());
                }
                Some(Self::new(parts))
            }
            _ => None,
        }
    }

    pub fn segments(&self) -> &[CompactString] {
        &self.segments
    }

    pub fn head(&self) -> Option<&str> {
        self.segments.first().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment, returning the extended path.
    pub fn child(&self, segment: impl Into<CompactString>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self::new(segments)
    }

    pub(crate) fn miss(&self, segment: &str) -> LookupError {
        LookupError {
            key: self.to_string(),
            segment: segment.to_string(),
        }
    }

    /// Walk the segments after the head through nested mappings starting at
    /// `root`, which is the value the head segment resolved to.
    pub fn descend<'a>(&self, root: &'a Value) -> Result<&'a Value, LookupError> {
        let mut current = root;
        for segment in self.segments.iter().skip(1) {
            current = current
                .as_object()
                .and_then(|map| map.get(segment.as_str()))
                .ok_or_else(|| self.miss(segment))?;
        }
        Ok(current)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", KEY_DELIMITER)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    fn from(value: &str) -> Self {
        Self::parse_str(value)
    }
}

impl From<String> for KeyPath {
    fn from(value: String) -> Self {
        Self::parse_str(&value)
    }
}

impl Serialize for KeyPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyPathVisitor;

        impl<'de> serde::de::Visitor<'de> for KeyPathVisitor {
            type Value = KeyPath;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("key path string like 'node/key' or string array")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(KeyPath::parse_str(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut parts = Vec::new();
                while let Some(value) = seq.next_element::<String>()? {
                    parts.push(value);
                }
                Ok(KeyPath::new(parts))
            }
        }

        deserializer.deserialize_any(KeyPathVisitor)
    }
}
