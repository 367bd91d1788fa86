//! Lenient, path-based access to a smartctl JSON report.
//!
//! smartctl output varies by device class, firmware and smartctl release, so
//! every read goes through [`ReportNode`], which treats a missing path as an
//! absent node rather than an error and coerces mismatched shapes to the
//! type's zero value.

use serde_json::Value;

use crate::error::Result;

/// One parsed smartctl report for a single device.
#[derive(Debug, Clone)]
pub struct DeviceReport {
    value: Value,
}

impl DeviceReport {
    /// Parse raw smartctl stdout.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            value: serde_json::from_slice(bytes)?,
        })
    }

    /// Parse a report held in a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        Ok(Self {
            value: serde_json::from_str(s)?,
        })
    }

    /// Wrap an already parsed document.
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// Root node of the report tree.
    pub fn root(&self) -> ReportNode<'_> {
        ReportNode::new(&self.value)
    }
}

/// A possibly-absent position inside a report tree.
#[derive(Debug, Clone, Copy)]
pub struct ReportNode<'a> {
    value: Option<&'a Value>,
}

impl<'a> ReportNode<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    fn absent() -> Self {
        Self { value: None }
    }

    /// Walk a dot-separated path. Object keys are matched by name and numeric
    /// segments index into arrays. Never fails; a miss yields an absent node.
    pub fn get(&self, path: &str) -> ReportNode<'a> {
        let mut current = match self.value {
            Some(v) => v,
            None => return Self::absent(),
        };
        for segment in path.split('.') {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(v) => current = v,
                None => return Self::absent(),
            }
        }
        Self::new(current)
    }

    /// Like [`get`](Self::get) but returns `None` for a missing path.
    pub fn lookup(&self, path: &str) -> Option<ReportNode<'a>> {
        let node = self.get(path);
        node.exists().then_some(node)
    }

    /// True when the node is present in the document. An explicit JSON `null`
    /// counts as absent.
    pub fn exists(&self) -> bool {
        matches!(self.value, Some(v) if !v.is_null())
    }

    /// Numeric value, or 0 when absent or not coercible.
    pub fn as_f64(&self) -> f64 {
        self.as_f64_or(0.0)
    }

    pub fn as_f64_or(&self, default: f64) -> f64 {
        match self.value {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::Bool(b)) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            Some(Value::Null) | None => default,
            Some(_) => 0.0,
        }
    }

    /// Text value, or an empty string when absent.
    pub fn as_str(&self) -> String {
        self.as_str_or("")
    }

    pub fn as_str_or(&self, default: &str) -> String {
        match self.value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Null) | None => default.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Truthiness with the same lenience as the numeric accessors.
    pub fn as_bool(&self) -> bool {
        match self.value {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s == "1"
            }
            _ => false,
        }
    }

    /// Elements of an array node; empty for anything else.
    pub fn array(&self) -> Vec<ReportNode<'a>> {
        match self.value {
            Some(Value::Array(items)) => items.iter().map(ReportNode::new).collect(),
            _ => Vec::new(),
        }
    }

    /// Children of an object node in document order; empty for anything else.
    pub fn entries(&self) -> Vec<(&'a str, ReportNode<'a>)> {
        match self.value {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (k.as_str(), ReportNode::new(v)))
                .collect(),
            _ => Vec::new(),
        }
    }
}
