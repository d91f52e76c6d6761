use serde::{Deserialize, Serialize};

/// What to do when a segment in the middle of a path resolves to nothing.
///
/// A missing value at the end of a path is never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Raise a `NoSuchProperty` error naming the offending segment.
    #[default]
    Fail,
    /// Stop walking and return `None`.
    Passthrough,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub on_missing_intermediate: MissingPolicy,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self::new().on_missing_intermediate(MissingPolicy::Fail)
    }

    pub fn lenient() -> Self {
        Self::new().on_missing_intermediate(MissingPolicy::Passthrough)
    }

    pub fn on_missing_intermediate(mut self, policy: MissingPolicy) -> Self {
        self.on_missing_intermediate = policy;
        self
    }
}
