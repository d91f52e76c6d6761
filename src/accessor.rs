use log::{debug, trace};

use crate::{
    errors::PathError,
    options::{MissingPolicy, Options},
    parser::parse,
    path::{ParsedPath, Segment},
    value::{Lookup, Navigable},
};

/// A parsed path bound to a set of evaluation options.
///
/// Parsing happens once, in the constructor. The accessor can then be
/// evaluated against any number of objects, concurrently if need be.
#[derive(Debug, Clone)]
pub struct Accessor {
    path: ParsedPath,
    source: String,
    options: Options,
}

impl Accessor {
    pub fn new(path: &str) -> Result<Self, PathError> {
        Accessor::with_options(path, Options::default())
    }

    pub fn with_options(path: &str, options: Options) -> Result<Self, PathError> {
        let parsed = parse(path)?;
        debug!("built accessor for `{}` with {:?}", path.trim(), options);
        Ok(Accessor {
            path: parsed,
            source: path.trim().to_owned(),
            options,
        })
    }

    pub fn from_parsed(path: ParsedPath, options: Options) -> Self {
        Accessor {
            source: path.to_string(),
            path,
            options,
        }
    }

    pub fn path(&self) -> &ParsedPath {
        &self.path
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Walks this accessor's path through `object`.
    ///
    /// Returns `Ok(None)` when the last segment resolves to nothing, or when
    /// an interior segment does and the policy is
    /// [`MissingPolicy::Passthrough`]. The returned value borrows from
    /// `object`.
    pub fn get_value<'v>(
        &self,
        object: &'v dyn Navigable,
    ) -> Result<Option<&'v dyn Navigable>, PathError> {
        if object.is_nil() {
            return Err(PathError::argument("object is required"));
        }

        let last = self.path.len() - 1;
        let mut value = object;

        for (i, segment) in self.path.iter().enumerate() {
            let step = match segment {
                Segment::Property { name } => resolve_property(value, name),
                Segment::Index { name, index } => resolve_index(value, name.as_deref(), *index),
                Segment::Mapped { name, key } => resolve_mapped(value, name.as_deref(), key),
            };

            trace!("`{}` -> {:?}", segment, step);

            match step {
                Step::Found(next) => value = next,
                Step::Mismatch { expected, found } => {
                    let msg = match segment.name() {
                        Some(name) => format!(
                            "property `{name}` is expected to be {expected}, got `{found}` instead"
                        ),
                        None => format!("value is expected to be {expected}, got `{found}` instead"),
                    };
                    return Err(PathError::typ(msg));
                }
                Step::Absent if i == last => return Ok(None),
                Step::Absent => match self.options.on_missing_intermediate {
                    MissingPolicy::Fail => {
                        return Err(PathError::no_such_property(
                            &segment.to_string(),
                            &self.source,
                        ));
                    }
                    MissingPolicy::Passthrough => {
                        debug!(
                            "`{}` is missing in `{}`, returning nothing",
                            segment, self.source
                        );
                        return Ok(None);
                    }
                },
            }
        }

        Ok(Some(value))
    }
}

/// The outcome of resolving one segment against one value.
enum Step<'v> {
    Found(&'v dyn Navigable),
    Absent,
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl std::fmt::Debug for Step<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Found(value) => write!(f, "Found({})", value.type_name()),
            Step::Absent => f.write_str("Absent"),
            Step::Mismatch { expected, found } => write!(f, "Mismatch({expected}, {found})"),
        }
    }
}

fn found(lookup: Lookup<'_>) -> Step<'_> {
    match lookup {
        Some(value) if !value.is_nil() => Step::Found(value),
        _ => Step::Absent,
    }
}

fn resolve_property<'v>(value: &'v dyn Navigable, name: &str) -> Step<'v> {
    if let Some(mapping) = value.as_mapping() {
        found(mapping.lookup(name))
    } else if let Some(record) = value.as_record() {
        found(record.field(name))
    } else {
        Step::Absent
    }
}

fn resolve_index<'v>(value: &'v dyn Navigable, name: Option<&str>, index: i64) -> Step<'v> {
    let target = match name {
        Some(name) => match resolve_property(value, name) {
            Step::Found(target) => target,
            step => return step,
        },
        None => value,
    };

    match target.as_sequence() {
        Some(sequence) => found(sequence.resolve(index)),
        None => Step::Mismatch {
            expected: "an array-like",
            found: target.type_name(),
        },
    }
}

fn resolve_mapped<'v>(value: &'v dyn Navigable, name: Option<&str>, key: &str) -> Step<'v> {
    let target = match name {
        Some(name) => {
            if value.as_mapping().is_none() {
                let keyed = value
                    .as_record()
                    .and_then(|record| record.keyed_field(name, key));
                if let Some(lookup) = keyed {
                    return found(lookup);
                }
            }

            match resolve_property(value, name) {
                Step::Found(target) => target,
                step => return step,
            }
        }
        None => value,
    };

    match target.as_mapping() {
        Some(mapping) => found(mapping.lookup(key)),
        None => Step::Mismatch {
            expected: "a map-like",
            found: target.type_name(),
        },
    }
}
