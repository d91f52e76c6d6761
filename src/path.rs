use std::{
    fmt::{self, Write},
    slice::Iter,
    str::FromStr,
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::PathError, parser::parse};

lazy_static! {
    static ref NAME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9?!_]*$").unwrap();
}

/// Returns `true` if `name` can be used as a property name in a path.
pub fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// A parsed property path.
///
/// A `ParsedPath` is never empty and never changes after it has been built,
/// so one value can be evaluated against any number of objects, from any
/// number of threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedPath {
    segments: Vec<Segment>,
}

impl ParsedPath {
    /// Builds a path from hand-made segments, checking the same invariants
    /// the parser guarantees.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::argument("a path needs at least one segment"));
        }

        let mut previous: Option<&Segment> = None;
        for segment in segments.iter() {
            match segment.name() {
                Some(name) if !is_valid_name(name) => {
                    return Err(PathError::argument(format!(
                        "`{name}` is not a valid property name"
                    )));
                }
                None if previous.is_some_and(|p| p.kind() == SegmentKind::Property) => {
                    return Err(PathError::argument(format!(
                        "segment `{segment}` needs a name when it follows a plain property"
                    )));
                }
                _ => (),
            }
            if let Segment::Mapped { key, .. } = segment {
                checked_key(key)?;
            }
            previous = Some(segment);
        }

        Ok(ParsedPath { segments })
    }

    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        #[cfg(debug_assertions)]
        debug_assert!(!segments.is_empty(), "a parsed path can't be empty");

        ParsedPath { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path flattened into single steps, with every name that carries a
    /// suffix split into a property step followed by the suffix step.
    pub fn components(&self) -> impl Iterator<Item = Component<'_>> {
        self.segments.iter().flat_map(|segment| {
            segment
                .name()
                .map(Component::Property)
                .into_iter()
                .chain(segment.suffix())
        })
    }
}

impl FromStr for ParsedPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl<'p> IntoIterator for &'p ParsedPath {
    type Item = &'p Segment;
    type IntoIter = Iter<'p, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for ParsedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && segment.name().is_some() {
                f.write_char('.')?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Property,
    Index,
    Mapped,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Property => f.write_str("property"),
            SegmentKind::Index => f.write_str("index"),
            SegmentKind::Mapped => f.write_str("mapped"),
        }
    }
}

/// One step of a property path.
///
/// `Index` and `Mapped` segments without a name apply their suffix to the
/// current value itself, as in `[0]`, `(key)` or the second suffix of
/// `pow[0][1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Property { name: String },
    Index { name: Option<String>, index: i64 },
    Mapped { name: Option<String>, key: String },
}

impl Segment {
    pub fn property(name: &str) -> Result<Self, PathError> {
        Ok(Segment::Property {
            name: checked_name(name)?,
        })
    }

    pub fn index(name: Option<&str>, index: i64) -> Result<Self, PathError> {
        Ok(Segment::Index {
            name: name.map(checked_name).transpose()?,
            index,
        })
    }

    pub fn mapped(name: Option<&str>, key: &str) -> Result<Self, PathError> {
        Ok(Segment::Mapped {
            name: name.map(checked_name).transpose()?,
            key: checked_key(key)?.to_owned(),
        })
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Property { .. } => SegmentKind::Property,
            Segment::Index { .. } => SegmentKind::Index,
            Segment::Mapped { .. } => SegmentKind::Mapped,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Segment::Property { name } => Some(name),
            Segment::Index { name, .. } | Segment::Mapped { name, .. } => name.as_deref(),
        }
    }

    fn suffix(&self) -> Option<Component<'_>> {
        match self {
            Segment::Property { .. } => None,
            Segment::Index { index, .. } => Some(Component::Index(*index)),
            Segment::Mapped { key, .. } => Some(Component::Key(key)),
        }
    }
}

fn checked_name(name: &str) -> Result<String, PathError> {
    if is_valid_name(name) {
        Ok(name.to_owned())
    } else {
        Err(PathError::argument(format!(
            "`{name}` is not a valid property name"
        )))
    }
}

fn checked_key(key: &str) -> Result<&str, PathError> {
    if key.contains(')') {
        Err(PathError::argument(format!("key `{key}` can't contain `)`")))
    } else {
        Ok(key)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            f.write_str(name)?;
        }
        match self.suffix() {
            Some(suffix) => write!(f, "{suffix}"),
            None => Ok(()),
        }
    }
}

/// A single step of a flattened path. See [`ParsedPath::components`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component<'p> {
    Property(&'p str),
    Index(i64),
    Key(&'p str),
}

impl fmt::Display for Component<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Property(name) => f.write_str(name),
            Component::Index(index) => write!(f, "[{index}]"),
            Component::Key(key) => write!(f, "({key})"),
        }
    }
}
