use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathErrorType {
    /// The caller passed something unusable: an empty path, a path bounded
    /// by dots, a nil root object or an invalid hand-built segment.
    ArgumentError,
    SyntaxError,
    /// An interior segment resolved to nothing under `MissingPolicy::Fail`.
    NoSuchProperty,
    /// The path and the object disagree about shape.
    TypeError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub kind: PathErrorType,
    pub msg: String,
    /// Character offset into the caller's path string. Only set for syntax errors.
    pub position: Option<usize>,
}

impl PathError {
    pub fn new(kind: PathErrorType, msg: String, position: Option<usize>) -> Self {
        Self {
            kind,
            msg,
            position,
        }
    }

    pub fn argument(msg: impl Into<String>) -> Self {
        Self::new(PathErrorType::ArgumentError, msg.into(), None)
    }

    pub fn syntax(msg: String, position: usize) -> Self {
        Self::new(PathErrorType::SyntaxError, msg, Some(position))
    }

    pub fn no_such_property(segment: &str, path: &str) -> Self {
        Self::new(
            PathErrorType::NoSuchProperty,
            format!("unexpected nil value for property `{segment}` in path `{path}`"),
            None,
        )
    }

    pub fn typ(msg: String) -> Self {
        Self::new(PathErrorType::TypeError, msg, None)
    }

    pub fn is_argument(&self) -> bool {
        self.kind == PathErrorType::ArgumentError
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == PathErrorType::SyntaxError
    }

    pub fn is_no_such_property(&self) -> bool {
        self.kind == PathErrorType::NoSuchProperty
    }

    pub fn is_type(&self) -> bool {
        self.kind == PathErrorType::TypeError
    }
}

impl std::error::Error for PathError {}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PathErrorType::ArgumentError => write!(f, "argument error: {}", self.msg),
            PathErrorType::SyntaxError => write!(f, "syntax error: {}", self.msg),
            PathErrorType::NoSuchProperty => write!(f, "no such property: {}", self.msg),
            PathErrorType::TypeError => write!(f, "type error: {}", self.msg),
        }
    }
}
