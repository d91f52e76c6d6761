//! Read values out of nested data with short property paths like
//! `books[0].author`, `owner.name` or `book(Sword of Honour).price`.
//!
//! A path is a chain of dot separated property names, each optionally
//! followed by a bracketed integer index (`[2]`, `[-1]`) or a parenthesized
//! key (`(year)`). Indices and keys can also start a path, or follow each
//! other directly, in which case they apply to the current value itself.
//!
//! ## Parsing
//!
//! Use [`parse`] to turn a path into a [`ParsedPath`]. Parsing never looks
//! at any data, and a parsed path can be reused for as many lookups as you
//! like.
//!
//! ```
//! use property_accessor::{errors::PathError, parse};
//!
//! fn main() -> Result<(), PathError> {
//!     let p = parse("foo.bar[0].meh.pow[0][1]")?;
//!     println!("{:#?}", p);
//!     Ok(())
//! }
//! ```
//!
//! Debug output from the example above shows these segments:
//!
//! ```text
//! ParsedPath {
//!     segments: [
//!         Property {
//!             name: "foo",
//!         },
//!         Index {
//!             name: Some(
//!                 "bar",
//!             ),
//!             index: 0,
//!         },
//!         Property {
//!             name: "meh",
//!         },
//!         Index {
//!             name: Some(
//!                 "pow",
//!             ),
//!             index: 0,
//!         },
//!         Index {
//!             name: None,
//!             index: 1,
//!         },
//!     ],
//! }
//! ```
//!
//! Syntax errors carry the character offset of the first character that
//! doesn't fit.
//!
//! ```text
//! Error: PathError { kind: SyntaxError, msg: "could not parse index as integer at position 6", position: Some(6) }
//! ```
//!
//! ## Getting values
//!
//! An [`Accessor`] pairs a parsed path with [`Options`]. Anything that
//! implements [`Navigable`] can be walked: `serde_json::Value`, standard
//! maps and sequences, and your own structs via the [`record!`] macro.
//!
//! ```
//! use property_accessor::{errors::PathError, Accessor, Options};
//! use serde_json::json;
//!
//! fn main() -> Result<(), PathError> {
//!     let store = json!({
//!         "owner": {"name": "John Doe"},
//!         "books": [{"author": "Nigel Rees", "title": null}]
//!     });
//!
//!     let author = Accessor::new("books[0].author")?.get_value(&store)?;
//!     assert_eq!(author.and_then(|v| v.as_str()), Some("Nigel Rees"));
//!
//!     // `title` is null, so there's nothing to take `upcase` from.
//!     let accessor = Accessor::new("books[0].title.upcase")?;
//!     assert!(accessor.get_value(&store).is_err());
//!
//!     let accessor = Accessor::with_options("books[0].title.upcase", Options::lenient())?;
//!     assert!(accessor.get_value(&store)?.is_none());
//!     Ok(())
//! }
//! ```
//!
//! Values come back as `&dyn Navigable` borrowed from the root. Use the
//! scalar helpers (`as_str`, `as_i64`, ...) or
//! `downcast_ref` to get at the concrete type.
pub mod accessor;
pub mod errors;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod path;
pub mod value;
mod impls;
mod token;

pub use accessor::Accessor;
pub use errors::PathError;
pub use errors::PathErrorType;
pub use options::MissingPolicy;
pub use options::Options;
pub use parser::parse;
pub use path::Component;
pub use path::ParsedPath;
pub use path::Segment;
pub use path::SegmentKind;
pub use value::AsAny;
pub use value::Lookup;
pub use value::Mapping;
pub use value::Navigable;
pub use value::Record;
pub use value::Sequence;

/// Parse `path` and evaluate it once against `object` with default options.
pub fn get_value<'v>(
    object: &'v dyn Navigable,
    path: &str,
) -> Result<Option<&'v dyn Navigable>, PathError> {
    get_value_with(object, path, Options::default())
}

/// Parse `path` and evaluate it once against `object`.
pub fn get_value_with<'v>(
    object: &'v dyn Navigable,
    path: &str,
    options: Options,
) -> Result<Option<&'v dyn Navigable>, PathError> {
    Accessor::with_options(path, options)?.get_value(object)
}
