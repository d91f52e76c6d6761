//! Capabilities a host value exposes so that paths can walk through it.
//!
//! A value is reached through [`Navigable`], which hands out up to three
//! views of itself: a [`Mapping`] (key lookup), a [`Sequence`] (indexed,
//! with negative indices counting from the end) and a [`Record`] (named
//! zero-argument accessors). Adapters for common standard library types and
//! for `serde_json::Value` live in the `impls` module; structs get a
//! [`Record`] implementation from the [`record!`](crate::record) macro.
use std::{any::Any, fmt};

/// The result of a single lookup. `None` means the value isn't there.
pub type Lookup<'a> = Option<&'a dyn Navigable>;

pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub trait Navigable: AsAny {
    fn as_mapping(&self) -> Option<&dyn Mapping> {
        None
    }

    fn as_sequence(&self) -> Option<&dyn Sequence> {
        None
    }

    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// A nil value is treated exactly like a missing one.
    fn is_nil(&self) -> bool {
        false
    }

    /// A short, human readable name for this value's shape, used in type errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_str(&self) -> Option<&str> {
        None
    }

    fn as_i64(&self) -> Option<i64> {
        None
    }

    fn as_f64(&self) -> Option<f64> {
        None
    }

    fn as_bool(&self) -> Option<bool> {
        None
    }
}

impl<'a> dyn Navigable + 'a {
    /// Recover the concrete type behind a resolved value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl fmt::Debug for dyn Navigable + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Key to value lookup. Keys are always strings; adapters for maps keyed
/// by anything else must convert before they get here.
pub trait Mapping {
    fn lookup(&self, key: &str) -> Lookup<'_>;

    fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

/// Ordered, 0-based element access.
pub trait Sequence {
    fn len(&self) -> usize;

    fn element(&self, index: usize) -> Lookup<'_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element access with negative indices counting back from the end.
    fn resolve(&self, index: i64) -> Lookup<'_> {
        norm_index(index, self.len()).and_then(|i| self.element(i))
    }
}

/// Named, zero-argument accessors.
pub trait Record {
    fn field(&self, name: &str) -> Lookup<'_>;

    /// A named accessor that takes a key, like `book(Sword of Honour)`.
    ///
    /// Returns `None` when the record has no keyed accessor called `name`,
    /// in which case the key is looked up in whatever `field(name)` returns.
    fn keyed_field(&self, _name: &str, _key: &str) -> Option<Lookup<'_>> {
        None
    }
}

/// Map a possibly negative index onto `0..length`.
pub fn norm_index(index: i64, length: usize) -> Option<usize> {
    let i = if index < 0 {
        index
            .checked_abs()
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| length.checked_sub(i))
    } else {
        usize::try_from(index).ok()
    }?;

    (i < length).then_some(i)
}

/// Implement [`Navigable`] and [`Record`] for a struct by listing the fields
/// that paths may read. Every listed field must itself be [`Navigable`].
///
/// Keyed accessors are methods taking `&str` and returning `Option<&T>`;
/// list them after `keyed`.
///
/// ```
/// use property_accessor::{get_value, record};
///
/// struct Book {
///     title: String,
///     price: u32,
/// }
///
/// struct Shelf {
///     books: Vec<Book>,
/// }
///
/// impl Shelf {
///     fn book(&self, title: &str) -> Option<&Book> {
///         self.books.iter().find(|b| b.title == title)
///     }
/// }
///
/// record!(Book { title, price });
/// record!(Shelf { books } keyed { book });
///
/// let shelf = Shelf {
///     books: vec![Book { title: "Dune".into(), price: 9 }],
/// };
///
/// let price = get_value(&shelf, "book(Dune).price").unwrap();
/// assert_eq!(price.and_then(|p| p.as_i64()), Some(9));
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        $crate::record!($ty { $($field),* } keyed { });
    };
    ($ty:ident { $($field:ident),* $(,)? } keyed { $($method:ident),* $(,)? }) => {
        impl $crate::Navigable for $ty {
            fn as_record(&self) -> ::core::option::Option<&dyn $crate::Record> {
                ::core::option::Option::Some(self)
            }

            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }
        }

        impl $crate::Record for $ty {
            fn field(&self, name: &str) -> $crate::Lookup<'_> {
                match name {
                    $(stringify!($field) => ::core::option::Option::Some(
                        &self.$field as &dyn $crate::Navigable,
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn keyed_field(
                &self,
                name: &str,
                key: &str,
            ) -> ::core::option::Option<$crate::Lookup<'_>> {
                match name {
                    $(stringify!($method) => ::core::option::Option::Some(
                        self.$method(key).map(|v| v as &dyn $crate::Navigable),
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}
