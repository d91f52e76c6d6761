//! Capability adapters for standard library types and `serde_json::Value`.
use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    hash::BuildHasher,
    rc::Rc,
    sync::Arc,
};

use serde_json::{Map, Value};

use crate::value::{Lookup, Mapping, Navigable, Record, Sequence};

// Scalars expose no capabilities. Strings in particular are not sequences.

impl Navigable for String {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn as_str(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl Navigable for &'static str {
    fn type_name(&self) -> &'static str {
        "str"
    }

    fn as_str(&self) -> Option<&str> {
        Some(*self)
    }
}

impl Navigable for bool {
    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn as_bool(&self) -> Option<bool> {
        Some(*self)
    }
}

impl Navigable for char {
    fn type_name(&self) -> &'static str {
        "char"
    }
}

impl Navigable for () {
    fn is_nil(&self) -> bool {
        true
    }

    fn type_name(&self) -> &'static str {
        "nil"
    }
}

macro_rules! integer {
    ($($t:ty),*) => {
        $(
            impl Navigable for $t {
                fn type_name(&self) -> &'static str {
                    stringify!($t)
                }

                fn as_i64(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }

                fn as_f64(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float {
    ($($t:ty),*) => {
        $(
            impl Navigable for $t {
                fn type_name(&self) -> &'static str {
                    stringify!($t)
                }

                fn as_f64(&self) -> Option<f64> {
                    Some(f64::from(*self))
                }
            }
        )*
    };
}

float!(f32, f64);

impl<T: Navigable + 'static> Navigable for Option<T> {
    fn as_mapping(&self) -> Option<&dyn Mapping> {
        self.as_ref().and_then(|v| v.as_mapping())
    }

    fn as_sequence(&self) -> Option<&dyn Sequence> {
        self.as_ref().and_then(|v| v.as_sequence())
    }

    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(|v| v.as_record())
    }

    fn is_nil(&self) -> bool {
        self.as_ref().map_or(true, |v| v.is_nil())
    }

    fn type_name(&self) -> &'static str {
        self.as_ref().map_or("nil", |v| v.type_name())
    }

    fn as_str(&self) -> Option<&str> {
        self.as_ref().and_then(|v| v.as_str())
    }

    fn as_i64(&self) -> Option<i64> {
        self.as_ref().and_then(|v| v.as_i64())
    }

    fn as_f64(&self) -> Option<f64> {
        self.as_ref().and_then(|v| v.as_f64())
    }

    fn as_bool(&self) -> Option<bool> {
        self.as_ref().and_then(|v| v.as_bool())
    }
}

macro_rules! pointer {
    ($($p:ident),*) => {
        $(
            impl<T: Navigable + ?Sized + 'static> Navigable for $p<T> {
                fn as_mapping(&self) -> Option<&dyn Mapping> {
                    (**self).as_mapping()
                }

                fn as_sequence(&self) -> Option<&dyn Sequence> {
                    (**self).as_sequence()
                }

                fn as_record(&self) -> Option<&dyn Record> {
                    (**self).as_record()
                }

                fn is_nil(&self) -> bool {
                    (**self).is_nil()
                }

                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn as_str(&self) -> Option<&str> {
                    (**self).as_str()
                }

                fn as_i64(&self) -> Option<i64> {
                    (**self).as_i64()
                }

                fn as_f64(&self) -> Option<f64> {
                    (**self).as_f64()
                }

                fn as_bool(&self) -> Option<bool> {
                    (**self).as_bool()
                }
            }
        )*
    };
}

pointer!(Box, Rc, Arc);

impl<T: Navigable + 'static> Navigable for Vec<T> {
    fn as_sequence(&self) -> Option<&dyn Sequence> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "Vec"
    }
}

impl<T: Navigable> Sequence for Vec<T> {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn element(&self, index: usize) -> Lookup<'_> {
        <[T]>::get(self, index).map(|v| v as &dyn Navigable)
    }
}

impl<T: Navigable + 'static, const N: usize> Navigable for [T; N] {
    fn as_sequence(&self) -> Option<&dyn Sequence> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "array"
    }
}

impl<T: Navigable, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> Lookup<'_> {
        <[T]>::get(self, index).map(|v| v as &dyn Navigable)
    }
}

impl<T: Navigable + 'static> Navigable for VecDeque<T> {
    fn as_sequence(&self) -> Option<&dyn Sequence> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "VecDeque"
    }
}

impl<T: Navigable> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn element(&self, index: usize) -> Lookup<'_> {
        VecDeque::get(self, index).map(|v| v as &dyn Navigable)
    }
}

impl<V: Navigable + 'static, S: BuildHasher + 'static> Navigable for HashMap<String, V, S> {
    fn as_mapping(&self) -> Option<&dyn Mapping> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "HashMap"
    }
}

impl<V: Navigable, S: BuildHasher> Mapping for HashMap<String, V, S> {
    fn lookup(&self, key: &str) -> Lookup<'_> {
        self.get(key).map(|v| v as &dyn Navigable)
    }
}

impl<V: Navigable + 'static> Navigable for BTreeMap<String, V> {
    fn as_mapping(&self) -> Option<&dyn Mapping> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "BTreeMap"
    }
}

impl<V: Navigable> Mapping for BTreeMap<String, V> {
    fn lookup(&self, key: &str) -> Lookup<'_> {
        self.get(key).map(|v| v as &dyn Navigable)
    }
}

impl Navigable for Value {
    fn as_mapping(&self) -> Option<&dyn Mapping> {
        self.as_object().map(|m| m as &dyn Mapping)
    }

    fn as_sequence(&self) -> Option<&dyn Sequence> {
        self.as_array().map(|a| a as &dyn Sequence)
    }

    fn is_nil(&self) -> bool {
        self.is_null()
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn as_str(&self) -> Option<&str> {
        Value::as_str(self)
    }

    fn as_i64(&self) -> Option<i64> {
        Value::as_i64(self)
    }

    fn as_f64(&self) -> Option<f64> {
        Value::as_f64(self)
    }

    fn as_bool(&self) -> Option<bool> {
        Value::as_bool(self)
    }
}

impl Navigable for Map<String, Value> {
    fn as_mapping(&self) -> Option<&dyn Mapping> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "object"
    }
}

impl Mapping for Map<String, Value> {
    fn lookup(&self, key: &str) -> Lookup<'_> {
        self.get(key).map(|v| v as &dyn Navigable)
    }
}
