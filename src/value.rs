//! Values that can be snapshotted.
//!
//! A snapshot value is anything implementing [`Snap`]. The trait is a set of
//! optional capabilities; each accessor returns `None` unless the type opts in.
//! The text formatter walks them in a fixed priority order:
//!
//! 1. [`Snap::snapper`] - a custom, fallible byte producer ([`Snapper`])
//! 2. [`Snap::structured`] - a structured value re-rendered as indented JSON
//! 3. [`Snap::text`] - a fallible text marshaller ([`TextMarshal`])
//! 4. [`Snap::display`] - the value's `Display` string
//! 5. [`Snap::primitive`] - the natural rendering of a scalar
//! 6. [`Snap::fallback`] - the alternate `Debug` rendering (`{:#?}`) as a last resort
//!
//! Types can implement [`Snap`] directly, or be wrapped in one of the adapters
//! ([`Json`], [`Text`], [`Displayed`], [`Bytes`], [`Debugged`]).
//!
//! ```rust
//! use snapcheck::{BoxError, Snap, Snapper};
//!
//! #[derive(Debug)]
//! struct Session {
//!     user: String,
//! }
//!
//! impl Snapper for Session {
//!     fn snap(&self) -> Result<Vec<u8>, BoxError> {
//!         Ok(format!("user = {}", self.user).into_bytes())
//!     }
//! }
//!
//! impl Snap for Session {
//!     fn snapper(&self) -> Option<&dyn Snapper> {
//!         Some(self)
//!     }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::error::BoxError;

/// Produces the exact bytes to store for a value.
///
/// This is where a type can redact non-deterministic data or choose a format
/// that reads well in a diff.
pub trait Snapper {
    fn snap(&self) -> Result<Vec<u8>, BoxError>;
}

/// Marshals a value to its textual form.
pub trait TextMarshal {
    fn marshal_text(&self) -> Result<Vec<u8>, BoxError>;
}

/// Capability set consulted by the text formatter.
pub trait Snap: fmt::Debug {
    fn snapper(&self) -> Option<&dyn Snapper> {
        None
    }

    fn structured(&self) -> Option<Result<serde_json::Value, serde_json::Error>> {
        None
    }

    fn text(&self) -> Option<&dyn TextMarshal> {
        None
    }

    fn display(&self) -> Option<&dyn fmt::Display> {
        None
    }

    fn primitive(&self) -> Option<String> {
        None
    }

    /// Rendering used when no capability applies.
    ///
    /// Defaults to the alternate `Debug` form. Unordered collections override
    /// it to render in a deterministic order.
    fn fallback(&self) -> String {
        format!("{:#?}", self)
    }

    /// Name used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<T: Snap + ?Sized> Snap for &T {
    fn snapper(&self) -> Option<&dyn Snapper> {
        (**self).snapper()
    }

    fn structured(&self) -> Option<Result<serde_json::Value, serde_json::Error>> {
        (**self).structured()
    }

    fn text(&self) -> Option<&dyn TextMarshal> {
        (**self).text()
    }

    fn display(&self) -> Option<&dyn fmt::Display> {
        (**self).display()
    }

    fn primitive(&self) -> Option<String> {
        (**self).primitive()
    }

    fn fallback(&self) -> String {
        (**self).fallback()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

impl<T: Snap + ?Sized> Snap for Box<T> {
    fn snapper(&self) -> Option<&dyn Snapper> {
        (**self).snapper()
    }

    fn structured(&self) -> Option<Result<serde_json::Value, serde_json::Error>> {
        (**self).structured()
    }

    fn text(&self) -> Option<&dyn TextMarshal> {
        (**self).text()
    }

    fn display(&self) -> Option<&dyn fmt::Display> {
        (**self).display()
    }

    fn primitive(&self) -> Option<String> {
        (**self).primitive()
    }

    fn fallback(&self) -> String {
        (**self).fallback()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

// =============================================================================
// PRIMITIVES
// =============================================================================

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Snap for $ty {
                fn primitive(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_primitive!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

/// Raw bytes, rendered as a bracketed list of decimal values: `[104 105]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bytes<'a>(pub &'a [u8]);

impl Snap for Bytes<'_> {
    fn primitive(&self) -> Option<String> {
        let values: Vec<String> = self.0.iter().map(|b| b.to_string()).collect();
        Some(format!("[{}]", values.join(" ")))
    }
}

// =============================================================================
// GENERIC FALLBACK
// =============================================================================

// Containers expose no capability and always take the `Debug` fallback.

impl<T: fmt::Debug> Snap for Vec<T> {}
impl<T: fmt::Debug> Snap for [T] {}
impl<T: fmt::Debug, const N: usize> Snap for [T; N] {}
impl<T: fmt::Debug> Snap for Option<T> {}
impl<K: fmt::Debug, V: fmt::Debug> Snap for BTreeMap<K, V> {}
impl Snap for () {}

/// Rendered like a `BTreeMap` so entry order does not depend on the hasher.
impl<K: Ord + fmt::Debug, V: fmt::Debug, S> Snap for HashMap<K, V, S> {
    fn fallback(&self) -> String {
        let sorted: BTreeMap<&K, &V> = self.iter().collect();
        format!("{:#?}", sorted)
    }
}

// =============================================================================
// ADAPTERS
// =============================================================================

/// Snapshots any `Serialize` type as indented JSON.
pub struct Json<'a, T: ?Sized>(pub &'a T);

impl<T: ?Sized> fmt::Debug for Json<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Json")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Serialize + ?Sized> Snap for Json<'_, T> {
    fn structured(&self) -> Option<Result<serde_json::Value, serde_json::Error>> {
        Some(serde_json::to_value(self.0))
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Snapshots a [`TextMarshal`] type through its marshaller.
pub struct Text<'a, T: ?Sized>(pub &'a T);

impl<T: ?Sized> fmt::Debug for Text<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Text")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<T: TextMarshal + ?Sized> Snap for Text<'_, T> {
    fn text(&self) -> Option<&dyn TextMarshal> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: TextMarshal + ?Sized> TextMarshal for Text<'_, T> {
    fn marshal_text(&self) -> Result<Vec<u8>, BoxError> {
        self.0.marshal_text()
    }
}

/// Snapshots a value through its `Display` implementation.
pub struct Displayed<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Display + ?Sized> fmt::Debug for Displayed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Displayed")
            .field(&format_args!("{}", self.0))
            .finish()
    }
}

impl<T: fmt::Display + ?Sized> Snap for Displayed<'_, T> {
    fn display(&self) -> Option<&dyn fmt::Display> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: fmt::Display + ?Sized> fmt::Display for Displayed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Forces the `Debug` fallback for any type.
pub struct Debugged<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Debug + ?Sized> fmt::Debug for Debugged<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: fmt::Debug + ?Sized> Snap for Debugged<'_, T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
