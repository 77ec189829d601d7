//! Presence-tracked optional fields
//!
//! `Field<T>` records whether a value was explicitly set, independent of the
//! value itself. A field set to its type's default (`false`, `0`, `""`) is
//! still sent on the wire; a field that was never set is omitted. This keeps
//! client-side defaults from overwriting server-managed values.
//!
//! Use together with
//! `#[serde(default, skip_serializing_if = "Field::is_unset")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that is either explicitly set or absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// Never assigned; omitted on serialization.
    Unset,
    /// Explicitly assigned, even if equal to a default.
    Set(T),
}

impl<T> Field<T> {
    /// Whether the field was never assigned.
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Whether the field was explicitly assigned.
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Borrow the value, if set.
    pub const fn get(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// Assign a value, marking the field as set.
    pub fn set(&mut self, value: T) {
        *self = Self::Set(value);
    }

    /// Return the field to the unset state.
    pub fn clear(&mut self) {
        *self = Self::Unset;
    }

    /// `Set` for `Some`, `Unset` for `None`.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Set)
    }

    /// Convert into an `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }
}

impl<T: Default> Field<T> {
    /// Mutable access to the value, setting it to `T::default()` first when
    /// unset.
    pub fn get_or_insert_default(&mut self) -> &mut T {
        if self.is_unset() {
            *self = Self::Set(T::default());
        }
        match self {
            Self::Set(value) => value,
            Self::Unset => unreachable!("field assigned above"),
        }
    }
}

impl<T: Clone> Field<T> {
    /// Value if set, otherwise `fallback`.
    pub fn get_or(&self, fallback: T) -> T {
        self.get().cloned().unwrap_or(fallback)
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}
