//! See [`ValueKind`].

use core::ffi::c_int;

use thiserror::Error;

use crate::cdef::{
	c_int_enum, Type,
};

c_int_enum! {
	/// Closed classification of the value at some stack index.
	///
	/// This is what [`shim_lua_kind`](crate::shim::shim_lua_kind) hands to
	/// foreign callers, so that they never need to know the full set of Lua
	/// type tags.
	/// Light userdata is classified as [`ValueKind::Userdata`], while
	/// coroutines and empty stack slots are [`ValueKind::Other`].
	#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
	#[repr(C)]
	pub enum ValueKind {
		Nil = 0,
		Boolean = 1,
		Number = 2,
		String = 3,
		Table = 4,
		Function = 5,
		Userdata = 6,
		Other = 7,
	}
}

/// Error for a [`ValueKind`] discriminant that doesn't name any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not a value kind")]
pub struct UnknownKind(pub c_int);

impl ValueKind {
	/// Classify a raw type tag, as returned by `lua_type`.
	///
	/// Unknown tags are [`ValueKind::Other`].
	///
	/// # Examples
	/// ```
	/// use lua_stack_shim::ValueKind;
	/// assert_eq!(ValueKind::from_type_tag(0), ValueKind::Nil);
	/// assert_eq!(ValueKind::from_type_tag(6), ValueKind::Function);
	/// assert_eq!(ValueKind::from_type_tag(-1), ValueKind::Other);
	/// assert_eq!(ValueKind::from_type_tag(42), ValueKind::Other);
	/// ```
	pub fn from_type_tag(tag: c_int) -> Self {
		Type::try_from(tag).map(Self::from).unwrap_or(Self::Other)
	}

	/// Decode a discriminant that came back across the foreign boundary.
	///
	/// # Examples
	/// ```
	/// use lua_stack_shim::{ValueKind, kind::UnknownKind};
	/// assert_eq!(ValueKind::from_discriminant(4), Ok(ValueKind::Table));
	/// assert_eq!(ValueKind::from_discriminant(8), Err(UnknownKind(8)));
	/// ```
	pub fn from_discriminant(value: c_int) -> Result<Self, UnknownKind> {
		Self::try_from(value).map_err(|()| UnknownKind(value))
	}

	/// Return the Lua name of this kind, like the `type` function in Lua would.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Nil => "nil",
			Self::Boolean => "boolean",
			Self::Number => "number",
			Self::String => "string",
			Self::Table => "table",
			Self::Function => "function",
			Self::Userdata => "userdata",
			Self::Other => "other",
		}
	}

	/// Return `true` if the value can only be shown to the host as text.
	pub const fn is_reference(self) -> bool {
		matches!(self, Self::Table | Self::Function | Self::Userdata | Self::Other)
	}
}

impl From<Type> for ValueKind {
	fn from(value: Type) -> Self {
		match value {
			Type::Nil => Self::Nil,
			Type::Boolean => Self::Boolean,
			Type::Number => Self::Number,
			Type::String => Self::String,
			Type::Table => Self::Table,
			Type::Function => Self::Function,
			Type::Userdata | Type::LightUserdata => Self::Userdata,
			Type::Thread | Type::None => Self::Other,
		}
	}
}

impl core::fmt::Display for ValueKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_type_tag_has_a_kind() {
		let expected = [
			(-1, ValueKind::Other),
			(0, ValueKind::Nil),
			(1, ValueKind::Boolean),
			(2, ValueKind::Userdata),
			(3, ValueKind::Number),
			(4, ValueKind::String),
			(5, ValueKind::Table),
			(6, ValueKind::Function),
			(7, ValueKind::Userdata),
			(8, ValueKind::Other),
		];
		for (tag, kind) in expected {
			assert_eq!(ValueKind::from_type_tag(tag), kind, "tag {tag}");
		}
	}

	#[test]
	fn discriminants_survive_the_boundary() {
		for raw in 0..8 {
			let kind = ValueKind::from_discriminant(raw).unwrap();
			assert_eq!(c_int::from(kind), raw);
		}
		assert_eq!(ValueKind::from_discriminant(-1), Err(UnknownKind(-1)));
	}

	#[test]
	fn kind_is_c_int_sized() {
		assert_eq!(core::mem::size_of::<ValueKind>(), core::mem::size_of::<c_int>());
	}

	#[test]
	fn display_uses_lua_names() {
		assert_eq!(ValueKind::Function.to_string(), "function");
		assert!(ValueKind::Table.is_reference());
		assert!(!ValueKind::String.is_reference());
	}
}
