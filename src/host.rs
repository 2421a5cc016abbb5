//! Moving values between the host and the Lua stack, and calling into Lua.
//!
//! Everything here is built out of the [`shim`](crate::shim) entry points
//! through [`Thread`], so it behaves exactly as a foreign caller driving the
//! catalogue by hand would.

use core::ffi::{
	CStr, c_int,
};
use std::ffi::CString;

use tracing::{
	debug, trace, warn,
};

use crate::{
	cdef::{
		MULT_RET, Number, REGISTRY_INDEX, Type, lua_error,
	},
	errors::{
		CallError, CallResult, HostError,
	},
	kind::ValueKind,
	Thread,
};

const TOSTRING: &CStr = c"tostring";
const ERROR: &CStr = c"error";

/// Host-side copy of a value that was on the Lua stack, or is about to be.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
	#[default]
	Nil,
	Boolean(bool),
	Number(Number),
	String(String),
	/// Textual rendering of a table, function, userdata or coroutine, as
	/// produced by Lua's `tostring`.
	///
	/// Pushing this back onto the stack pushes the text, not the object.
	Opaque(String),
}

impl HostValue {
	pub fn is_nil(&self) -> bool {
		matches!(self, Self::Nil)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Boolean(b) => Some(*b),
			_ => None
		}
	}

	pub fn as_number(&self) -> Option<Number> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None
		}
	}

	/// Return the text of a string or an opaque rendering.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) | Self::Opaque(s) => Some(s),
			_ => None
		}
	}
}

impl From<bool> for HostValue {
	fn from(value: bool) -> Self {
		Self::Boolean(value)
	}
}

impl From<String> for HostValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<&str> for HostValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Self::Nil)
	}
}

// Lua numbers are floating point, so wide integers lose precision.
macro_rules! number_from {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for HostValue {
				fn from(value: $ty) -> Self {
					Self::Number(value as Number)
				}
			}
		)*
	};
}

number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Turn a relative index into an absolute one, so that it keeps pointing at
/// the same value while other values are pushed.
fn absolute(thread: &Thread, idx: c_int) -> c_int {
	if idx < 0 && idx > REGISTRY_INDEX {
		thread.top() + idx + 1
	} else {
		idx
	}
}

fn lossy(bytes: &[u8]) -> String {
	String::from_utf8_lossy(bytes).into_owned()
}

/// Render a reference value with the global `tostring`, leaving the stack as
/// it was.
fn render(thread: &Thread, idx: c_int, kind: ValueKind) -> String {
	if !thread.check_stack(2) {
		return format!("<{kind}>")
	}

	let base = thread.top();
	unsafe { thread.get_global(TOSTRING) };
	if !thread.is_function(-1) {
		thread.pop_to(base);
		return format!("<{kind}>")
	}

	thread.push_value(idx);
	let text = if thread.pcall(1, 1, 0).is_ok() {
		unsafe { thread.to_bytes(-1) }.map(lossy)
	} else {
		None
	};
	thread.pop_to(base);
	text.unwrap_or_else(|| format!("<{kind}>"))
}

/// Copy the value at `idx` into a [`HostValue`].
///
/// Tables, functions, userdata and coroutines are rendered with the global
/// `tostring`, falling back to `<kind>` if that isn't available.
/// The stack is left unchanged.
pub fn read_value(thread: &Thread, idx: c_int) -> Result<HostValue, HostError> {
	let idx = absolute(thread, idx);
	let value = match thread.type_of(idx) {
		Type::None => return Err(HostError::NoValue { index: idx }),
		Type::Nil => HostValue::Nil,
		Type::Boolean => HostValue::Boolean(thread.to_boolean(idx)),
		Type::Number => HostValue::Number(thread.to_number(idx)),
		Type::String => {
			let text = unsafe { thread.to_bytes(idx) }.map(lossy).unwrap_or_default();
			HostValue::String(text)
		}
		ty => HostValue::Opaque(render(thread, idx, ValueKind::from(ty))),
	};
	trace!(index = idx, ?value, "read value from stack");
	Ok(value)
}

/// Push a copy of `value` onto the stack.
///
/// Strings must not contain NUL bytes, since they cross the shim as C
/// strings.
pub fn push_value(thread: &Thread, value: &HostValue) -> Result<(), HostError> {
	trace!(?value, "pushing value onto stack");
	if !thread.check_stack(1) {
		return Err(HostError::StackOverflow { needed: 1 })
	}
	match value {
		HostValue::Nil => thread.push_nil(),
		HostValue::Boolean(b) => thread.push_boolean(*b),
		HostValue::Number(n) => thread.push_number(*n),
		HostValue::String(s) | HostValue::Opaque(s) => {
			let s = CString::new(s.as_str())
				.map_err(|e| HostError::InteriorNul { position: e.nul_position() })?;
			unsafe { thread.push_string(&s) }
		}
	}
	Ok(())
}

/// Read every value on the stack, bottom to top.
///
/// This is what a C function sees as its arguments.
pub fn read_args(thread: &Thread) -> Result<Vec<HostValue>, HostError> {
	(1..=thread.top()).map(|idx| read_value(thread, idx)).collect()
}

/// Push `values` in order and return how many were pushed, for returning
/// from a C function.
///
/// Nothing is pushed if the stack can't hold every value. On any other
/// error, the values pushed so far are popped again.
pub fn push_results(thread: &Thread, values: &[HostValue]) -> Result<c_int, HostError> {
	if !thread.check_stack(values.len()) {
		return Err(HostError::StackOverflow { needed: values.len() })
	}
	let base = thread.top();
	for value in values {
		if let Err(e) = push_value(thread, value) {
			thread.pop_to(base);
			return Err(e)
		}
	}
	Ok(values.len() as c_int)
}

/// Describe the error object on top of the stack.
fn error_message(thread: &Thread) -> String {
	match unsafe { thread.to_bytes(-1) } {
		Some(msg) => lossy(msg),
		None => format!("(error object is a {} value)", thread.kind_of(-1)),
	}
}

/// Call the global Lua function `name` in protected mode with `args`, and
/// return all of its results in order.
///
/// The stack top is the same after this returns as before, whether the call
/// succeeded or not.
pub fn call_global(thread: &Thread, name: &str, args: &[HostValue]) -> CallResult<Vec<HostValue>> {
	let c_name = CString::new(name)
		.map_err(|_| CallError::InvalidName(name.to_owned()))?;
	let needed = args.len().saturating_add(1);
	if !thread.check_stack(needed) {
		return Err(CallError::StackOverflow { name: name.to_owned(), needed })
	}
	let base = thread.top();

	unsafe { thread.get_global(&c_name) };
	if !thread.is_function(-1) {
		thread.pop_to(base);
		return Err(CallError::NotAFunction { name: name.to_owned() })
	}

	for (position, arg) in args.iter().enumerate() {
		if let Err(source) = push_value(thread, arg) {
			thread.pop_to(base);
			return Err(CallError::Argument { name: name.to_owned(), position, source })
		}
	}

	debug!(function = name, n_args = args.len(), "calling Lua function");
	let status = thread.pcall(args.len() as c_int, MULT_RET, 0);
	if !status.is_ok() {
		let message = error_message(thread);
		thread.pop_to(base);
		warn!(function = name, ?status, %message, "Lua function failed");
		return Err(CallError::Failed { name: name.to_owned(), status, message })
	}

	let top = thread.top();
	let mut results = Vec::with_capacity((top - base).max(0) as usize);
	for idx in (base + 1)..=top {
		match read_value(thread, idx) {
			Ok(value) => results.push(value),
			Err(source) => {
				thread.pop_to(base);
				let position = (idx - base - 1) as usize;
				return Err(CallError::Result { name: name.to_owned(), position, source })
			}
		}
	}
	thread.pop_to(base);
	debug!(function = name, n_results = results.len(), "Lua function returned");
	Ok(results)
}

/// Raise a Lua error with `message` by calling the global `error` function.
///
/// This is meant for C functions that want to report a failure to the Lua code
/// calling them. If `error` has been replaced by something that returns, the
/// message is raised directly instead.
///
/// # Safety
/// This never returns; control leaves through `longjmp` to the closest
/// protected call, skipping Rust frames without running any drop glue.
/// Nothing that owns resources may be alive in the calling frames.
pub unsafe fn raise_error(thread: &Thread, message: &CStr) -> ! {
	unsafe {
		thread.get_global(ERROR);
		thread.push_string(message);
		thread.call(1, 0);
		thread.push_string(message);
		lua_error(thread.as_ptr())
	}
}
