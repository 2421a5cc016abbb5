//! Host functions that Lua code calls by name.
//!
//! A [`Registry`] maps names to plain Rust functions over [`HostValue`]s.
//! Once installed into a Lua state, it shows up as a single C function that
//! takes the name of the host function followed by its arguments:
//! ```lua
//! local sum = host("add", 1, 2)
//! ```
//! Unknown names, argument counts that don't match and failures inside the
//! host function are all raised as Lua errors.

use core::fmt::{
	Display, Formatter, Result as FmtResult,
};
use std::collections::HashMap;

use crate::{
	errors::DispatchError,
	host::HostValue,
};

#[cfg(feature = "auxlib")]
use {
	core::ffi::{
		CStr, c_int,
	},
	tracing::{
		debug, warn,
	},
	crate::{
		cdef::{
			State, auxlib::GC_METAMETHOD, lua_upvalueindex,
		},
		host::{
			push_results, raise_error, read_value,
		},
		kind::ValueKind,
		Thread,
	},
};

/// Name of the metatable given to installed registries.
#[cfg(feature = "auxlib")]
pub const REGISTRY_TYPE_NAME: &CStr = c"lua_stack_shim.Registry";

/// Signature of a function that can be put into a [`Registry`].
///
/// The error is a message that is raised as a Lua error.
pub type HostFunction = fn(&[HostValue]) -> Result<Vec<HostValue>, String>;

/// Number of arguments a host function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
	Exact(usize),
	AtLeast(usize),
}

impl Arity {
	pub const fn accepts(self, n_args: usize) -> bool {
		match self {
			Self::Exact(n) => n_args == n,
			Self::AtLeast(n) => n_args >= n,
		}
	}
}

impl Display for Arity {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		match self {
			Self::Exact(n) => write!(f, "{n}"),
			Self::AtLeast(n) => write!(f, "at least {n}"),
		}
	}
}

#[derive(Debug, Clone, Copy)]
struct Entry {
	arity: Arity,
	func: HostFunction,
}

/// Named collection of [`HostFunction`]s.
///
/// # Examples
/// ```
/// use lua_stack_shim::{
/// 	HostValue,
/// 	errors::DispatchError,
/// 	registry::{Arity, Registry},
/// };
///
/// let mut registry = Registry::new();
/// registry.register("twice", Arity::Exact(1), |args| {
/// 	let n = args[0].as_number().ok_or("expected a number")?;
/// 	Ok(vec![HostValue::Number(n * 2.0)])
/// });
///
/// assert_eq!(registry.call("twice", &[HostValue::Number(3.0)]), Ok(vec![HostValue::Number(6.0)]));
/// assert!(matches!(
/// 	registry.call("twice", &[]),
/// 	Err(DispatchError::WrongArity { got: 0, .. })
/// ));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
	funcs: HashMap<String, Entry>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `func` under `name`, replacing any function that had the same
	/// name.
	pub fn register(
		&mut self,
		name: impl Into<String>, arity: Arity,
		func: HostFunction
	) -> &mut Self {
		self.funcs.insert(name.into(), Entry { arity, func });
		self
	}

	pub fn contains(&self, name: &str) -> bool {
		self.funcs.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.funcs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.funcs.is_empty()
	}

	/// Call the function registered as `name` after checking the number of
	/// arguments.
	pub fn call(&self, name: &str, args: &[HostValue]) -> Result<Vec<HostValue>, DispatchError> {
		let Some(entry) = self.funcs.get(name) else {
			return Err(DispatchError::NotFound { name: name.to_owned() })
		};
		if !entry.arity.accepts(args.len()) {
			return Err(DispatchError::WrongArity {
				name: name.to_owned(),
				got: args.len(),
				expected: entry.arity,
			})
		}
		(entry.func)(args)
			.map_err(|message| DispatchError::Failed { name: name.to_owned(), message })
	}

	/// Move the registry into the Lua state and push the C function that
	/// dispatches to it.
	///
	/// The registry is dropped once that function is collected or the state
	/// is closed.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error.
	#[cfg(feature = "auxlib")]
	pub unsafe fn push_dispatcher(self, thread: &Thread) {
		debug!(n_functions = self.len(), "installing host function registry");
		unsafe {
			if thread.new_metatable(REGISTRY_TYPE_NAME) {
				thread.push_c_function(registry_gc);
				thread.set_field(-2, GC_METAMETHOD);
			}
			thread.pop(1);

			let block = thread.new_userdata(size_of::<Registry>());
			(block.as_mut_ptr() as *mut Registry).write(self);
			thread.get_metatable_named(REGISTRY_TYPE_NAME);
			thread.set_metatable(-2);

			thread.push_c_closure(dispatch, 1);
		}
	}

	/// Like [`Registry::push_dispatcher`], but store the dispatcher as the
	/// global `name` instead of leaving it on the stack.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error, and the global table
	/// may have a `__newindex` metamethod that raises an error.
	#[cfg(feature = "auxlib")]
	pub unsafe fn install(self, thread: &Thread, name: &CStr) {
		unsafe {
			self.push_dispatcher(thread);
			thread.set_global(name);
		}
	}
}

#[cfg(feature = "auxlib")]
unsafe extern "C-unwind" fn registry_gc(l: *mut State) -> c_int {
	let thread = unsafe { Thread::from_ptr(l) };
	let registry = thread.to_userdata(1) as *mut Registry;
	if !registry.is_null() {
		unsafe { registry.drop_in_place() }
	}
	0
}

/// Read `(name, args...)`, run the host function and push its results.
///
/// On failure, the error message is pushed instead and `Err` is returned, so
/// that nothing owned by Rust is alive when the error is raised.
#[cfg(feature = "auxlib")]
fn dispatch_inner(thread: &Thread, registry: &Registry) -> Result<c_int, ()> {
	let outcome = (|| -> Result<c_int, DispatchError> {
		if thread.kind_of(1) != ValueKind::String {
			return Err(DispatchError::MissingName { got: thread.kind_of(1) })
		}
		let name = match read_value(thread, 1)? {
			HostValue::String(name) => name,
			_ => return Err(DispatchError::MissingName { got: ValueKind::String }),
		};
		let args = (2..=thread.top())
			.map(|idx| read_value(thread, idx))
			.collect::<Result<Vec<_>, _>>()?;

		debug!(function = %name, n_args = args.len(), "dispatching host function");
		let results = registry.call(&name, &args)?;
		thread.pop(thread.top());
		Ok(push_results(thread, &results)?)
	})();

	outcome.map_err(|e| {
		warn!(error = %e, "host function dispatch failed");
		thread.pop(thread.top());
		let message = e.to_string().replace('\0', "\u{FFFD}");
		// Can't fail: NULs were replaced, and the stack was just emptied.
		let _ = push_results(thread, &[HostValue::String(message)]);
	})
}

#[cfg(feature = "auxlib")]
unsafe extern "C-unwind" fn dispatch(l: *mut State) -> c_int {
	let thread = unsafe { Thread::from_ptr(l) };
	let registry = thread.to_userdata(lua_upvalueindex(1)) as *const Registry;
	if registry.is_null() {
		return 0
	}

	match dispatch_inner(thread, unsafe { &*registry }) {
		Ok(n_results) => n_results,
		Err(()) => unsafe {
			let message = thread.to_string(-1).unwrap_or(c"host function failed");
			raise_error(thread, message)
		},
	}
}
