//! See [`ModuleBuilder`].

use core::ffi::{
	CStr, c_int,
};

use tracing::debug;

use crate::{
	cdef::{
		CFunction, auxlib::GC_METAMETHOD,
	},
	Thread,
};

/// Field of the module table that keeps the finalizer proxy alive.
pub const GC_PROXY_FIELD: &CStr = c"__gc_proxy";

/// Builder for a module table of C functions, as returned by a `luaopen_*`
/// function.
///
/// The table is pushed when the builder is created, and stays on top of the
/// stack between calls.
///
/// # Examples
/// ```
/// use core::ffi::c_int;
/// use lua_stack_shim::{Lua, ModuleBuilder, Thread, ValueKind, cdef::State};
///
/// unsafe extern "C-unwind" fn l_answer(l: *mut State) -> c_int {
/// 	let lua = unsafe { Thread::from_ptr(l) };
/// 	lua.push_number(42.0);
/// 	1
/// }
///
/// let lua = Lua::new();
/// let n_results = unsafe {
/// 	ModuleBuilder::new(&lua)
/// 		.function(c"answer", l_answer)
/// 		.finish()
/// };
/// assert_eq!(n_results, 1);
/// assert_eq!(lua.kind_of(-1), ValueKind::Table);
/// ```
#[derive(Debug)]
pub struct ModuleBuilder<'l> {
	thread: &'l Thread,
}

impl<'l> ModuleBuilder<'l> {
	/// Push a new, empty module table.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error.
	pub unsafe fn new(thread: &'l Thread) -> Self {
		unsafe { thread.new_table() };
		Self {
			thread
		}
	}

	/// Store `func` in the module table under `name`.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error.
	pub unsafe fn function(self, name: &CStr, func: CFunction) -> Self {
		debug!(name = ?name, "registering module function");
		unsafe {
			self.thread.push_string(name);
			self.thread.push_c_function(func);
			self.thread.set_table(-3);
		}
		self
	}

	/// Arrange for `gc` to run once the module table is collected or the Lua
	/// state is closed.
	///
	/// The metatable registered as `type_name` is created if it doesn't exist
	/// yet, and gets `gc` as its `__gc` metamethod.
	/// A one-byte userdata with that metatable is then stored in the module
	/// table under [`GC_PROXY_FIELD`].
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error.
	pub unsafe fn finalizer(self, type_name: &CStr, gc: CFunction) -> Self {
		let thread = self.thread;
		unsafe {
			let created = thread.new_metatable(type_name);
			debug!(type_name = ?type_name, created, "installing module finalizer");
			thread.push_c_function(gc);
			thread.set_field(-2, GC_METAMETHOD);
			thread.pop(1);

			thread.new_userdata(1);
			thread.get_metatable_named(type_name);
			thread.set_metatable(-2);
			thread.set_field(-2, GC_PROXY_FIELD);
		}
		self
	}

	/// Leave the module table on top of the stack and return the number of
	/// values a `luaopen_*` function should report.
	pub fn finish(self) -> c_int {
		1
	}
}
