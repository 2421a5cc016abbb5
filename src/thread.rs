//! See [`Thread`].

use core::{
	ffi::{
		c_int, c_void, CStr,
	},
	slice::{from_raw_parts, from_raw_parts_mut},
};

use crate::{
	cdef::*,
	kind::ValueKind,
	shim::*,
};

#[cfg(feature = "auxlib")]
use crate::cdef::auxlib::luaL_loadstring;

/// Borrowed view of a Lua state, used by Rust code that sits on top of the shim.
///
/// This type can never have an instance made of it; there can only be
/// references to it, obtained with [`Thread::from_ptr`].
/// A `&Thread` never owns the state it points to, and nothing in this crate
/// keeps one around after the call that received it returns.
///
/// Every method forwards to the matching entry point in [`shim`](crate::shim),
/// so Rust callers and foreign callers go through the very same catalogue.
///
/// # Thread safety
/// [`Thread`] is neither [`Send`] nor [`Sync`]; a Lua state must be driven from
/// one thread at a time.
#[derive(Debug)]
#[repr(transparent)]
pub struct Thread {
	_no_new: (),
	_not_send: core::marker::PhantomData<*mut State>,
}

impl Thread {
	/// Construct a reference to [`Thread`] from a raw C pointer to a Lua state.
	///
	/// # Safety
	/// `l` must point to a valid Lua state (`lua_State *` in C), for the
	/// duration specified by `'a`.
	pub unsafe fn from_ptr<'a>(l: *mut State) -> &'a Self {
		unsafe { &*(l as *const Self) }
	}

	/// Return the raw C pointer that represents the underlying Lua state.
	pub fn as_ptr(&self) -> *mut State {
		self as *const Self as *mut State
	}

	/// Return the index of the top value.
	pub fn top(&self) -> c_int {
		unsafe { shim_lua_gettop(self.as_ptr()) }
	}

	/// Pop `n` values.
	pub fn pop(&self, n: c_int) {
		unsafe { shim_lua_pop(self.as_ptr(), n) }
	}

	/// Restore the stack to exactly `top` values by popping the excess.
	///
	/// Does nothing if the stack is already at or below `top`.
	pub fn pop_to(&self, top: c_int) {
		let excess = self.top() - top;
		if excess > 0 {
			self.pop(excess)
		}
	}

	/// Ensure that there's room for at least `n` more values on the stack.
	///
	/// Returns `false` if the stack can't grow that far, either because it
	/// would exceed Lua's fixed maximum size or because allocation failed.
	/// The stack is never shrunk.
	pub fn check_stack(&self, n: usize) -> bool {
		match c_int::try_from(n) {
			Ok(n) => (unsafe { lua_checkstack(self.as_ptr(), n) }) != 0,
			Err(_) => false
		}
	}

	/// Push a copy of the value at `idx`.
	pub fn push_value(&self, idx: c_int) {
		unsafe { shim_lua_pushvalue(self.as_ptr(), idx) }
	}

	/// Return the raw type of the value at `idx`.
	pub fn type_of(&self, idx: c_int) -> Type {
		let tag = unsafe { shim_lua_type(self.as_ptr(), idx) };
		Type::try_from(tag).unwrap_or(Type::None)
	}

	/// Return the [`ValueKind`] of the value at `idx`.
	pub fn kind_of(&self, idx: c_int) -> ValueKind {
		unsafe { shim_lua_kind(self.as_ptr(), idx) }
	}

	pub fn is_function(&self, idx: c_int) -> bool {
		(unsafe { shim_lua_isfunction(self.as_ptr(), idx) }) != 0
	}

	pub fn push_nil(&self) {
		unsafe { shim_lua_pushnil(self.as_ptr()) }
	}

	pub fn push_boolean(&self, b: bool) {
		unsafe { shim_lua_pushboolean(self.as_ptr(), b as _) }
	}

	pub fn push_number(&self, n: Number) {
		unsafe { shim_lua_pushnumber(self.as_ptr(), n) }
	}

	/// Push a copy of `s`.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error.
	pub unsafe fn push_string(&self, s: &CStr) {
		unsafe { shim_lua_pushstring(self.as_ptr(), s.as_ptr()) };
	}

	pub fn push_c_function(&self, func: CFunction) {
		unsafe { shim_lua_pushcfunction(self.as_ptr(), func) }
	}

	/// Push a C closure that captures the top `n_upvalues` values, popping
	/// them.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error.
	pub unsafe fn push_c_closure(&self, func: CFunction, n_upvalues: c_int) {
		unsafe { lua_pushcclosure(self.as_ptr(), func, n_upvalues) }
	}

	pub fn to_boolean(&self, idx: c_int) -> bool {
		(unsafe { shim_lua_toboolean(self.as_ptr(), idx) }) != 0
	}

	/// Convert the value at `idx` to a number; `0` if it isn't convertible.
	pub fn to_number(&self, idx: c_int) -> Number {
		unsafe { shim_lua_tonumber(self.as_ptr(), idx) }
	}

	/// Convert the value at `idx` to a string, if it's a string or a number.
	///
	/// The returned string stays valid for as long as the value stays on the
	/// stack.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error while converting a
	/// number.
	pub unsafe fn to_string(&self, idx: c_int) -> Option<&CStr> {
		let str_ptr = unsafe { shim_lua_tostring(self.as_ptr(), idx) };
		if !str_ptr.is_null() {
			Some(unsafe { CStr::from_ptr(str_ptr) })
		} else {
			None
		}
	}

	/// Convert the value at `idx` to a string, if it's a string or a number,
	/// and return all of its bytes, including any embedded NULs.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error while converting a
	/// number.
	pub unsafe fn to_bytes(&self, idx: c_int) -> Option<&[u8]> {
		let mut len = 0;
		let str_ptr = unsafe { lua_tolstring(self.as_ptr(), idx, &mut len as *mut _) };
		if !str_ptr.is_null() {
			Some(unsafe { from_raw_parts(str_ptr as *const u8, len) })
		} else {
			None
		}
	}

	/// Push the global `name` and return its type.
	///
	/// # Safety
	/// The global table may have an `__index` metamethod that raises an error.
	pub unsafe fn get_global(&self, name: &CStr) -> Type {
		let tag = unsafe { shim_lua_getglobal(self.as_ptr(), name.as_ptr()) };
		Type::try_from(tag).unwrap_or(Type::None)
	}

	/// Pop a value and store it as the global `name`.
	///
	/// # Safety
	/// The global table may have a `__newindex` metamethod that raises an error.
	pub unsafe fn set_global(&self, name: &CStr) {
		unsafe { shim_lua_setglobal(self.as_ptr(), name.as_ptr()) }
	}

	/// # Safety
	/// The underlying Lua state may raise a memory error.
	pub unsafe fn new_table(&self) {
		unsafe { shim_lua_newtable(self.as_ptr()) }
	}

	/// # Safety
	/// The table may have a `__newindex` metamethod that raises an error.
	pub unsafe fn set_table(&self, table_idx: c_int) {
		unsafe { shim_lua_settable(self.as_ptr(), table_idx) }
	}

	/// # Safety
	/// The table may have a `__newindex` metamethod that raises an error.
	pub unsafe fn set_field(&self, table_idx: c_int, key: &CStr) {
		unsafe { shim_lua_setfield(self.as_ptr(), table_idx, key.as_ptr()) }
	}

	/// Call a function without protection.
	///
	/// # Safety
	/// Any error raised by the function propagates out of this call.
	pub unsafe fn call(&self, n_args: c_int, n_results: c_int) {
		unsafe { shim_lua_call(self.as_ptr(), n_args, n_results) }
	}

	/// Call a function in protected mode.
	///
	/// Unknown status codes are reported as [`Status::RuntimeError`].
	pub fn pcall(&self, n_args: c_int, n_results: c_int, err_func: c_int) -> Status {
		let code = unsafe { shim_lua_pcall(self.as_ptr(), n_args, n_results, err_func) };
		Status::try_from(code).unwrap_or(Status::RuntimeError)
	}

	/// Push the metatable registered as `type_name`, creating it if needed.
	///
	/// Returns `true` if it was created by this call.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error.
	#[cfg(feature = "auxlib")]
	pub unsafe fn new_metatable(&self, type_name: &CStr) -> bool {
		(unsafe { shim_luaL_newmetatable(self.as_ptr(), type_name.as_ptr()) }) != 0
	}

	/// Push the metatable registered as `type_name` (or `nil`) and return its
	/// type.
	#[cfg(feature = "auxlib")]
	pub fn get_metatable_named(&self, type_name: &CStr) -> Type {
		let tag = unsafe { shim_luaL_getmetatable(self.as_ptr(), type_name.as_ptr()) };
		Type::try_from(tag).unwrap_or(Type::None)
	}

	/// Pop a table (or `nil`) and make it the metatable of the value at
	/// `obj_idx`.
	///
	/// Lua 5.4 always reports success here.
	pub fn set_metatable(&self, obj_idx: c_int) -> bool {
		(unsafe { shim_lua_setmetatable(self.as_ptr(), obj_idx) }) != 0
	}

	/// Push a new full userdata of `size` bytes and return its memory block.
	///
	/// # Safety
	/// The underlying Lua state may raise a memory error.
	/// The returned slice is only valid while the userdata is reachable.
	pub unsafe fn new_userdata<'l>(&'l self, size: usize) -> &'l mut [u8] {
		let udata = unsafe { shim_lua_newuserdata(self.as_ptr(), size) };
		unsafe { from_raw_parts_mut(udata as *mut u8, size) }
	}

	/// Return the address of the userdata at `idx`, or null if it isn't one.
	pub fn to_userdata(&self, idx: c_int) -> *mut c_void {
		unsafe { lua_touserdata(self.as_ptr(), idx) }
	}

	/// Return `true` if the values at the two indices are primitively equal,
	/// which for tables and userdata means they are the same object.
	pub fn raw_equal(&self, idx_a: c_int, idx_b: c_int) -> bool {
		(unsafe { lua_rawequal(self.as_ptr(), idx_a, idx_b) }) != 0
	}

	/// Push the metatable of the value at `obj_idx`, if it has one.
	pub fn get_metatable(&self, obj_idx: c_int) -> bool {
		(unsafe { lua_getmetatable(self.as_ptr(), obj_idx) }) != 0
	}

	/// Load a chunk of Lua code and push it as a function.
	///
	/// On failure, the error message is pushed instead.
	#[cfg(feature = "auxlib")]
	pub fn load_string(&self, code: &CStr) -> Status {
		let code = unsafe { luaL_loadstring(self.as_ptr(), code.as_ptr()) };
		Status::try_from(code).unwrap_or(Status::SyntaxError)
	}
}
