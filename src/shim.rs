//! The catalogue of forwarding entry points.
//!
//! Every function here is exported under an unmangled `shim_*` symbol and
//! forwards its arguments verbatim to exactly one Lua C API primitive (or C
//! macro), returning that primitive's result unchanged.
//! Nothing is validated, retried, defaulted or translated on the way.
//!
//! The entry points exist for callers that can only declare plain function
//! signatures: no variadic arguments, no macros, no type-generic dispatch.
//! Their signatures must be mirrored exactly on the foreign side; in
//! particular [`Number`] follows the `use-32-bits` feature.
//!
//! # Safety
//! All entry points require `l` to point to a valid Lua state that isn't being
//! used concurrently from another thread, and every `*const c_char` to point to
//! a valid C string.
//! Indices are not bounds-checked here; the runtime's own rules apply.
//! Any entry point other than [`shim_lua_pcall`] may raise a Lua error, which
//! leaves the shim with `longjmp` and is never intercepted.

#![allow(non_snake_case)]

use core::ffi::{
	c_char, c_int, c_void,
};

use crate::{
	cdef::*,
	kind::ValueKind,
};

#[cfg(feature = "auxlib")]
use crate::cdef::auxlib::*;

// Global access.

/// Push the value of the global `name`, or `nil` if there's none, and return
/// its type tag.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_getglobal(l: *mut State, name: *const c_char) -> c_int {
	unsafe { lua_getglobal(l, name) }
}

/// Pop a value from the stack and store it as the global `name`.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_setglobal(l: *mut State, name: *const c_char) {
	unsafe { lua_setglobal(l, name) }
}

// Table construction.

/// Push a new empty table.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_newtable(l: *mut State) {
	unsafe { lua_newtable(l) }
}

/// Do `t[k] = v`, where `t` is at `idx`, `v` is on top of the stack and `k` is
/// right below it. Pops both the key and the value.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_settable(l: *mut State, idx: c_int) {
	unsafe { lua_settable(l, idx) }
}

/// Do `t[k] = v`, where `t` is at `idx` and `v` is on top of the stack.
/// Pops the value.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_setfield(l: *mut State, idx: c_int, k: *const c_char) {
	unsafe { lua_setfield(l, idx, k) }
}

// Calling.

/// Call a function in protected mode and return the status code.
///
/// On failure, the function and its arguments are replaced by a single error
/// object.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_pcall(
	l: *mut State,
	n_args: c_int, n_results: c_int,
	err_func: c_int
) -> c_int {
	unsafe { lua_pcall(l, n_args, n_results, err_func) }
}

/// Call a function. Errors propagate out of this call.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_call(l: *mut State, n_args: c_int, n_results: c_int) {
	unsafe { lua_call(l, n_args, n_results) }
}

// Stack bookkeeping.

/// Pop `n` values from the stack.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_pop(l: *mut State, n: c_int) {
	unsafe { lua_pop(l, n) }
}

/// Return the index of the top value, which is also the number of values on
/// the stack.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_gettop(l: *mut State) -> c_int {
	unsafe { lua_gettop(l) }
}

/// Push a copy of the value at `idx`.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_pushvalue(l: *mut State, idx: c_int) {
	unsafe { lua_pushvalue(l, idx) }
}

/// Return the raw type tag of the value at `idx`.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_type(l: *mut State, idx: c_int) -> c_int {
	unsafe { lua_type(l, idx) }
}

/// Return `1` if the value at `idx` is a function, and `0` otherwise.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_isfunction(l: *mut State, idx: c_int) -> c_int {
	(unsafe { lua_isfunction(l, idx) }) as c_int
}

/// Return the [`ValueKind`] of the value at `idx`.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_kind(l: *mut State, idx: c_int) -> ValueKind {
	ValueKind::from_type_tag(unsafe { lua_type(l, idx) })
}

// Value pushing.

/// Push a copy of the C string `s` and return a pointer to Lua's copy.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_pushstring(l: *mut State, s: *const c_char) -> *const c_char {
	unsafe { lua_pushstring(l, s) }
}

/// Push a number.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_pushnumber(l: *mut State, n: Number) {
	unsafe { lua_pushnumber(l, n) }
}

/// Push `true` if `b` is non-zero, and `false` otherwise.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_pushboolean(l: *mut State, b: c_int) {
	unsafe { lua_pushboolean(l, b) }
}

/// Push `nil`.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_pushnil(l: *mut State) {
	unsafe { lua_pushnil(l) }
}

/// Push a C function with no upvalues.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_pushcfunction(l: *mut State, f: CFunction) {
	unsafe { lua_pushcfunction(l, f) }
}

// Value reading.

/// Return `0` if the value at `idx` is `false` or `nil`, and `1` otherwise.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_toboolean(l: *mut State, idx: c_int) -> c_int {
	unsafe { lua_toboolean(l, idx) }
}

/// Convert the value at `idx` to a number, or return `0` if it can't be
/// converted.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_tonumber(l: *mut State, idx: c_int) -> Number {
	unsafe { lua_tonumber(l, idx) }
}

/// Convert the value at `idx` to a string, or return a null pointer if it's
/// neither a string nor a number.
///
/// A number is converted *in place*.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_tostring(l: *mut State, idx: c_int) -> *const c_char {
	unsafe { lua_tostring(l, idx) }
}

// Userdata and metatables.

/// Push the metatable registered as `type_name`, creating it first if needed.
///
/// Returns `1` if the table was created, and `0` if it already existed.
#[cfg(feature = "auxlib")]
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_luaL_newmetatable(l: *mut State, type_name: *const c_char) -> c_int {
	unsafe { luaL_newmetatable(l, type_name) }
}

/// Push the metatable registered as `type_name`, or `nil`, and return its
/// type tag.
#[cfg(feature = "auxlib")]
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_luaL_getmetatable(l: *mut State, type_name: *const c_char) -> c_int {
	unsafe { luaL_getmetatable(l, type_name) }
}

/// Pop a table or `nil` and set it as the metatable of the value at `idx`.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_setmetatable(l: *mut State, idx: c_int) -> c_int {
	unsafe { lua_setmetatable(l, idx) }
}

/// Push a new full userdata of `size` bytes and return its address.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn shim_lua_newuserdata(l: *mut State, size: usize) -> *mut c_void {
	unsafe { lua_newuserdata(l, size) }
}
