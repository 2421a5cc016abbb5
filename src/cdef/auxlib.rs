//! FFI definitions for the part of `lauxlib.h` the shim uses.

#![allow(non_snake_case)]

use super::*;

use core::ffi::CStr;

/// Name of the metatable field that Lua calls when a value is collected.
pub const GC_METAMETHOD: &CStr = c"__gc";

#[cfg_attr(all(feature = "link-system", feature = "link-dynamic", target_os = "windows"), link(name = "lua54", kind = "raw-dylib"))]
#[cfg_attr(all(feature = "link-system", feature = "link-dynamic", not(target_os = "windows")), link(name = "lua5.4", kind = "dylib"))]
#[cfg_attr(all(feature = "link-system", not(feature = "link-dynamic"), target_os = "windows"), link(name = "lua54", kind = "static"))]
#[cfg_attr(all(feature = "link-system", not(feature = "link-dynamic"), not(target_os = "windows")), link(name = "lua5.4", kind = "static"))]
unsafe extern "C-unwind" {
	pub fn luaL_newstate() -> *mut State;

	lua_state_func! {
		pub fn luaL_newmetatable(self, type_name: *const c_char) -> c_int;
		pub fn luaL_loadstring(self, code: *const c_char) -> c_int;
	}
}

/// Equivalent to the `luaL_getmetatable` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state,
/// and `name` must be a valid C string.
pub unsafe fn luaL_getmetatable(l: *mut State, name: *const c_char) -> c_int {
	unsafe { lua_getfield(l, REGISTRY_INDEX, name) }
}
