//! Catalogue entry points driven the way a foreign caller would: raw state
//! pointer in, native values out.

use core::ffi::{
	CStr, c_int,
};

use lua_stack_shim::{
	Lua, ValueKind,
	cdef::Type,
	shim::*,
};

#[test]
fn strings_round_trip() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		let copy = shim_lua_pushstring(l, c"hello, shim".as_ptr());
		assert!(!copy.is_null());
		let read = CStr::from_ptr(shim_lua_tostring(l, -1));
		assert_eq!(read, c"hello, shim");
		assert_eq!(shim_lua_type(l, -1), Type::String as c_int);
	}
}

#[test]
fn numbers_round_trip() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	for n in [0.0, -1.5, 3.25, 1e300, f64::MIN_POSITIVE] {
		unsafe {
			shim_lua_pushnumber(l, n);
			assert_eq!(shim_lua_tonumber(l, -1), n);
			shim_lua_pop(l, 1);
		}
	}
}

#[test]
fn booleans_round_trip() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_pushboolean(l, 1);
		shim_lua_pushboolean(l, 0);
		assert_eq!(shim_lua_toboolean(l, -2), 1);
		assert_eq!(shim_lua_toboolean(l, -1), 0);
		assert_eq!(shim_lua_kind(l, -1), ValueKind::Boolean);
	}
}

#[test]
fn nil_round_trips() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_pushnil(l);
		assert_eq!(shim_lua_type(l, -1), Type::Nil as c_int);
		assert_eq!(shim_lua_toboolean(l, -1), 0);
		assert!(shim_lua_tostring(l, -1).is_null());
	}
}

#[test]
fn coercions_follow_the_runtime() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_pushstring(l, c"not a number".as_ptr());
		assert_eq!(shim_lua_tonumber(l, -1), 0.0);

		shim_lua_pushstring(l, c"  12.5 ".as_ptr());
		assert_eq!(shim_lua_tonumber(l, -1), 12.5);

		// Numbers are converted to strings in place.
		shim_lua_pushnumber(l, 7.0);
		let text = CStr::from_ptr(shim_lua_tostring(l, -1));
		assert_eq!(text, c"7.0");
		assert_eq!(shim_lua_type(l, -1), Type::String as c_int);

		shim_lua_newtable(l);
		assert!(shim_lua_tostring(l, -1).is_null());
		assert_eq!(shim_lua_toboolean(l, -1), 1);
	}
}

#[test]
fn pop_shrinks_the_stack() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		for i in 0..5 {
			shim_lua_pushnumber(l, i as _);
		}
		assert_eq!(shim_lua_gettop(l), 5);
		shim_lua_pop(l, 2);
		assert_eq!(shim_lua_gettop(l), 3);
		shim_lua_pop(l, 0);
		assert_eq!(shim_lua_gettop(l), 3);
		assert_eq!(shim_lua_tonumber(l, -1), 2.0);
		shim_lua_pop(l, 3);
		assert_eq!(shim_lua_gettop(l), 0);
	}
}

#[test]
fn pushvalue_duplicates() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_pushnumber(l, 1.0);
		shim_lua_pushnumber(l, 2.0);
		shim_lua_pushvalue(l, 1);
		assert_eq!(shim_lua_gettop(l), 3);
		assert_eq!(shim_lua_tonumber(l, -1), 1.0);
	}
}

#[test]
fn empty_slots_are_other() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		assert_eq!(shim_lua_type(l, 1), Type::None as c_int);
		assert_eq!(shim_lua_kind(l, 1), ValueKind::Other);
		assert_eq!(shim_lua_isfunction(l, 1), 0);
	}
}

#[test]
fn missing_globals_are_nil() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		let tag = shim_lua_getglobal(l, c"does_not_exist".as_ptr());
		assert_eq!(tag, Type::Nil as c_int);
		assert_eq!(shim_lua_gettop(l), 1);
		assert_eq!(shim_lua_kind(l, -1), ValueKind::Nil);
	}
}

#[test]
fn globals_round_trip() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_pushstring(l, c"stored".as_ptr());
		shim_lua_setglobal(l, c"answer".as_ptr());
		assert_eq!(shim_lua_gettop(l), 0);

		assert_eq!(shim_lua_getglobal(l, c"answer".as_ptr()), Type::String as c_int);
		assert_eq!(CStr::from_ptr(shim_lua_tostring(l, -1)), c"stored");
	}
}
