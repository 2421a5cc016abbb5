//! Tables, userdata and metatables through the catalogue.

use core::ffi::{
	CStr, c_int,
};

use lua_stack_shim::{
	Lua, ValueKind,
	cdef::{
		Type, lua_getmetatable, lua_rawequal,
	},
	shim::*,
};

/// Run `code` as a chunk and leave its single result on the stack.
fn eval(lua: &Lua, code: &CStr) {
	assert!(lua.load_string(code).is_ok());
	assert!(lua.pcall(0, 1, 0).is_ok());
}

#[test]
fn setfield_stores_into_the_table() {
	let lua = Lua::with_std_libs();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_newtable(l);
		shim_lua_pushnumber(l, 4.0);
		shim_lua_setfield(l, -2, c"legs".as_ptr());
		assert_eq!(shim_lua_gettop(l), 1);
		shim_lua_setglobal(l, c"cat".as_ptr());
	}
	eval(&lua, c"return cat.legs");
	assert_eq!(lua.to_number(-1), 4.0);
}

#[test]
fn settable_uses_the_given_index() {
	let lua = Lua::with_std_libs();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_newtable(l);
		// Filler between the table and the key, so the table is not at -3.
		shim_lua_pushboolean(l, 1);
		shim_lua_pushstring(l, c"key".as_ptr());
		shim_lua_pushstring(l, c"value".as_ptr());
		shim_lua_settable(l, 1);
		assert_eq!(shim_lua_gettop(l), 2);
		assert_eq!(shim_lua_kind(l, -1), ValueKind::Boolean);

		shim_lua_pushvalue(l, 1);
		shim_lua_setglobal(l, c"t".as_ptr());
	}
	eval(&lua, c"return t.key");
	assert_eq!(unsafe { lua.to_string(-1) }, Some(c"value"));
}

#[test]
fn settable_after_newtable_at_minus_three() {
	let lua = Lua::with_std_libs();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_newtable(l);
		shim_lua_pushstring(l, c"n".as_ptr());
		shim_lua_pushnumber(l, 9.0);
		shim_lua_settable(l, -3);
		assert_eq!(shim_lua_gettop(l), 1);
		shim_lua_setglobal(l, c"t".as_ptr());
	}
	eval(&lua, c"return t.n");
	assert_eq!(lua.to_number(-1), 9.0);
}

#[test]
fn newmetatable_is_idempotent() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		assert_eq!(shim_luaL_newmetatable(l, c"Shim.Thing".as_ptr()), 1);
		assert_eq!(shim_luaL_newmetatable(l, c"Shim.Thing".as_ptr()), 0);
		assert_eq!(shim_lua_gettop(l), 2);
		assert_eq!(lua_rawequal(l, -1, -2), 1);

		assert_eq!(shim_luaL_getmetatable(l, c"Shim.Thing".as_ptr()), Type::Table as c_int);
		assert_eq!(lua_rawequal(l, -1, -2), 1);
	}
}

#[test]
fn unknown_metatable_is_nil() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		assert_eq!(shim_luaL_getmetatable(l, c"Shim.Nothing".as_ptr()), Type::Nil as c_int);
		assert_eq!(shim_lua_gettop(l), 1);
	}
}

#[test]
fn userdata_keeps_its_metatable() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		let block = shim_lua_newuserdata(l, 16) as *mut u8;
		assert!(!block.is_null());
		block.write_bytes(0xAB, 16);
		assert_eq!(shim_lua_kind(l, -1), ValueKind::Userdata);

		shim_luaL_newmetatable(l, c"Shim.Block".as_ptr());
		assert_eq!(shim_lua_setmetatable(l, -2), 1);
		assert_eq!(shim_lua_gettop(l), 1);

		assert_ne!(lua_getmetatable(l, 1), 0);
		shim_luaL_getmetatable(l, c"Shim.Block".as_ptr());
		assert_eq!(lua_rawequal(l, -1, -2), 1);
		assert_eq!(*block.add(15), 0xAB);
	}
}

#[test]
fn thread_view_sees_the_same_userdata() {
	let lua = Lua::new();
	let block = unsafe { lua.new_userdata(8) };
	block.copy_from_slice(b"shimshim");
	assert_eq!(lua.to_userdata(-1) as *const u8, block.as_ptr());

	unsafe { lua.new_metatable(c"Shim.View") };
	assert!(lua.set_metatable(-2));
	assert!(lua.get_metatable(-1));
	assert_eq!(lua.get_metatable_named(c"Shim.View"), Type::Table);
	assert!(lua.raw_equal(-1, -2));
}
