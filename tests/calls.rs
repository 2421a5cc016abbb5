//! Protected and unprotected calls through the catalogue.

use core::ffi::{
	CStr, c_int,
};

use lua_stack_shim::{
	Lua, Status,
	cdef::State,
	lua_function,
	shim::*,
};

unsafe extern "C-unwind" fn l_sum(l: *mut State) -> c_int {
	let mut total = 0.0;
	unsafe {
		for idx in 1..=shim_lua_gettop(l) {
			total += shim_lua_tonumber(l, idx);
		}
		shim_lua_pushnumber(l, total);
	}
	1
}

#[test]
fn protected_error_leaves_one_value() {
	let lua = Lua::with_std_libs();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_pushstring(l, c"below".as_ptr());
		let base = shim_lua_gettop(l);

		assert!(lua.load_string(c"local a, b = ...; error('boom: ' .. a .. b)").is_ok());
		shim_lua_pushstring(l, c"x".as_ptr());
		shim_lua_pushstring(l, c"y".as_ptr());
		let status = shim_lua_pcall(l, 2, 0, 0);

		assert_ne!(status, 0);
		assert_eq!(Status::try_from(status), Ok(Status::RuntimeError));
		assert_eq!(shim_lua_gettop(l), base + 1);
		let message = CStr::from_ptr(shim_lua_tostring(l, -1)).to_string_lossy();
		assert!(message.contains("boom: xy"), "{message}");
		assert_eq!(CStr::from_ptr(shim_lua_tostring(l, base)), c"below");
	}
}

#[test]
fn protected_error_with_any_error_object() {
	let lua = Lua::with_std_libs();
	let l = lua.as_ptr();
	assert!(lua.load_string(c"error({ code = 7 })").is_ok());
	unsafe {
		assert_ne!(shim_lua_pcall(l, 0, 0, 0), 0);
		assert_eq!(shim_lua_gettop(l), 1);
		assert_eq!(shim_lua_kind(l, -1), lua_stack_shim::ValueKind::Table);
	}
}

#[test]
fn error_handler_slot_is_used() {
	let lua = Lua::with_std_libs();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_pushcfunction(l, lua_function!(l => {
			unsafe { shim_lua_pushstring(l, c"handled".as_ptr()) };
			1
		}));
		assert!(lua.load_string(c"error('raw')").is_ok());
		assert_ne!(shim_lua_pcall(l, 0, 0, 1), 0);
		assert_eq!(CStr::from_ptr(shim_lua_tostring(l, -1)), c"handled");
	}
}

#[test]
fn successful_pcall_returns_zero() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_pushcfunction(l, l_sum);
		shim_lua_pushnumber(l, 1.5);
		shim_lua_pushnumber(l, 2.5);
		assert_eq!(shim_lua_pcall(l, 2, 1, 0), 0);
		assert_eq!(shim_lua_gettop(l), 1);
		assert_eq!(shim_lua_tonumber(l, -1), 4.0);
	}
}

#[test]
fn global_c_function_matches_direct_call() {
	let lua = Lua::new();
	let l = lua.as_ptr();
	unsafe {
		shim_lua_pushcfunction(l, l_sum);
		assert_eq!(shim_lua_isfunction(l, -1), 1);
		shim_lua_setglobal(l, c"sum".as_ptr());

		shim_lua_getglobal(l, c"sum".as_ptr());
		for n in [1.0, 2.0, 3.0] {
			shim_lua_pushnumber(l, n);
		}
		assert_eq!(shim_lua_pcall(l, 3, 1, 0), 0);
		let through_global = shim_lua_tonumber(l, -1);
		shim_lua_pop(l, 1);

		shim_lua_pushcfunction(l, l_sum);
		for n in [1.0, 2.0, 3.0] {
			shim_lua_pushnumber(l, n);
		}
		shim_lua_call(l, 3, 1);
		let direct = shim_lua_tonumber(l, -1);

		assert_eq!(through_global, direct);
		assert_eq!(direct, 6.0);
	}
}

#[test]
fn unprotected_call_passes_results_through() {
	let lua = Lua::with_std_libs();
	let l = lua.as_ptr();
	assert!(lua.load_string(c"return 1, 2, 3").is_ok());
	unsafe {
		shim_lua_call(l, 0, lua_stack_shim::cdef::MULT_RET);
		assert_eq!(shim_lua_gettop(l), 3);
		assert_eq!(shim_lua_tonumber(l, 1), 1.0);
		assert_eq!(shim_lua_tonumber(l, 3), 3.0);
	}
}

#[test]
fn syntax_errors_come_from_loading() {
	let lua = Lua::new();
	assert_eq!(lua.load_string(c"return +"), Status::SyntaxError);
	assert_eq!(lua.top(), 1);
}
