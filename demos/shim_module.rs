//! Loadable Lua module built on the shim, e.g. `require "shim_module"`.
//!
//! `kind(v)` returns the name of the value kind of `v`, and `call(name, ...)`
//! calls a global function by name through the host layer.

use core::ffi::c_int;
use lua_stack_shim::{
	host::{
		call_global, push_results, read_args,
	},
	prelude::*,
};

unsafe extern "C-unwind" fn l_call(l: *mut LuaState) -> c_int {
	// SAFETY: Caller ensures `l` is valid.
	let lua = unsafe { LuaThread::from_ptr(l) };

	let Ok(mut args) = read_args(lua) else {
		return 0
	};
	if args.is_empty() {
		return 0
	}
	let name = match args.remove(0) {
		LuaHostValue::String(name) => name,
		_ => return 0,
	};
	lua.pop(lua.top());

	match call_global(lua, &name, &args) {
		Ok(results) => push_results(lua, &results).unwrap_or(0),
		Err(e) => {
			let message = LuaHostValue::String(e.to_string());
			lua.push_nil();
			push_results(lua, &[message]).map(|n| n + 1).unwrap_or(1)
		}
	}
}

#[unsafe(no_mangle)]
unsafe extern "C-unwind" fn luaopen_shim_module(l: *mut LuaState) -> c_int {
	// SAFETY: Caller ensures `l` is valid.
	let lua = unsafe { LuaThread::from_ptr(l) };

	// SAFETY: An error being raised will not skip any important pieces of code.
	unsafe {
		LuaModuleBuilder::new(lua)
			.function(c"kind", lua_function!(l => {
				let lua = unsafe { LuaThread::from_ptr(l) };
				let name = lua.kind_of(1).name();
				let Ok(n) = push_results(lua, &[LuaHostValue::from(name)]) else {
					return 0
				};
				n
			}))
			.function(c"call", l_call)
			.finish()
	}
}
