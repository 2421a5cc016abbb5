//! Module tables assembled with `ModuleBuilder`.

use core::{
	ffi::c_int,
	sync::atomic::{
		AtomicUsize, Ordering,
	},
};

use lua_stack_shim::{
	HostValue, Lua, ModuleBuilder, Thread, ValueKind,
	cdef::State,
	host::call_global,
	module::GC_PROXY_FIELD,
};

unsafe extern "C-unwind" fn l_double(l: *mut State) -> c_int {
	let lua = unsafe { Thread::from_ptr(l) };
	let n = lua.to_number(1);
	lua.push_number(n * 2.0);
	1
}

unsafe extern "C-unwind" fn l_greet(l: *mut State) -> c_int {
	let lua = unsafe { Thread::from_ptr(l) };
	unsafe { lua.push_string(c"hi") };
	1
}

#[test]
fn functions_are_reachable_from_lua() {
	let lua = Lua::with_std_libs();
	let n = unsafe {
		ModuleBuilder::new(&lua)
			.function(c"double", l_double)
			.function(c"greet", l_greet)
			.finish()
	};
	assert_eq!(n, 1);
	assert_eq!(lua.top(), 1);
	unsafe { lua.set_global(c"shimmod") };

	assert!(lua.load_string(c"function run(x) return shimmod.double(x), shimmod.greet() end").is_ok());
	assert!(lua.pcall(0, 0, 0).is_ok());
	let results = call_global(&lua, "run", &[HostValue::from(21)]).unwrap();
	assert_eq!(results, vec![HostValue::Number(42.0), HostValue::String("hi".into())]);
}

static CLOSED: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C-unwind" fn l_on_close(_l: *mut State) -> c_int {
	CLOSED.fetch_add(1, Ordering::SeqCst);
	0
}

#[test]
fn finalizer_runs_once_on_close() {
	let lua = Lua::with_std_libs();
	unsafe {
		ModuleBuilder::new(&lua)
			.function(c"double", l_double)
			.finalizer(c"Shim.ModuleProxy", l_on_close)
			.finish();
	}
	assert_eq!(lua.top(), 1);
	assert_eq!(lua.kind_of(-1), ValueKind::Table);
	unsafe { lua.set_global(c"closing") };
	assert_eq!(CLOSED.load(Ordering::SeqCst), 0);

	drop(lua);
	assert_eq!(CLOSED.load(Ordering::SeqCst), 1);
}

#[test]
fn proxy_field_holds_tagged_userdata() {
	unsafe extern "C-unwind" fn l_nothing(_l: *mut State) -> c_int {
		0
	}

	let lua = Lua::new();
	unsafe {
		ModuleBuilder::new(&lua)
			.finalizer(c"Shim.Tagged", l_nothing)
			.finish();
		lua.set_global(c"tagged");
	}
	assert_eq!(GC_PROXY_FIELD, c"__gc_proxy");
	assert!(lua.load_string(c"return tagged.__gc_proxy").is_ok());
	assert!(lua.pcall(0, 1, 0).is_ok());
	assert_eq!(lua.kind_of(-1), ValueKind::Userdata);

	assert!(lua.get_metatable(-1));
	assert_eq!(lua.get_metatable_named(c"Shim.Tagged"), lua_stack_shim::Type::Table);
	assert!(lua.raw_equal(-1, -2));
}
