//! Prelude that re-exports useful things, but prepends `Lua` or `lua_` to
//! them to prevent name clashes.

#[cfg(feature = "auxlib")]
pub use crate::module::ModuleBuilder as LuaModuleBuilder;

pub use {
	crate::cdef::{
		CFunction as LuaCFunction,
		Number as LuaNumber,
		State as LuaState,
		Status as LuaStatus,
		Type as LuaType,
	},
	crate::errors::{
		CallError as LuaCallError,
		DispatchError as LuaDispatchError,
		HostError as LuaHostError,
	},
	crate::host::HostValue as LuaHostValue,
	crate::kind::ValueKind as LuaValueKind,
	crate::registry::{
		Arity as LuaArity,
		Registry as LuaRegistry,
	},
	crate::state::Lua,
	crate::thread::Thread as LuaThread,
	crate::lua_call_global,
	crate::lua_function,
};
