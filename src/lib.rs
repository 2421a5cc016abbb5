//! # lua-stack-shim
//! Plain, fixed-arity trampolines over the Lua 5.4 C API.
//!
//! Much of the Lua C API is made of C macros (`lua_pop`, `lua_newtable`,
//! `lua_pcall`, ...) and variadic functions, which a foreign-function caller
//! that can only declare plain function signatures cannot use.
//! The [`shim`] module exports one `shim_*` symbol per primitive instead, each
//! forwarding its arguments verbatim and returning the primitive's result
//! unchanged.
//!
//! On top of the catalogue, Rust callers get:
//! - [`Thread`], a borrowed view of a Lua state whose methods go through the
//!   catalogue;
//! - [`Lua`], an owned state for embedding and tests;
//! - [`host`], for moving values between Rust and the stack and calling Lua
//!   functions by name;
//! - [`Registry`], for exposing named Rust functions to Lua code;
//! - [`ModuleBuilder`], for assembling a `luaopen_*` module table.
//!
//! # Features
//! - `auxlib` (default): `lauxlib.h` definitions, the metatable entry points,
//!   [`Lua::new`] and [`ModuleBuilder`].
//! - `stdlibs` (default): `lualib.h` definitions.
//! - `vendored` (default): build Lua 5.4 from source and link it statically.
//! - `link-system`, `link-dynamic`: link a system Lua 5.4 instead.
//! - `use-32-bits`: match a Lua built with `LUA_32BITS`.

pub mod cdef;
pub use cdef::{
	CFunction,
	Number,
	State,
	Status,
	Type,
};

pub mod errors;
pub mod host;
pub use host::HostValue;

pub mod kind;
pub use kind::ValueKind;

pub mod shim;

mod macros;

#[cfg(feature = "auxlib")]
pub mod module;
#[cfg(feature = "auxlib")]
pub use module::ModuleBuilder;

pub mod prelude;

pub mod registry;
pub use registry::Registry;

pub mod state;
pub use state::Lua;

pub mod thread;
pub use thread::Thread;
