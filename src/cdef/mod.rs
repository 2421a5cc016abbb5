//! Raw Lua 5.4 declarations that the shim forwards to.
//!
//! Only the part of `lua.h` that the shim catalogue and its Rust callers use is
//! declared here. C macros from the header are provided as `unsafe fn`s with
//! the same names.
//!
//! With the `auxlib` feature there is also [`auxlib`] for `lauxlib.h`, and with
//! the `stdlibs` feature there is [`stdlibs`] for `lualib.h`.
//!
//! # Safety
//! Functions that raise an error *will not run any Rust drop glue upon doing so*.
//! Lua errors are implemented with `longjmp`, which skips Rust frames entirely.

use core::{
	ffi::{
		c_char, c_int, c_void,
	},
	ptr::null_mut,
};

#[cfg(feature = "auxlib")]
pub mod auxlib;

#[cfg(feature = "stdlibs")]
pub mod stdlibs;

/// Lua version number.
pub const VERSION_NUM: Number = 504 as _;

/// Option for multiple returns in `lua_pcall` and `lua_call`.
pub const MULT_RET: c_int = -1;

mod widths {
	use core::ffi::c_int;

	#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
	pub const MAX_STACK: c_int = 1000000;

	#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
	pub const MAX_STACK: c_int = 15000;

	#[cfg(feature = "use-32-bits")]
	mod numeric {
		use core::ffi::{
			c_float, c_int,
		};

		pub type Integer = c_int;
		pub type Number = c_float;
	}

	#[cfg(not(feature = "use-32-bits"))]
	mod numeric {
		use core::ffi::{
			c_double, c_longlong,
		};

		pub type Integer = c_longlong;
		pub type Number = c_double;
	}

	pub use numeric::{
		Integer, Number,
	};
}

/// Type of Lua numbers.
/// Also known as `lua_Number`.
///
/// This is `c_double`, or `c_float` with the `use-32-bits` feature.
/// It has to match the linked Lua exactly, since values cross the foreign
/// boundary bit-for-bit.
pub use widths::Number;

/// Type of signed Lua integers.
/// Also known as `lua_Integer`.
pub use widths::Integer;

/// Size limit for the Lua stack.
/// This cannot be changed for Lua that's already compiled.
pub use widths::MAX_STACK;

/// Pseudo-index that points to a Lua global state's registry.
pub const REGISTRY_INDEX: c_int = -MAX_STACK - 1000;

/// Pseudo-index of the `i`-th upvalue of the running C closure, counting
/// from `1`. Same as the `lua_upvalueindex` C macro.
pub const fn lua_upvalueindex(i: c_int) -> c_int {
	REGISTRY_INDEX - i
}

macro_rules! c_int_enum {
	(
		$(#[$attr:meta])*
		$vis:vis enum $name:ident {
			$(
				$(#[$variant_attr:meta])*
				$variant:ident = $def:expr,
			)*
		}
	) => {
		$(#[$attr])*
		$vis enum $name {
			$(
				$(#[$variant_attr])*
				$variant = $def as c_int as _
			),*
		}

		impl $name {
			/// Construct an instance of this enum from a [`c_int`] without
			/// checking if that value is valid.
			///
			/// # Safety
			/// `value` must correspond to a variant.
			pub const unsafe fn from_c_int_unchecked(value: c_int) -> Self {
				match value {
					$($def => Self::$variant,)*
					_ => unsafe { ::core::hint::unreachable_unchecked() }
				}
			}
		}

		impl From<$name> for c_int {
			fn from(value: $name) -> c_int {
				value as c_int
			}
		}

		impl TryFrom<c_int> for $name {
			type Error = ();
			fn try_from(value: c_int) -> Result<Self, Self::Error> {
				match value {
					$(
						$def => Ok(Self::$variant),
					)*
					_ => Err(())
				}
			}
		}
	};
}
pub(crate) use c_int_enum;

c_int_enum! {
	/// Lua status code enumeration, as returned by a protected call.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
	pub enum Status {
		/// No errors.
		/// Also known as `LUA_OK`.
		Ok = 0,
		/// Yielded.
		/// Also known as `LUA_YIELD`.
		Yielded = 1,
		/// Encountered a runtime error.
		/// Also known as `LUA_ERRRUN`.
		RuntimeError = 2,
		/// Encountered a syntax error.
		/// Also known as `LUA_ERRSYNTAX`.
		SyntaxError = 3,
		/// Encountered a memory-related error.
		/// Also known as `LUA_ERRMEM`.
		MemoryError = 4,
		/// Encountered some error while running the message handler.
		/// Also known as `LUA_ERRERR`.
		HandlerError = 5,
		/// Encountered a file-related error.
		/// Also known as `LUA_ERRFILE`.
		FileError = 6,
	}
}

impl Status {
	/// Return true if the status represents no error.
	///
	/// # Examples
	/// ```
	/// use lua_stack_shim::cdef::Status;
	/// assert!(Status::Ok.is_ok());
	/// assert!(Status::Yielded.is_ok());
	/// assert!(!Status::RuntimeError.is_ok());
	/// ```
	pub const fn is_ok(self) -> bool {
		matches!(self, Self::Ok | Self::Yielded)
	}

	/// Return a short, human-readable description of the status.
	pub const fn describe(self) -> &'static str {
		match self {
			Self::Ok => "ok",
			Self::Yielded => "yielded",
			Self::RuntimeError => "runtime error",
			Self::SyntaxError => "syntax error",
			Self::MemoryError => "memory error",
			Self::HandlerError => "error in message handler",
			Self::FileError => "file error",
		}
	}
}

c_int_enum! {
	/// Raw Lua type tag, as returned by `lua_type`.
	///
	/// See [`ValueKind`](crate::ValueKind) for the closed form handed to
	/// foreign callers.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
	pub enum Type {
		/// "Pseudo-type" for an index with no value at it.
		None = -1,
		/// `nil`.
		Nil = 0,
		/// `true` or `false`.
		Boolean = 1,
		/// Light userdata, which is a plain pointer.
		LightUserdata = 2,
		/// Number, which may be an integer.
		Number = 3,
		/// Garbage-collected string.
		String = 4,
		/// Table.
		Table = 5,
		/// Lua function or C function.
		Function = 6,
		/// Full userdata, which is a garbage-collected memory block.
		Userdata = 7,
		/// Coroutine.
		Thread = 8,
	}
}

/// Opaque type that represents a Lua state.
/// Also known as `lua_State`.
///
/// This type is only ever used behind a pointer.
#[repr(C)]
#[derive(Debug)]
pub struct State {
	_data: [u8; 0],
	_marker: core::marker::PhantomData<(*mut u8, core::marker::PhantomPinned)>
}

/// C function registered with Lua.
/// Also known as `lua_CFunction`.
///
/// The function receives the state it was called in, with its arguments on the
/// stack, and returns the number of results it pushed.
pub type CFunction = unsafe extern "C-unwind" fn(l: *mut State) -> c_int;

/// Type of the context used for continuation functions.
/// Also known as `lua_KContext`.
pub type KContext = isize;

/// Continuation function.
/// Also known as `lua_KFunction`.
///
/// The shim never installs continuations; this type only exists so that
/// `lua_callk` and `lua_pcallk` are declared with their real signatures.
pub type KFunction = unsafe extern "C-unwind" fn (
	l: *mut State, status: c_int, ctx: KContext
) -> c_int;

macro_rules! lua_state_func {
	(
		$(
			$(#[$attr:meta])*
			$vis:vis fn $name:ident(self $($param:tt)*) $( -> $ret:ty )?;
		)*
	) => {
		$(
			$(#[$attr])*
			$vis fn $name(l: *mut $crate::cdef::State $($param)*) $( -> $ret )?;
		)*
	};
}
pub(crate) use lua_state_func;

#[cfg_attr(all(feature = "link-system", feature = "link-dynamic", target_os = "windows"), link(name = "lua54", kind = "raw-dylib"))]
#[cfg_attr(all(feature = "link-system", feature = "link-dynamic", not(target_os = "windows")), link(name = "lua5.4", kind = "dylib"))]
#[cfg_attr(all(feature = "link-system", not(feature = "link-dynamic"), target_os = "windows"), link(name = "lua54", kind = "static"))]
#[cfg_attr(all(feature = "link-system", not(feature = "link-dynamic"), not(target_os = "windows")), link(name = "lua5.4", kind = "static"))]
unsafe extern "C-unwind" {
	pub fn lua_close(l: *mut State);

	lua_state_func! {
		pub fn lua_atpanic(
			self, panicf: Option<CFunction>
		) -> Option<CFunction>;

		pub fn lua_gettop(self) -> c_int;
		pub fn lua_settop(self, idx: c_int);
		pub fn lua_pushvalue(self, idx: c_int);
		pub fn lua_checkstack(self, n: c_int) -> c_int;

		pub fn lua_type(self, idx: c_int) -> c_int;

		pub fn lua_tonumberx(self, idx: c_int, is_num: *mut c_int) -> Number;
		pub fn lua_toboolean(self, idx: c_int) -> c_int;
		pub fn lua_tolstring(
			self, idx: c_int, len: *mut usize
		) -> *const c_char;
		pub fn lua_touserdata(self, idx: c_int) -> *mut c_void;
		pub fn lua_rawequal(self, idx_a: c_int, idx_b: c_int) -> c_int;

		pub fn lua_pushnil(self);
		pub fn lua_pushnumber(self, n: Number);
		pub fn lua_pushstring(self, s: *const c_char) -> *const c_char;
		pub fn lua_pushcclosure(self, func: CFunction, n: c_int);
		pub fn lua_pushboolean(self, b: c_int);

		pub fn lua_getglobal(self, name: *const c_char) -> c_int;
		pub fn lua_getfield(self, idx: c_int, k: *const c_char) -> c_int;

		pub fn lua_createtable(self, n_arr: c_int, n_rec: c_int);
		pub fn lua_newuserdatauv(
			self, sz: usize, n_uvalue: c_int
		) -> *mut c_void;
		pub fn lua_getmetatable(self, obj_index: c_int) -> c_int;

		pub fn lua_setglobal(self, name: *const c_char);
		pub fn lua_settable(self, idx: c_int);
		pub fn lua_setfield(self, idx: c_int, k: *const c_char);
		pub fn lua_setmetatable(self, obj_index: c_int) -> c_int;

		/// # Note
		/// The C header declares this as returning `int`, but the function
		/// never returns.
		pub fn lua_error(self) -> !;

		pub fn lua_callk(
			self,
			n_args: c_int, n_results: c_int,
			ctx: KContext, k: Option<KFunction>
		);
		pub fn lua_pcallk(
			self,
			n_args: c_int, n_results: c_int,
			err_func: c_int,
			ctx: KContext, k: Option<KFunction>
		) -> c_int;
	}
}

/// Equivalent to the `lua_call` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe fn lua_call(l: *mut State, n_args: c_int, n_results: c_int) {
	unsafe { lua_callk(l, n_args, n_results, 0, None) }
}

/// Equivalent to the `lua_pcall` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe fn lua_pcall(
	l: *mut State,
	n_args: c_int, n_results: c_int,
	err_func: c_int
) -> c_int {
	unsafe { lua_pcallk(l, n_args, n_results, err_func, 0, None) }
}

/// Equivalent to the `lua_pop` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe fn lua_pop(l: *mut State, n: c_int) {
	unsafe { lua_settop(l, -n - 1) }
}

/// Equivalent to the `lua_newtable` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe fn lua_newtable(l: *mut State) {
	unsafe { lua_createtable(l, 0, 0) }
}

/// Equivalent to the `lua_newuserdata` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe fn lua_newuserdata(l: *mut State, sz: usize) -> *mut c_void {
	unsafe { lua_newuserdatauv(l, sz, 1) }
}

/// Equivalent to the `lua_pushcfunction` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe fn lua_pushcfunction(l: *mut State, func: CFunction) {
	unsafe { lua_pushcclosure(l, func, 0) }
}

/// Equivalent to the `lua_tonumber` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe fn lua_tonumber(l: *mut State, idx: c_int) -> Number {
	unsafe { lua_tonumberx(l, idx, null_mut()) }
}

/// Equivalent to the `lua_tostring` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe fn lua_tostring(l: *mut State, idx: c_int) -> *const c_char {
	unsafe { lua_tolstring(l, idx, null_mut()) }
}

/// Equivalent to the `lua_isfunction` C macro.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe fn lua_isfunction(l: *mut State, idx: c_int) -> bool {
	(unsafe { lua_type(l, idx) }) == Type::Function as c_int
}
