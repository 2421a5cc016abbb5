//! See [`Lua`].

use core::{
	ffi::{
		CStr, c_int,
	},
	ops::Deref,
};

use crate::{
	cdef::*,
	Thread,
};

#[cfg(feature = "auxlib")]
use crate::cdef::auxlib::luaL_newstate;

/// Panic function installed by [`Lua`] for errors raised outside of any
/// protected call.
///
/// # Safety
/// `l` must be a valid pointer to a Lua state.
pub unsafe extern "C-unwind" fn lua_panic_handler(l: *mut State) -> c_int {
	let msg_ptr = unsafe { lua_tostring(l, -1) };
	let msg = if !msg_ptr.is_null() {
		let msg = unsafe { CStr::from_ptr(msg_ptr) };
		msg.to_str().unwrap_or("error object does not contain valid UTF-8")
	} else {
		"error object is not a string"
	};
	tracing::error!(error = msg, "unprotected error in call to Lua API");
	panic!("unprotected error in call to Lua API ({msg})")
}

/// Owned main Lua state.
///
/// This is the layer that opens and closes the runtime; the shim catalogue
/// itself only ever borrows a state.
/// [`Lua`] derefs to [`Thread`] and closes the state when dropped, which also
/// runs every pending `__gc` metamethod.
///
/// # Thread safety
/// [`Lua`] isn't [`Send`] nor [`Sync`], since a Lua state compiled with the
/// default `lua_lock` and `lua_unlock` does no synchronization.
#[derive(Debug)]
#[repr(transparent)]
pub struct Lua {
	thread: &'static Thread,
}

impl Drop for Lua {
	fn drop(&mut self) {
		tracing::debug!("closing Lua state");
		unsafe { lua_close(self.thread.as_ptr()) }
	}
}

impl AsRef<Thread> for Lua {
	fn as_ref(&self) -> &Thread {
		self.thread
	}
}

impl Deref for Lua {
	type Target = Thread;

	fn deref(&self) -> &Self::Target {
		self.thread
	}
}

impl Lua {
	unsafe fn from_new_ptr(l: *mut State) -> Option<Self> {
		if l.is_null() {
			return None
		}

		let thread = unsafe { Thread::from_ptr(l) };
		unsafe { lua_atpanic(l, Some(lua_panic_handler)) };
		Some(Self {
			thread
		})
	}

	/// Construct a new [`Lua`] using the `lauxlib` function [`luaL_newstate`].
	///
	/// The function will return `None` if allocation failed.
	#[cfg(feature = "auxlib")]
	pub fn try_new() -> Option<Self> {
		let lua = unsafe { Self::from_new_ptr(luaL_newstate()) };
		tracing::debug!(ok = lua.is_some(), "opened Lua state");
		lua
	}

	/// Construct a new [`Lua`] using the `lauxlib` function [`luaL_newstate`].
	///
	/// Unlike [`Lua::try_new`], this function never fails.
	#[cfg(feature = "auxlib")]
	pub fn new() -> Self {
		match Self::try_new() {
			Some(lua) => lua,
			None => panic!("not enough memory to create Lua state using the `lauxlib.h` allocator"),
		}
	}

	/// Construct a new [`Lua`] with all standard libraries opened.
	#[cfg(all(feature = "auxlib", feature = "stdlibs"))]
	pub fn with_std_libs() -> Self {
		let lua = Self::new();
		lua.open_std_libs();
		lua
	}

	/// Open all standard Lua libraries into the global table.
	#[cfg(feature = "stdlibs")]
	pub fn open_std_libs(&self) {
		unsafe { stdlibs::luaL_openlibs(self.thread.as_ptr()) }
	}

	/// Return the raw pointer to the underlying Lua state.
	pub fn as_ptr(&self) -> *mut State {
		self.thread.as_ptr()
	}
}

#[cfg(feature = "auxlib")]
impl Default for Lua {
	fn default() -> Self {
		Self::new()
	}
}
