/// Create an unnamed function that conforms to the signature of
/// [`CFunction`](crate::cdef::CFunction).
///
/// The macro accepts the pattern for the [`State`](crate::cdef::State) argument,
/// followed by `=>` and the function body.
/// The function is not a closure; it may not capture any variables.
///
/// # Examples
/// ```
/// use lua_stack_shim::prelude::*;
///
/// let lua = Lua::new();
/// lua.push_c_function(lua_function!(l => {
/// 	let lua = unsafe { LuaThread::from_ptr(l) };
/// 	let x = lua.to_number(1);
/// 	lua.push_number(x * x);
/// 	1
/// }));
/// lua.push_number(3.0);
/// assert!(lua.pcall(1, 1, 0).is_ok());
/// assert_eq!(lua.to_number(-1), 9.0);
/// ```
#[macro_export]
macro_rules! lua_function {
	($l:pat => $body:expr) => {{
		unsafe extern "C-unwind" fn __lua_function_inner($l: *mut $crate::cdef::State) -> ::core::ffi::c_int {
			$body
		}
		__lua_function_inner
	}};
}

/// Call a global Lua function from the host with a list of arguments that are
/// converted into [`HostValue`](crate::HostValue)s.
///
/// The "signature" for this macro is
/// `lua_call_global!(thread: &Thread, name: &str, args...)`, and it evaluates
/// to the same [`CallResult`](crate::errors::CallResult) as
/// [`call_global`](crate::host::call_global).
///
/// # Examples
/// ```
/// use lua_stack_shim::prelude::*;
///
/// let lua = Lua::with_std_libs();
/// let results = lua_call_global!(&lua, "math.max", 1).unwrap_err();
/// assert!(matches!(results, lua_stack_shim::errors::CallError::NotAFunction { .. }));
///
/// let results = lua_call_global!(&lua, "tostring", 1.5).unwrap();
/// assert_eq!(results[0].as_str(), Some("1.5"));
/// ```
#[macro_export]
macro_rules! lua_call_global {
	($thread:expr, $name:expr $(, $arg:expr)* $(,)?) => {{
		let thread: &$crate::Thread = $thread;
		$crate::host::call_global(
			thread,
			$name,
			&[$($crate::HostValue::from($arg)),*]
		)
	}};
}
