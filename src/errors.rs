//! Error types for the host layer.
//!
//! The shim catalogue never produces these: its entry points return exactly
//! what Lua returns. They only exist for [`host`](crate::host), which turns
//! stack states into Rust values.

use core::ffi::c_int;

use thiserror::Error;

use crate::{
	cdef::Status,
	kind::ValueKind,
	registry::Arity,
};

/// Errors that can occur while moving a value between the host and the stack.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
	#[error("no value at stack index {index}")]
	NoValue { index: c_int },

	#[error("string contains an interior NUL byte at position {position}")]
	InteriorNul { position: usize },

	#[error("stack overflow (no room for {needed} more values)")]
	StackOverflow { needed: usize },
}

/// Errors that can occur when calling a global Lua function from the host.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
	#[error("function name {0:?} contains an interior NUL byte")]
	InvalidName(String),

	#[error("Lua function {name:?} not found or is not a function")]
	NotAFunction { name: String },

	#[error("stack overflow calling Lua function {name:?} (no room for {needed} more values)")]
	StackOverflow { name: String, needed: usize },

	#[error("invalid argument {position} for Lua function {name:?}: {source}")]
	Argument {
		name: String,
		position: usize,
		#[source]
		source: HostError,
	},

	#[error("error calling Lua function {name:?} ({}): {message}", .status.describe())]
	Failed {
		name: String,
		status: Status,
		message: String,
	},

	#[error("invalid result {position} from Lua function {name:?}: {source}")]
	Result {
		name: String,
		position: usize,
		#[source]
		source: HostError,
	},
}

/// Errors that can occur when Lua calls a function in a
/// [`Registry`](crate::registry::Registry).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
	#[error("bad argument #1 (function name expected, got {got})")]
	MissingName { got: ValueKind },

	#[error("function {name:?} not found")]
	NotFound { name: String },

	#[error("wrong number of arguments for {name:?}: got {got}, need {expected}")]
	WrongArity {
		name: String,
		got: usize,
		expected: Arity,
	},

	#[error("error in function {name:?}: {message}")]
	Failed { name: String, message: String },

	#[error(transparent)]
	Host(#[from] HostError),
}

/// Result type alias for host calls.
pub type CallResult<T> = Result<T, CallError>;
