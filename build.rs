//! Builds Lua 5.4 from source when the `vendored` feature is enabled.

fn main() {
	println!("cargo:rerun-if-changed=build.rs");

	#[cfg(all(feature = "vendored", feature = "link-system"))]
	println!("cargo:warning=both `vendored` and `link-system` are enabled; Lua may be linked twice");

	// `lua-src` compiles Lua with its default `luaconf.h`, which uses 64-bit
	// integers and doubles.
	#[cfg(all(feature = "vendored", feature = "use-32-bits"))]
	panic!("`use-32-bits` does not match the vendored Lua build; link a 32-bit Lua with `link-system` instead");

	#[cfg(feature = "vendored")]
	{
		let artifacts = lua_src::Build::new().build(lua_src::Lua54);
		artifacts.print_cargo_metadata();
	}
}
