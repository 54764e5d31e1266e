//! Build script for FM bridge firmware
//!
//! Handles:
//! - Memory layout configuration
//! - defmt linker script for target builds

fn main() {
    // Tell Cargo to re-run this if the linker script changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Link memory.x from project directory
    if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        println!("cargo:rustc-link-search={dir}");
    }

    // defmt needs its own linker script on the target only
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_some()
        && std::env::var("TARGET").is_ok_and(|t| t.starts_with("thumb"))
    {
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
