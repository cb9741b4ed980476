fn main() {
    // Link scripts come from `.cargo/config.toml` when building inside
    // `firmware/`. Emit them here only when they are missing, duplicates
    // break the link with repeated `memory.x` definitions.
    let rustflags = std::env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    if !rustflags.contains("link.x") {
        println!("cargo:rustc-link-arg=-Tlink.x");
    }
    if !rustflags.contains("defmt.x") {
        println!("cargo:rustc-link-arg=-Tdefmt.x");
    }
    if !rustflags.contains("--nmagic") {
        println!("cargo:rustc-link-arg=--nmagic");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
