// File: crates/candlestick-render-skia/build.rs
// Summary: Extra system link flags the prebuilt Skia binaries need on some targets.

fn main() {
    // skia's ICU loader reads the registry on Windows.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        println!("cargo:rustc-link-lib=advapi32");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
