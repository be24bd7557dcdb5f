/// Build script for lanepi
/// Selects the 8-lane backend for the target and rejects targets without SIMD

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let features = std::env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let backend = lane_backend(&arch, &features);
    let portable_opt_in = std::env::var_os("CARGO_FEATURE_PORTABLE_LANES").is_some();

    if backend == "portable" && !portable_opt_in {
        panic!(
            "lanepi: target `{arch}` has no SIMD instruction set for 8-lane f32 vectors \
             (features: [{features}]). Enable AVX/SSE2, NEON or simd128, or build with \
             `--features portable-lanes` to accept the scalar-emulated lane backend."
        );
    }

    if backend == "sse2" {
        println!(
            "cargo:warning=lanepi: AVX not enabled for this build; 8 lanes run as two SSE2 halves \
             (use RUSTFLAGS=\"-C target-feature=+avx\" for 256-bit registers)"
        );
    }

    println!("cargo:rustc-env=LANEPI_LANE_BACKEND={backend}");
}

/// Mirror of the backend selection `wide::f32x8` performs for the target.
fn lane_backend(arch: &str, features: &str) -> &'static str {
    let has = |name: &str| features.split(',').any(|f| f == name);
    match arch {
        "x86" | "x86_64" if has("avx") => "avx",
        "x86" | "x86_64" if has("sse2") => "sse2",
        "aarch64" if has("neon") => "neon",
        "wasm32" if has("simd128") => "simd128",
        _ => "portable",
    }
}
