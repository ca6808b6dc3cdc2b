use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let (Ok(crate_dir), Ok(out_dir)) = (env::var("CARGO_MANIFEST_DIR"), env::var("OUT_DIR")) else {
        println!("cargo:warning=cbindgen skipped: CARGO_MANIFEST_DIR or OUT_DIR unset");
        return;
    };
    let include_dir = PathBuf::from(out_dir).join("include");
    let header = include_dir.join("munchies.h");

    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        include_guard: Some("MUNCHIES_H".into()),
        cpp_compat: true,
        ..Default::default()
    };

    // Header generation is best effort; the library still builds without it.
    let bindings = match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => bindings,
        Err(err) => {
            println!("cargo:warning=cbindgen skipped: {err}");
            return;
        }
    };
    if let Err(err) = std::fs::create_dir_all(&include_dir) {
        println!("cargo:warning=cannot create {}: {err}", include_dir.display());
        return;
    }
    bindings.write_to_file(&header);
    if !header.exists() {
        println!("cargo:warning=failed to write {}", header.display());
    }
}
