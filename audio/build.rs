use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=OPUS_LIB_DIR");
    println!("cargo:rerun-if-env-changed=LC3_LIB_DIR");

    let opus = env::var_os("CARGO_FEATURE_OPUS").is_some();
    let lc3 = env::var_os("CARGO_FEATURE_LC3").is_some();
    if !opus && !lc3 {
        return;
    }

    println!("cargo:rustc-link-search=native=/opt/homebrew/lib");
    println!("cargo:rustc-link-search=native=/usr/local/lib");

    if opus {
        if let Some(dir) = env::var_os("OPUS_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
        }
        println!("cargo:rustc-link-lib=opus");
    }
    if lc3 {
        if let Some(dir) = env::var_os("LC3_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
        }
        println!("cargo:rustc-link-lib=lc3");
    }
}
