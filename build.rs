fn main() {
    let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=ZONEKIT_BUILD_DATE={}", date);
    println!("cargo:rerun-if-changed=build.rs");
}
