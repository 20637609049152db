fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests, fuzzing) have no ESP-IDF toolchain to report.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
