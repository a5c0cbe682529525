fn main() {
    println!("cargo:rerun-if-env-changed=GATEWAY_TRIGGER_CONFIG");

    // ESP-IDF link arguments are only needed for the firmware image, built
    // with `--features espidf`.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
