fn main() {
    // The migrate! macro embeds ./migrations at compile time.
    println!("cargo:rerun-if-changed=migrations/");
}
