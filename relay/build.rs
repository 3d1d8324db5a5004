//! `RUST_LOG_PRETTY=1` at build time switches to the multi-line log format.

const PRETTY_LOGS_CFG: &str = "pretty_logs";

fn main() {
    println!("cargo::rustc-check-cfg=cfg({PRETTY_LOGS_CFG})");
    println!("cargo::rerun-if-env-changed=RUST_LOG_PRETTY");

    let pretty = std::env::var("RUST_LOG_PRETTY").is_ok_and(|value| value == "1");
    if pretty {
        println!("cargo::rustc-cfg={PRETTY_LOGS_CFG}");
    }
}
