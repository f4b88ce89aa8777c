use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEBUG: &str = env!("VERGEN_CARGO_DEBUG");
const TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");
const BUILD_DATE: &str = env!("VERGEN_BUILD_DATE");

fn simplify_target(target: &str) -> String {
    target
        .replace("unknown-", "")
        .replace("-gnu", "")
        .replace("-musl", "")
}

fn is_release() -> bool {
    DEBUG != "true"
}

fn make_version_string() -> String {
    let target = simplify_target(TARGET_TRIPLE);
    let profile = if is_release() { "release" } else { "debug" };
    // 0.1.0 (debug linux-x86_64, built 2026-10-16)
    format!("{VERSION} ({profile} {target}, built {BUILD_DATE})")
}

pub fn version_string() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(make_version_string)
}

pub fn print_version() -> ExitCode {
    println!("rill {}", version_string());
    ExitCode::SUCCESS
}
