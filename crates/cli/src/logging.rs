use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log level or filter spec.
const LOG_ENV: &str = "FRU_CODEGEN_LOG";

/// Crates whose events a plain level applies to.
const LOG_TARGETS: [&str; 2] = ["fru_codegen_core", "fru_codegen_cli"];

/// Install the stderr subscriber.
///
/// `FRU_CODEGEN_LOG` takes a plain level ("trace", "debug", "info", "warn",
/// "error") or a full filter spec like "fru_codegen_core=trace". Defaults to
/// `info` for this tool's crates.
pub fn init_tracing() {
    let filter = match std::env::var(LOG_ENV) {
        Ok(level) if is_plain_level(&level) => targets_at(&level),
        Ok(spec) => spec,
        Err(_) => targets_at("info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn targets_at(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
