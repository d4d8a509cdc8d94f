//! Diagnostics setup for the `otb-fen` binary.
//!
//! `RUST_LOG` wins when set. Otherwise the requested level applies to the
//! board-reading crates while third-party crates stay at `warn` or quieter.

use log::LevelFilter;

const CRATES: [&str; 3] = ["otb_fen", "otb_fen_board", "otb_fen_core"];

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(level: LevelFilter) -> String {
    let level_name = level.to_string().to_ascii_lowercase();
    let others = level.min(LevelFilter::Warn).to_string().to_ascii_lowercase();
    let mut directives = others;
    for name in CRATES {
        directives.push_str(&format!(",{name}={level_name}"));
    }
    directives
}

/// Install `env_logger` on stderr. Later calls are no-ops.
pub fn init_with_level(level: LevelFilter) {
    let env = env_logger::Env::default().default_filter_or(default_directives(level));
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

/// Install a `tracing` subscriber reporting span timings on close.
///
/// `log` records from the pipeline are forwarded to the subscriber.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(fmt::time::Uptime::default())
        .with_writer(std::io::stderr)
        .finish()
        .try_init();
}
