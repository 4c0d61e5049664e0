//! Subscriber installation for the `exl` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the `fmt` subscriber once per process.
///
/// An explicit `filter` (from `--log=<filter>`) wins over `RUST_LOG`. With
/// neither present no subscriber is installed and every event is dropped.
pub fn init_tracing(filter: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match filter {
            Some(directives) => EnvFilter::new(directives),
            None if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            None => return,
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
