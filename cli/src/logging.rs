use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, MakeWriter,
        format::{Compact, DefaultFields, Format},
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Filter used when RUST_LOG is not set. Backend error details are only logged at
/// debug, so neither default shows them.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,service=info,cloud_storage=info,database=info"
    } else {
        "warn"
    }
}

fn console_layer<S, W>(make_writer: W) -> fmt::Layer<S, DefaultFields, Format<Compact>, W>
where
    W: for<'writer> MakeWriter<'writer> + 'static,
{
    fmt::layer()
        .with_writer(make_writer)
        .with_target(false)
        .with_level(true)
        .compact()
}

/// Initializes logging for the command line tool.
///
/// Logs go to stderr so they never mix with the command output on stdout.
/// Only warnings are shown by default, `--verbose` adds progress of the
/// deletion steps. RUST_LOG overrides both:
/// - RUST_LOG=debug snapshots delete abc123
/// - RUST_LOG=cloud_storage=debug snapshots delete abc123
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer(std::io::stderr))
        .init();
}
