use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Install a stderr subscriber. `FOLIO_LOG` overrides the level picked from `--verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "folio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("FOLIO_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(filter);
    let subscriber = tracing_subscriber::Registry::default().with(stderr_log);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
