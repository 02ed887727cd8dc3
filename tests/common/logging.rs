use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;

/// `#[traced_test]` filters out events from the library crate when used in
/// integration tests, so these tests install a plain subscriber instead.
///
/// Only the first call in a test binary takes effect.
pub fn tracing_logger() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pegnet_rpc=debug,warn"));
    let subscriber = FmtSubscriber::builder()
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_env_filter(env_filter)
        .with_test_writer()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
