//! Integration tests for collectors and export targets.

mod events;
mod logs;

/// Routes `tracing` output from the code under test to the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
