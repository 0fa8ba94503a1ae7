/// Installs the fmt subscriber. Safe to call more than once; later calls are no-ops.
pub fn init() {
    if tracing_subscriber::fmt().try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[test]
fn init_twice_test() {
    init();
    init();
}
