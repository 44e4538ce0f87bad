/// Initialize tracing for the CLI.
///
/// Logs go to stderr; stdout is reserved for the success line and help text.
/// Quiet by default, override with `RUST_LOG` (e.g. `RUST_LOG=owl_core=debug`).
/// Calling it again keeps the subscriber installed first.
pub fn init(service_name: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{service_name}=warn")));

    if fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_keeps_the_first_subscriber() {
        init("owl_core");
        init("owl_core");
        tracing::warn!("still logging after a second init");
    }
}
