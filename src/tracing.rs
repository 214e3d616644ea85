use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Install the process-wide log subscriber.
///
/// `RUST_LOG` wins when set, otherwise `default_filter` applies. Progress and
/// diagnostics are written to stderr; stdout carries only scraped records.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("log subscriber already installed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_an_error() {
        let _ = init_tracing("warn");
        assert!(init_tracing("warn").is_err());
    }
}
