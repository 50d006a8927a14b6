use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// `verbose` forces `DEBUG`; otherwise `RUST_LOG` decides, defaulting to
/// "warn". Fails if a subscriber is already installed.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact();

    let filter_layer = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_fallible_not_fatal() {
        // Only the first call in a process can succeed.
        let _ = init(false);
        assert!(init(true).is_err());

        tracing::debug!("debug after init");
        tracing::warn!("warning after init");
    }
}
