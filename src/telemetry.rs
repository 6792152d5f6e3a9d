//! Opt-in `tracing` setup for hosts embedding `chart-geom`.
//!
//! Geometry code only emits events: malformed configuration at `warn`,
//! frame assembly at `debug`, filtered inputs at `trace`. Hosts that already
//! run a subscriber need nothing from this module.

/// Filter used by [`init_default_tracing`] when `RUST_LOG` is unset.
pub const DEFAULT_TRACING_FILTER: &str = "info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG` or [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_TRACING_FILTER)
}

/// Same as [`init_default_tracing`] with caller-chosen fallback directives,
/// e.g. `"warn,chart_geom=trace"` to see filtered ticks and gradient stops.
#[must_use]
#[cfg_attr(not(feature = "telemetry"), allow(unused_variables))]
pub fn init_tracing_with_filter(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_directives))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
