use std::sync::Once;

/// Filters applied when neither the config nor `RUST_LOG` names any.
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Target of received and dropped wire-message logs.
const EVENT_TARGET: &str = "selcui_engine::event";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "selcui_engine::render=trace,wgpu=warn") and wins over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Lift the event module to `debug` so every received and dropped
    /// message is shown. Pairs with `CuiConfig::debug`.
    pub debug_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            debug_events: false,
        }
    }
}

/// Filter directives for `config`, given the current `RUST_LOG` value.
fn filter_spec(config: &LoggingConfig, rust_log: Option<String>) -> String {
    let mut spec = config
        .env_filter
        .clone()
        .or(rust_log)
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned());
    if config.debug_events {
        spec.push_str(&format!(",{EVENT_TARGET}=debug"));
    }
    spec
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` backend once; later calls are ignored.
///
/// Call early in `main`, before the replay or network thread starts sending.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let spec = filter_spec(&config, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&spec);
        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized with `{}`", spec);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_rust_log() {
        let config = LoggingConfig { env_filter: Some("warn".into()), ..LoggingConfig::default() };
        assert_eq!(filter_spec(&config, Some("trace".into())), "warn");
        assert_eq!(filter_spec(&LoggingConfig::default(), Some("trace".into())), "trace");
        assert_eq!(filter_spec(&LoggingConfig::default(), None), DEFAULT_FILTER);
    }

    #[test]
    fn debug_events_lifts_the_event_module() {
        let config = LoggingConfig { debug_events: true, ..LoggingConfig::default() };
        assert_eq!(filter_spec(&config, Some("warn".into())), "warn,selcui_engine::event=debug");
    }
}
