use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use wasm_bindgen::JsValue;
    use web_sys::console;

    /// Routes `log` records to the browser console.
    pub struct ConsoleLogger {
        level: LevelFilter,
    }

    impl ConsoleLogger {
        pub fn new(level: LevelFilter) -> Self {
            ConsoleLogger { level }
        }
    }

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= self.level
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let value = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
            match record.level() {
                Level::Error => console::error_1(&value),
                Level::Warn => console::warn_1(&value),
                Level::Info => console::info_1(&value),
                Level::Debug | Level::Trace => console::debug_1(&value),
            }
        }

        fn flush(&self) {}
    }
}

#[cfg(target_arch = "wasm32")]
pub use console::ConsoleLogger;

#[cfg(target_arch = "wasm32")]
fn install(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(level)))
        .map(|()| log::set_max_level(level))
}

// Native builds (tests, tooling) log through env_logger; RUST_LOG overrides `level`.
#[cfg(not(target_arch = "wasm32"))]
fn install(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()
}

/// Installs the logger once; later calls are no-ops.
pub fn init(level: LevelFilter) {
    INIT.call_once(|| {
        if install(level).is_err() {
            // another logger got there first; keep it
            log::debug!("logger not installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(LevelFilter::Warn);
        let installed = log::max_level();
        init(LevelFilter::Trace);
        assert_eq!(log::max_level(), installed);
    }
}
