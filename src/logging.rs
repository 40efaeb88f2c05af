//! Logger setup.
//!
//! On wasm every record goes to the matching `console.*` method so warnings
//! from the cheat detector show up as warnings in devtools. Native builds
//! (tests) use `env_logger`, so `RUST_LOG` works as usual.

use log::LevelFilter;
#[cfg(any(target_arch = "wasm32", test))]
use log::Record;
#[cfg(target_arch = "wasm32")]
use log::{Level, Log, Metadata};

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = wasm_bindgen::JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::log_1(&msg),
        }
    }

    fn flush(&self) {}
}

#[cfg(any(target_arch = "wasm32", test))]
fn format_record(record: &Record) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

/// Install the logger. Safe to call more than once; only the first call
/// takes effect.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Install the logger. Safe to call more than once; only the first call
/// takes effect.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .is_test(cfg!(test))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn record_format_includes_level_and_target() {
        let line = format_record(
            &Record::builder()
                .level(Level::Warn)
                .target("click_store::logic")
                .args(format_args!("too regular"))
                .build(),
        );
        assert_eq!(line, "[WARN] click_store::logic: too regular");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(LevelFilter::Debug);
        init(LevelFilter::Error);
        log::debug!("logger installed");
    }
}
