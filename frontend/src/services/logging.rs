use log::Level;

/// Routes the `log` facade to the browser console
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub const LEVEL: Level = Level::Info;

    /// Install as the global logger; a second call is a no-op
    pub fn init() {
        if let Err(e) = console_log::init_with_level(Self::LEVEL) {
            gloo::console::warn!(format!("Console logger already installed: {}", e));
        }
    }
}

/// Component-tagged logging for UI code
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        log::debug!(target: component, "{}", message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{}", message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        log::warn!(target: component, "{}", message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        log::error!(target: component, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_without_logger_is_silent() {
        // Nothing installed on native targets; records are dropped
        Logger::error_with_component("settings", "save failed");
        Logger::debug_with_component("app", "Settings needs a login");
        assert!(log::max_level() < ConsoleLogger::LEVEL);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_init_twice_keeps_level() {
        ConsoleLogger::init();
        ConsoleLogger::init();
        assert_eq!(log::max_level(), ConsoleLogger::LEVEL.to_level_filter());
        Logger::info_with_component("tests", "console logger ready");
    }
}
