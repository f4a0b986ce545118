use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// ANSI escapes for each kind of output, empty when colors are off.
#[derive(Clone, Copy)]
pub struct Colors {
    pub header: &'static str,
    pub name: &'static str,
    pub invalid: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                header: "\x1b[1;36m", // Bold cyan
                name: "\x1b[32m",     // Green
                invalid: "\x1b[33m",  // Yellow
                error: "\x1b[31m",    // Red
                warning: "\x1b[33m",  // Yellow
                enabled: true,
            }
        } else {
            Self {
                header: "",
                name: "",
                invalid: "",
                error: "",
                warning: "",
                enabled: false,
            }
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled {
            RESET
        } else {
            ""
        }
    }
}

pub fn should_use_colors(force_color: bool, no_color: bool) -> bool {
    // Priority: --no-color > --color > NO_COLOR env > TTY detection
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    io::stdout().is_terminal()
}
