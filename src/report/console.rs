// src/report/console.rs
use crate::probe::ProbeResult;
use std::io::IsTerminal;

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const GREEN: &str = "\x1b[92m";
pub const RED: &str = "\x1b[31m";
pub const BLUE: &str = "\x1b[34m";

/// One line per host on stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    colored: bool,
}

impl ConsoleReporter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Colors only when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let colored = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(colored)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colored {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn render_line(&self, result: &ProbeResult) -> String {
        let status_color = if result.is_ok() { GREEN } else { RED };
        let mut line = format!(
            "{} - Status: {}",
            result.host,
            self.paint(status_color, &result.status_code)
        );

        if let Some(ssr) = result.ssr {
            line.push_str(" - SSR: ");
            line.push_str(&if ssr {
                self.paint(GREEN, "True")
            } else {
                self.paint(RED, "False")
            });
        }

        line.push_str(&self.paint(
            BLUE,
            &format!(" - Latency: {:.6}", result.latency.as_secs_f64()),
        ));
        line.push_str(&self.paint(
            BLUE,
            &format!(" - ContentLength: {}KB", result.content_length >> 10),
        ));
        line
    }

    pub fn print(&self, result: &ProbeResult) {
        println!("{}", self.render_line(result));
    }
}
