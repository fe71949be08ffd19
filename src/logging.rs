use std::io::Write;

use chrono::Utc;
use colored::{Color, Colorize as _};
use env_logger::{Builder, Env};
use log::{Level, LevelFilter};

/// `verbosity` overrides `RUST_LOG` when given on the command line.
pub fn init(verbosity: Option<LevelFilter>) {
    let mut builder = Builder::from_env(get_env());
    if let Some(level) = verbosity {
        builder.filter_level(level);
    }

    builder.format(|f, record| {
        let time = Utc::now().format("%H:%M:%S").to_string().dimmed();
        let color = color_by_level(record.level());
        let level = level_to_str(record.level()).color(color);
        let message = record.args().to_string().color(color);

        writeln!(f, "{time} [{level}@{}] {message}", record.target().dimmed())
    });

    builder.init();
}

fn get_env() -> Env<'static> {
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    Env::default().default_filter_or(default_level)
}

const fn color_by_level(level: Level) -> Color {
    match level {
        Level::Trace => Color::Magenta,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

const fn level_to_str(level: Level) -> &'static str {
    match level {
        Level::Trace => "T",
        Level::Debug => "D",
        Level::Info => "I",
        Level::Warn => "W",
        Level::Error => "E",
    }
}
