use std::{io::Write, time::Duration};

use env_logger::{Builder, Env, fmt::Color};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{Level, LevelFilter};
use once_cell::sync::OnceCell;

/// Environment variable overriding the command-line verbosity, using `env_logger` filter syntax.
pub const LOG_ENV_VAR: &str = "AB2ATGC_LOG";

static INSTANCE: OnceCell<Logger> = OnceCell::new();

#[derive(Debug)]
pub struct Logger {
    multi_pg: MultiProgress,
}

impl Logger {
    /// Initialize the global logger. Subsequent calls only update the verbosity level.
    ///
    /// # Panics
    /// - if another global logger was registered outside of this crate.
    pub fn init(verbosity: u8) {
        INSTANCE.get_or_init(|| Self::build(verbosity));
        Self::set_level(verbosity);
    }

    fn build(verbosity: u8) -> Self {
        let env = Env::default().filter(LOG_ENV_VAR);
        let logger = Builder::new()
            .filter_level(Self::u8_to_loglevel(verbosity))
            .format(|buf, record| {
                let (traceback, intense) = match record.level() {
                    Level::Error => (format!("(@ {}:{}) ", record.file().unwrap_or("unknown"), record.line().unwrap_or(0)), true),
                    _            => (String::new(), false),
                };

                let mut arg_style = buf.style();
                arg_style.set_intense(intense);

                let mut level_style = buf.style();
                let color = match record.level() {
                    Level::Error => Color::Red,
                    Level::Warn  => Color::Yellow,
                    Level::Info  => Color::Green,
                    Level::Debug => Color::Blue,
                    Level::Trace => Color::Cyan
                };
                level_style.set_color(color).set_bold(true);

                writeln!(
                    buf,
                    "[{} {: <5} {}] {traceback}{}",
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                    level_style.value(record.level()),
                    record.target(),
                    arg_style.value(record.args())
                )
            })
            .parse_env(env)
            .build();

        // Route log lines through the progress bars, so that spinners are not garbled.
        let multi_pg = MultiProgress::new();
        LogWrapper::new(multi_pg.clone(), logger)
            .try_init()
            .expect("Failed to wrap logger with multiprogress");
        Self{multi_pg}
    }

    fn u8_to_loglevel(verbosity: u8) -> LevelFilter {
        match verbosity {
            0            => LevelFilter::Error,
            1            => LevelFilter::Warn,
            2            => LevelFilter::Info,
            3            => LevelFilter::Debug,
            4..= u8::MAX => LevelFilter::Trace
        }
    }

    pub fn set_level(verbosity: u8) {
        log::set_max_level(Self::u8_to_loglevel(verbosity));
    }

    /// Progress bar registry of the global logger, if it was initialized.
    pub fn multi() -> Option<&'static MultiProgress> {
        INSTANCE.get().map(|logger| &logger.multi_pg)
    }

    /// Create a row-counting spinner. The spinner is hidden when the logger was never
    /// initialized (e.g. when running as a library), or when `info` messages are filtered out.
    ///
    /// # Panics
    /// - if the hard-coded progress template is invalid.
    #[must_use]
    pub fn spinner(message: &'static str) -> ProgressBar {
        let spinner = match Self::multi() {
            Some(multi) if log::max_level() >= LevelFilter::Info => multi.add(ProgressBar::new_spinner()),
            _ => return ProgressBar::hidden(),
        };
        let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}: {human_pos} rows ({per_sec})")
            .expect("Invalid progress bar template");
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }
}
