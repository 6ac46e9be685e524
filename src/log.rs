//! Initialisation and configuration of the application's logging system.
//!
//! Log output goes to the terminal (colourised when attached to one) and,
//! when an output directory is available, to a plain-text log file. The log
//! level can be set with the `PATHWAYS_LOG_LEVEL` environment variable or the
//! model configuration file, with the environment variable taking precedence.
use anyhow::{Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::env;
use std::fmt::{Arguments, Display};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;

/// The fallback log level, used when neither the environment variable nor the
/// model configuration file specifies one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The file name for the log file
const LOG_FILE_NAME: &str = "pathways.log";

/// Parse a log level name into a [`LevelFilter`]
fn parse_log_level(level: &str) -> Result<LevelFilter> {
    let level = match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    };

    Ok(level)
}

/// Format one record for the terminal, with the level rendered as given
fn write_record<L: Display>(out: FormatCallback, level: L, record: &Record, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");
    out.finish(format_args!(
        "[{timestamp} {level} {}] {message}",
        record.target()
    ));
}

/// A dispatch chain for one terminal stream, colourised if the stream is a terminal
fn terminal_dispatch<O: Into<fern::Output>>(
    level: LevelFilter,
    use_colour: bool,
    colours: ColoredLevelConfig,
    sink: O,
) -> Dispatch {
    Dispatch::new()
        .format(move |out, message, record| {
            if use_colour {
                write_record(out, colours.color(record.level()), record, message);
            } else {
                write_record(out, record.level(), record, message);
            }
        })
        .level(level)
        .chain(sink.into())
}

/// Initialise the program logger using the `fern` logging library.
///
/// # Arguments
///
/// * `log_level_from_config`: The log level specified in the model configuration file
/// * `log_file_dir`: Where to save the log file (if Some, a log file will be created)
pub fn init(log_level_from_config: Option<&str>, log_file_dir: Option<&Path>) -> Result<()> {
    // The environment variable takes precedence over the config file
    let log_level = env::var("PATHWAYS_LOG_LEVEL").unwrap_or_else(|_| {
        log_level_from_config
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string()
    });
    let log_level = parse_log_level(&log_level)?;

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    // Warnings and errors go to stderr; everything else to stdout
    let stdout_chain = terminal_dispatch(
        log_level,
        std::io::stdout().is_terminal(),
        colours,
        std::io::stdout(),
    )
    .filter(|metadata| metadata.level() > LevelFilter::Warn);
    let stderr_chain = terminal_dispatch(
        log_level.min(LevelFilter::Warn),
        std::io::stderr().is_terminal(),
        colours,
        std::io::stderr(),
    );

    let mut dispatch = Dispatch::new().chain(stdout_chain).chain(stderr_chain);

    if let Some(log_file_dir) = log_file_dir {
        let log_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(log_file_dir.join(LOG_FILE_NAME))?;
        dispatch = dispatch.chain(
            Dispatch::new()
                .format(|out, message, record| {
                    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                    out.finish(format_args!(
                        "[{timestamp} {} {}] {message}",
                        record.level(),
                        record.target()
                    ));
                })
                .level(log_level.max(LevelFilter::Info))
                .chain(log_file),
        );
    }

    dispatch.apply()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("off", LevelFilter::Off)]
    #[case("warn", LevelFilter::Warn)]
    #[case("INFO", LevelFilter::Info)]
    #[case("Debug", LevelFilter::Debug)]
    fn test_parse_log_level(#[case] input: &str, #[case] expected: LevelFilter) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_log_level_unknown() {
        assert!(parse_log_level("verbose").is_err());
    }
}
