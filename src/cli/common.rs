use log::LevelFilter;
use std::time::SystemTime;

pub const LOG_ENV: &str = "LOGIN_PROBE_LOG";

// -v and -vv win over LOGIN_PROBE_LOG, which wins over the default.
pub fn log_level(verbosity: u8, from_env: Option<&str>) -> LevelFilter {
    match verbosity {
        0 => from_env
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Logs to stderr so stdout only carries the probe's own diagnostic lines.
pub fn setup_logger(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("reqwest", level.min(LevelFilter::Info))
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
