mod common;
use clap::{Arg, ArgAction, ArgMatches, Command};
use dotenv::dotenv;
use login_probe::ProbeConfig;
use std::process::exit;

const DEFAULT_URL: &str = "http://localhost:8080/";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";

fn cli() -> Command {
    Command::new("login-probe")
        .about("Sign in to a running service once and exit non-zero unless it answers 200")
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .env("LOGIN_PROBE_URL")
                .help("Base URL of the service, with or without a trailing slash")
                .default_value(DEFAULT_URL),
        )
        .arg(
            Arg::new("username")
                .short('n')
                .long("username")
                .env("LOGIN_PROBE_USERNAME")
                .default_value(DEFAULT_USERNAME),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .env("LOGIN_PROBE_PASSWORD")
                .hide_env_values(true)
                .default_value(DEFAULT_PASSWORD),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more to stderr (-v info, -vv debug)"),
        )
}

fn config_from(matches: &ArgMatches) -> ProbeConfig {
    let value = |id: &str, fallback: &str| {
        matches
            .get_one::<String>(id)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };
    ProbeConfig::new(
        value("url", DEFAULT_URL),
        value("username", DEFAULT_USERNAME),
        value("password", DEFAULT_PASSWORD),
    )
}

fn main() {
    dotenv().ok();
    let matches = cli().get_matches();

    let from_env = std::env::var(common::LOG_ENV).ok();
    let level = common::log_level(matches.get_count("verbose"), from_env.as_deref());
    if let Err(e) = common::setup_logger(level) {
        eprintln!("could not set up logging: {}", e);
    }

    let config = config_from(&matches);
    let outcome = login_probe::run(&config, &mut std::io::stdout());
    exit(outcome.exit_code());
}
