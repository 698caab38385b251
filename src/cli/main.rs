mod common;

use chayns_login::{LoginClient, DEFAULT_ENDPOINT};
use clap::{ArgAction, Parser};
use std::{process::exit, time::Duration};

use crate::common::{DEFAULT_PASSWORD, DEFAULT_USERNAME};

#[derive(Parser, Debug)]
#[command(
    name = "chayns-login",
    about = "Log in against the chayns login service and print the session identifiers"
)]
struct Args {
    /// Login endpoint
    #[arg(long, env = "LOGIN_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, env = "LOGIN_USERNAME", default_value = DEFAULT_USERNAME)]
    username: String,

    #[arg(
        long,
        env = "LOGIN_PASSWORD",
        default_value = DEFAULT_PASSWORD,
        hide_env_values = true
    )]
    password: String,

    /// How long to wait for the service, e.g. "30s" or "2m"
    #[arg(long, env = "LOGIN_TIMEOUT", default_value = "30s", value_parser = humantime::parse_duration)]
    timeout: Duration,

    /// Exit with status 1 when the login does not succeed
    #[arg(long)]
    strict_exit: bool,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = common::setup_logging(args.verbose) {
        eprintln!("Couldn't set up logging: {}", e);
    }

    let outcome = LoginClient::builder()
        .endpoint(args.endpoint)
        .timeout(args.timeout)
        .build()
        .and_then(|client| client.authenticate(&args.username, &args.password));

    if let Err(e) = common::report(&mut std::io::stdout(), &outcome) {
        eprintln!("Couldn't write result: {}", e);
    }

    let code = common::exit_code(args.strict_exit, &outcome);
    if code != 0 {
        exit(code);
    }
}
