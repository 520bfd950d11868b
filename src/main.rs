//! saslauthd-verify - Entry Point
//!
//! Checks the SASLUSER / SASLPASS pair against a running saslauthd and
//! prints the daemon's answer.

use log::{error, info};
use std::process::ExitCode;

use saslauthd_verify::config::{ClientConfig, EnvCredentials};
use saslauthd_verify::error::{error_to_exit_code, handle_error};
use saslauthd_verify::{SaslError, verify_password};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let (config, creds) = match (ClientConfig::load(), EnvCredentials::load()) {
        (Ok(config), Ok(creds)) => (config, creds),
        (Err(e), _) | (_, Err(e)) => {
            error!("Invalid configuration: {}", e);
            println!("{}", e);
            return ExitCode::from(2);
        }
    };

    info!(
        "Verifying credentials via {}",
        config.resolve_socket_path().display()
    );

    let verification = verify_password(&config, &creds.user, &creds.pass, "", "", "");
    let result = match config.timeout() {
        Some(limit) => match tokio::time::timeout(limit, verification).await {
            Ok(result) => result,
            Err(_) => {
                error!("saslauthd did not answer within {:?}", limit);
                println!("timed out after {:?}", limit);
                return ExitCode::from(4);
            }
        },
        None => verification.await,
    };

    report(&result);
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(error_to_exit_code(&e)),
    }
}

fn report(result: &Result<String, SaslError>) {
    match result {
        Ok(response) => {
            println!("OK Success.");
            println!("from saslauthd:{}", response);
        }
        Err(e) => {
            handle_error(e);
            println!("{}", e);
            println!("from saslauthd:{}", e.response().unwrap_or_default());
        }
    }
}
