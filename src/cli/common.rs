use chayns_login::{LoginError, Session};
use log::LevelFilter;
use std::io::Write;
use std::time::SystemTime;

pub const DEFAULT_USERNAME: &str = "test@example.com";
pub const DEFAULT_PASSWORD: &str = "password";

// Diagnostics go to stderr, stdout is kept for the result lines.
pub fn setup_logging(verbosity: u8) -> Result<(), fern::InitError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

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
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

pub fn report<W: Write>(out: &mut W, outcome: &Result<Session, LoginError>) -> std::io::Result<()> {
    match outcome {
        Ok(session) => {
            writeln!(out, "Login successful!")?;
            writeln!(out, "{}", session)
        }
        Err(e) if e.is_communication_failure() => {
            writeln!(out, "Failed to communicate with login service")
        }
        Err(e) => writeln!(out, "Login failed: {}", e),
    }
}

/// Process status for an attempt. Failures only change the status when the
/// caller asked for strict exit codes.
pub fn exit_code(strict: bool, outcome: &Result<Session, LoginError>) -> i32 {
    match outcome {
        Err(_) if strict => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn printed(outcome: Result<Session, LoginError>) -> String {
        let mut out = Vec::new();
        report(&mut out, &outcome).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn success_prints_three_fields() {
        let session = Session::from_response(
            &json!({"TobitUserID": 1, "PersonID": 2, "TobitAccessToken": "abc"}),
        );
        assert_eq!(
            printed(session),
            "Login successful!\nTobitUserID: 1\nPersonID: 2\nToken: \"abc\"\n"
        );
    }

    #[test]
    fn server_error_prints_message() {
        let outcome = Err(LoginError::ServerReported("invalid credentials".into()));
        assert_eq!(printed(outcome), "Login failed: invalid credentials\n");
    }

    #[test]
    fn missing_field_prints_name() {
        let outcome = Err(LoginError::MissingField("PersonID"));
        assert_eq!(
            printed(outcome),
            "Login failed: response is missing field PersonID\n"
        );
    }

    #[test]
    fn communication_failures_share_one_line() {
        for e in [
            LoginError::ClientInit("x".into()),
            LoginError::Transport("connection refused".into()),
            LoginError::Parse("expected value".into()),
        ] {
            assert_eq!(printed(Err(e)), "Failed to communicate with login service\n");
        }
    }

    #[test]
    fn exit_code_is_zero_by_default() {
        let failed = Err(LoginError::Transport("connection refused".into()));
        assert_eq!(exit_code(false, &failed), 0);
        let rejected = Err(LoginError::ServerReported("invalid credentials".into()));
        assert_eq!(exit_code(false, &rejected), 0);
    }

    #[test]
    fn strict_exit_code_marks_failures() {
        let session = Session::from_response(
            &json!({"TobitUserID": 1, "PersonID": 2, "TobitAccessToken": "abc"}),
        );
        assert_eq!(exit_code(true, &session), 0);
        for e in [
            LoginError::Transport("connection refused".into()),
            LoginError::ServerReported("invalid credentials".into()),
            LoginError::MissingField("PersonID"),
        ] {
            assert_eq!(exit_code(true, &Err(e)), 1);
        }
    }
}
