//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping.

use rebrand::error::Hint;
use rebrand::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

/// Human-readable error on stderr, for commands whose output is a text report.
pub fn print_error_plain(err: &Error) {
    eprintln!("{}", format_error_plain(err));
}

fn format_error_plain(err: &Error) -> String {
    let mut out = format!("Error [{}]: {}", err.code.as_str(), err.message);

    if let Some(problem) = err.details.get("problem").and_then(|v| v.as_str()) {
        let field = err
            .details
            .get("field")
            .and_then(|v| v.as_str())
            .unwrap_or("argument");
        out.push_str(&format!("\n  {}: {}", field, problem));
    } else if let Some(args) = err.details.get("args").and_then(|v| v.as_array()) {
        let names: Vec<&str> = args.iter().filter_map(|a| a.as_str()).collect();
        out.push_str(&format!("\n  missing: {}", names.join(", ")));
    } else if let Some(cause) = err.details.get("error").and_then(|v| v.as_str()) {
        out.push_str(&format!("\n  {}", cause));
        if let Some(context) = err.details.get("context").and_then(|v| v.as_str()) {
            out.push_str(&format!(" ({})", context));
        }
    }

    for hint in &err.hints {
        out.push_str(&format!("\n  hint: {}", hint.message));
    }

    out
}

pub fn map_cmd_result<T>(result: Result<(T, i32)>) -> (Result<T>, i32) {
    match result {
        Ok((data, exit_code)) => (Ok(data), exit_code),
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match map_cmd_result(result) {
        (Ok(data), exit_code) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        (Err(err), exit_code) => (Err(err), exit_code),
    }
}

fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigAlreadyExists
        | ErrorCode::ValidationMissingArgument
        | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}
