//! CLI response formatting and output.
//!
//! Provides the JSON envelope, plain-text printing, and exit code mapping.

use serde::Serialize;
use util::error::Hint;
use util::{Error, ErrorCode, Result};

/// Commands implement this to choose what plain-text mode prints.
pub trait TextOutput {
    fn to_text(&self) -> String;
}

/// A command result prepared for either output mode.
#[derive(Debug)]
pub struct Rendered {
    pub text: String,
    pub data: serde_json::Value,
}

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

    pub fn to_json(&self) -> Result<String> {
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

fn write_stdout(payload: &str) -> Result<()> {
    use std::io::{self, Write};

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

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    write_stdout(&response.to_json()?)
}

pub fn print_json_result(result: Result<Rendered>) -> Result<()> {
    match result {
        Ok(rendered) => print_response(&CliResponse::success(rendered.data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

pub fn print_text_result(result: Result<Rendered>) -> Result<()> {
    match result {
        Ok(rendered) => write_stdout(&rendered.text),
        Err(err) => {
            eprintln!("Error: {}", err.message);
            for hint in &err.hints {
                eprintln!("Hint: {}", hint.message);
            }
            Ok(())
        }
    }
}

pub fn map_cmd_result<T: Serialize + TextOutput>(
    result: Result<(T, i32)>,
) -> (Result<Rendered>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(&data) {
            Ok(value) => (
                Ok(Rendered {
                    text: data.to_text(),
                    data: value,
                }),
                exit_code,
            ),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::PermInvalidPermission
        | ErrorCode::PermInvalidOperation
        | ErrorCode::PermUnknownTarget
        | ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}
