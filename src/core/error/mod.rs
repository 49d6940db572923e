use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    PermInvalidPermission,
    PermInvalidOperation,
    PermUnknownTarget,

    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::PermInvalidPermission => "perm.invalid_permission",
            ErrorCode::PermInvalidOperation => "perm.invalid_operation",
            ErrorCode::PermUnknownTarget => "perm.unknown_target",

            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidPermissionDetails {
    pub value: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidOperationDetails {
    pub operation: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownTargetDetails {
    pub target: String,
    pub tried: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    /// Malformed octal or symbolic permission. The message always names the
    /// offending value so it reads on its own after `Error: `.
    pub fn invalid_permission(value: impl Into<String>, problem: impl Into<String>) -> Self {
        let value = value.into();
        let problem = problem.into();
        let message = format!("Invalid permission '{}': {}", value, problem);

        Self::new(
            ErrorCode::PermInvalidPermission,
            message,
            to_details(InvalidPermissionDetails { value, problem }),
        )
    }

    pub fn invalid_operation(operation: impl Into<String>, problem: impl Into<String>) -> Self {
        let operation = operation.into();
        let problem = problem.into();
        let message = format!("Invalid operation '{}': {}", operation, problem);

        Self::new(
            ErrorCode::PermInvalidOperation,
            message,
            to_details(InvalidOperationDetails { operation, problem }),
        )
        .with_hint("Supported operations: add, remove, mask (each takes two octal permissions)")
    }

    pub fn unknown_target(target: impl Into<String>, tried: Vec<String>) -> Self {
        let target = target.into();
        let message = format!("Unknown conversion target '{}'", target);

        Self::new(
            ErrorCode::PermUnknownTarget,
            message,
            to_details(UnknownTargetDetails { target, tried }),
        )
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            details,
        )
        .with_hint("Run 'util config reset' to restore the built-in defaults")
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.clone(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid configuration value: {}", problem),
            details,
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.clone(),
        });

        Self::new(ErrorCode::ValidationInvalidArgument, problem, details)
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        let message = match &context {
            Some(ctx) => format!("IO error ({}): {}", ctx, error),
            None => format!("IO error: {}", error),
        };

        Self::new(
            ErrorCode::InternalIoError,
            message,
            to_details(InternalIoErrorDetails { error, context }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::InternalUnexpected,
            format!("Unexpected error: {}", error),
            serde_json::json!({ "error": error }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_permission_names_value_in_message() {
        let err = Error::invalid_permission("888", "digit '8' is not octal");
        assert_eq!(err.code, ErrorCode::PermInvalidPermission);
        assert!(err.message.contains("888"));
        assert_eq!(err.details["value"], "888");
        assert_eq!(err.details["problem"], "digit '8' is not octal");
    }

    #[test]
    fn invalid_operation_carries_hint() {
        let err = Error::invalid_operation("remove", "second permission is required");
        assert_eq!(err.code.as_str(), "perm.invalid_operation");
        assert_eq!(err.hints.len(), 1);
    }

    #[test]
    fn invalid_argument_details_name_field() {
        let err = Error::validation_invalid_argument("pointer", "must start with '/'");
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
        assert_eq!(err.details["field"], "pointer");
        assert_eq!(err.details.as_object().map(|o| o.len()), Some(2));
    }

    #[test]
    fn display_is_message() {
        let err = Error::unknown_target("hex", vec!["symbolic".to_string()]);
        assert_eq!(err.to_string(), "Unknown conversion target 'hex'");
        assert_eq!(err.details["tried"][0], "symbolic");
    }
}
