//! Unix permission algebra.
//!
//! - `model` - `PermissionSet`, the canonical bit-level value
//! - `convert` - octal / symbolic / binary translation and input detection
//! - `calc` - add / remove / mask over octal operands
//! - `explain` - per-subject human description
//! - `common` - reference table of everyday modes

pub mod calc;
pub mod common;
pub mod convert;
pub mod explain;
pub mod model;

pub use calc::{calculate, CalcOperation, CalcRequest, CalcResult};
pub use common::{render_common, CommonPattern, COMMON_PATTERNS};
pub use convert::{
    binary_breakdown, convert, detect_format, octal_to_binary, octal_to_symbolic, parse_octal,
    parse_symbolic, symbolic_to_octal, Conversion, OutputTarget, PermissionFormat,
};
pub use explain::{explain, Explanation, SubjectExplanation, DEFAULT_CHMOD_TARGET};
pub use model::{PermissionSet, Subject};
