//! Bitwise permission arithmetic: add, remove and mask.

use std::str::FromStr;

use serde::Serialize;

use super::model::{PermissionSet, MAX_MODE};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcOperation {
    /// Union of both operands.
    Add,
    /// Bits of the first operand not present in the second.
    Remove,
    /// Intersection of both operands.
    Mask,
}

impl CalcOperation {
    pub const ALL: [CalcOperation; 3] = [
        CalcOperation::Add,
        CalcOperation::Remove,
        CalcOperation::Mask,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalcOperation::Add => "add",
            CalcOperation::Remove => "remove",
            CalcOperation::Mask => "mask",
        }
    }

    pub fn apply(&self, left: u32, right: u32) -> u32 {
        let result = match self {
            CalcOperation::Add => left | right,
            CalcOperation::Remove => left & !right,
            CalcOperation::Mask => left & right,
        };
        result & MAX_MODE
    }
}

impl FromStr for CalcOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CalcOperation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| Error::invalid_operation(s, "unknown operation"))
    }
}

/// A validated calculation: operation plus both operands parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcRequest {
    pub operation: CalcOperation,
    pub left: u32,
    pub right: u32,
}

impl CalcRequest {
    /// Every operation needs two operands, so a missing `right` is rejected
    /// here rather than in each branch.
    pub fn new(operation: CalcOperation, left: &str, right: Option<&str>) -> Result<Self> {
        let right = right.ok_or_else(|| {
            Error::invalid_operation(
                operation.as_str(),
                format!("{} requires two permissions", operation.as_str()),
            )
        })?;

        Ok(Self {
            operation,
            left: parse_operand(left)?,
            right: parse_operand(right)?,
        })
    }

    pub fn evaluate(&self) -> CalcResult {
        let mode = self.operation.apply(self.left, self.right);
        let perms = PermissionSet::from_mode(mode);

        CalcResult {
            operation: self.operation,
            octal: format!("{:03o}", mode),
            symbolic: perms.symbolic(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalcResult {
    pub operation: CalcOperation,
    pub octal: String,
    pub symbolic: String,
}

impl CalcResult {
    /// `755 (rwxr-xr-x)`
    pub fn display(&self) -> String {
        format!("{} ({})", self.octal, self.symbolic)
    }
}

/// Parse an operand as a base-8 number no larger than `7777`.
fn parse_operand(value: &str) -> Result<u32> {
    let mode = u32::from_str_radix(value, 8)
        .map_err(|_| Error::invalid_permission(value, "not a valid octal number"))?;

    if mode > MAX_MODE {
        return Err(Error::invalid_permission(value, "permission exceeds 7777"));
    }

    Ok(mode)
}

/// Run `operation` over two octal operands.
pub fn calculate(operation: CalcOperation, left: &str, right: Option<&str>) -> Result<CalcResult> {
    Ok(CalcRequest::new(operation, left, right)?.evaluate())
}
