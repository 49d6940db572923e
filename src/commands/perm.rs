use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use util::perm::{
    self, CalcOperation, CalcResult, CommonPattern, Conversion, Explanation, OutputTarget,
};

use super::{CmdResult, GlobalArgs};
use crate::output::TextOutput;

#[derive(Args)]
pub struct PermArgs {
    #[command(subcommand)]
    command: PermCommand,
}

#[derive(Subcommand)]
enum PermCommand {
    /// Convert between permission formats
    #[command(
        long_about = "Auto-detects input format and converts accordingly. Use --to to specify output format (symbolic, octal or binary)."
    )]
    Convert {
        /// Permission value to convert (e.g., 755 or rwxr-xr-x)
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Target format (auto-detected if not specified)
        #[arg(long, value_enum)]
        to: Option<TargetArg>,
    },
    /// Explain what permissions mean
    Explain {
        /// Octal permission to explain (e.g., 755)
        permission: String,
    },
    /// Calculate permissions
    Calc {
        /// Operation to perform
        #[arg(value_enum)]
        operation: OperationArg,

        /// First permission (octal)
        perm1: String,

        /// Second permission (octal)
        perm2: Option<String>,
    },
    /// List common permission patterns
    Common,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TargetArg {
    Symbolic,
    Octal,
    Binary,
}

impl From<TargetArg> for OutputTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Symbolic => OutputTarget::Symbolic,
            TargetArg::Octal => OutputTarget::Octal,
            TargetArg::Binary => OutputTarget::Binary,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OperationArg {
    Add,
    Remove,
    Mask,
}

impl From<OperationArg> for CalcOperation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Add => CalcOperation::Add,
            OperationArg::Remove => CalcOperation::Remove,
            OperationArg::Mask => CalcOperation::Mask,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum PermOutput {
    #[serde(rename = "perm.convert")]
    Convert(Conversion),

    #[serde(rename = "perm.explain")]
    Explain(Explanation),

    #[serde(rename = "perm.calc")]
    Calc(CalcResult),

    #[serde(rename = "perm.common")]
    Common { patterns: Vec<CommonPattern> },
}

impl TextOutput for PermOutput {
    fn to_text(&self) -> String {
        match self {
            PermOutput::Convert(conversion) => conversion.result.clone(),
            PermOutput::Explain(explanation) => explanation.render(),
            PermOutput::Calc(result) => result.display(),
            PermOutput::Common { .. } => perm::render_common(),
        }
    }
}

pub fn run(args: PermArgs, global: &GlobalArgs) -> CmdResult<PermOutput> {
    let output = match args.command {
        PermCommand::Convert { value, to } => {
            PermOutput::Convert(perm::convert(&value, to.map(OutputTarget::from))?)
        }
        PermCommand::Explain { permission } => {
            PermOutput::Explain(perm::explain(&permission, &global.chmod_target)?)
        }
        PermCommand::Calc {
            operation,
            perm1,
            perm2,
        } => PermOutput::Calc(perm::calculate(
            operation.into(),
            &perm1,
            perm2.as_deref(),
        )?),
        PermCommand::Common => PermOutput::Common {
            patterns: perm::COMMON_PATTERNS.to_vec(),
        },
    };

    Ok((output, 0))
}
