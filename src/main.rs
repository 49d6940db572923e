use clap::Parser;

use commands::GlobalArgs;
use util::defaults::{self, OutputFormat};

mod commands;
mod output;

use commands::{config, perm};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "util")]
#[command(version = VERSION)]
#[command(about = "A collection of utility commands.")]
struct Cli {
    /// Print results as a JSON envelope instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// File permission conversions and calculations
    #[command(
        long_about = "Convert and calculate Unix/Linux file permissions between different formats."
    )]
    Perm(perm::PermArgs),
    /// Manage global util configuration
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let settings = defaults::load_defaults();

    let json = cli.json || settings.output.format == OutputFormat::Json;
    let global = GlobalArgs {
        chmod_target: settings.perm.chmod_target,
    };

    let (result, exit_code) = commands::run(cli.command, &global);

    let printed = if json {
        output::print_json_result(result)
    } else {
        output::print_text_result(result)
    };

    if let Err(err) = printed {
        eprintln!("Error: {}", err.message);
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
