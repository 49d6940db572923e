pub type CmdResult<T> = util::Result<(T, i32)>;

/// Settings resolved once in `main` and shared by every command.
pub(crate) struct GlobalArgs {
    pub chmod_target: String,
}

pub mod config;
pub mod perm;

/// Dispatch a command to its handler and render the result for both output modes.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result($module::run($args, $global))
    };
}

pub(crate) fn run(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (util::Result<crate::output::Rendered>, i32) {
    match command {
        crate::Commands::Perm(args) => dispatch!(args, global, perm),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}
