pub mod cli;
pub mod commands;
pub mod context;
pub mod observer;

use std::io::Write;

use crate::app::cli::CliArgs;
use crate::app::commands::Dispatcher;
use crate::app::context::AppContext;
use crate::errors::Result;
use crate::logging::LogTarget;
use crate::ui::ansi::Painter;

/// Run one parsed invocation, writing command output to `out`. Failures are
/// logged and reported as exit code 1.
pub fn run<W: Write>(args: &CliArgs, out: &mut W, painter: Painter) -> Result<i32> {
    let mut ctx = AppContext::new(args)?;
    let result = Dispatcher::new(&mut ctx, out, painter).execute(&args.command);
    match result {
        Ok(outcome) => Ok(outcome.exit_code()),
        Err(err) => {
            ctx.logger.error(err.to_string(), LogTarget::ConsoleAndFile);
            Ok(1)
        }
    }
}
