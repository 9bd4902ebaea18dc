//! Traceplot - renders diagnostic plots from trace-analysis data files.
//!
//! The first positional argument names a plotting routine; the remaining
//! arguments are passed to it verbatim (conventionally an input data file
//! followed by an output image file). `--cores` restricts per-core plots
//! to specific cores.

mod command;
mod data;
mod plot;
mod routines;

use anyhow::Result;
use clap::Parser;
use command::{CommandError, Options, Registry};
use std::process::ExitCode;

/// Plot generator for trace-analysis data files
#[derive(Parser, Debug)]
#[command(name = "traceplot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Space-separated list of integer core numbers; plots will include
    /// data from these cores only, where appropriate
    #[arg(long, value_name = "CORES")]
    cores: Option<String>,

    /// Name of the plotting routine to run
    routine: Option<String>,

    /// Arguments passed to the routine
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

fn print_usage(registry: &Registry) {
    println!("Available routines:");
    for routine in registry.routines() {
        println!("  {:<32} {}", routine.usage, routine.help);
    }
    println!();
    println!("Use --cores \"<n> <n> ...\" to restrict per-core plots to specific cores.");
}

fn run(args: &Args, registry: &Registry) -> Result<()> {
    let mut options = Options::default();
    if let Some(ref value) = args.cores {
        options.cores = Some(Options::parse_cores(value)?);
    }
    let name = args.routine.as_deref().ok_or(CommandError::NoRoutine)?;
    registry.dispatch(name, &options, &args.args)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let registry = Registry::new();
    match run(&args, &registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(cmd) = err.downcast_ref::<CommandError>() {
                println!("{cmd}");
                print_usage(&registry);
            } else {
                eprintln!("Error: {err:?}");
            }
            ExitCode::FAILURE
        }
    }
}
