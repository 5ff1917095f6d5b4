use clap::Parser;
use rule_checker::{CheckArgs, Tool, run_cli};
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about = "Prints an approximate character and token count for the rule set.")]
struct Args {
    #[command(flatten)]
    check: CheckArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_cli(Tool::TokenEstimate, &args.check)
}
