use clap::Parser;
use rule_checker::{CheckArgs, Tool, run_cli};
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about = "Fails if any rule file exceeds the line limit.")]
struct Args {
    #[command(flatten)]
    check: CheckArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_cli(Tool::LineCheck, &args.check)
}
