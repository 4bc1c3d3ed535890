use std::{env, process};

use money_report_core::cli::{output, run_cli};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = run_cli(args) {
        output::error(err);
        process::exit(1);
    }
}
