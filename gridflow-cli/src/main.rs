//! gridflow binary: compile a JSON grid description and run it.

use std::path::PathBuf;

use clap::Parser;

use gridflow_cli::{run_file, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "gridflow")]
#[command(about = "Compile and run a grid program from a JSON description")]
struct Args {
    /// Path to the program description (JSON)
    program: PathBuf,

    /// Override the program name from the file
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// Print the compiled action list
    #[arg(long)]
    show_actions: bool,

    /// Stop after compilation; do not run
    #[arg(long)]
    compile_only: bool,
}

fn main() {
    let args = Args::parse();
    let options = RunOptions {
        name_override: args.name,
        compile_only: args.compile_only,
    };

    let report = match run_file(&args.program, &options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Program: {}", report.name);
    for (stat, value) in &report.stats {
        println!("  {}: {}", stat, value);
    }

    if args.show_actions {
        println!("---");
        for action in &report.actions {
            println!("{}", action);
        }
    }

    if report.ran {
        println!("---");
        println!("Run complete.");
        for mark in &report.marks {
            println!("  marked {}", mark);
        }
        for (slot, vector) in &report.stored_vectors {
            println!("  slot {} = {}", slot + 1, vector);
        }
    }
}
