// CLI entrypoint: prints the field list of each structcode given on the command line.

use std::process::ExitCode;

use clap::Parser;

use structcode::config::DEFAULT_MAX_DEPTH;
use structcode::{parse_with, Dtype, ParseOptions};

#[derive(Parser, Debug)]
#[command(
    name = "numpy-structcode",
    version,
    about = "Translate struct/array-interface format strings into NumPy field descriptors"
)]
struct Cli {
    /// Structcodes to parse, e.g. '<2i(3,3)d:m:'
    #[arg(required = true, value_name = "STRUCTCODE")]
    codes: Vec<String>,

    /// Maximum nesting depth of `{...}` groups
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print descriptors prefixed with the byte order, as handed to NumPy
    #[arg(long)]
    endianized: bool,

    /// Do not print recovered diagnostics
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = ParseOptions::new().with_max_depth(cli.max_depth);
    let mut failed = false;

    for code in &cli.codes {
        let res = parse_with(code, options);
        if !cli.quiet {
            for diag in &res.diagnostics {
                eprintln!("warning: {:?}: {}", code, diag);
            }
        }
        let byte_order = res.byte_order.clone();
        match Dtype::from_parse(code, res) {
            Ok(dtype) => {
                println!("{:?} (byte order {:?})", code, byte_order);
                for (name, descriptor) in dtype.pairs() {
                    let descriptor = if cli.endianized {
                        descriptor
                    } else {
                        &descriptor[byte_order.len()..]
                    };
                    println!("    {}: {}", name, descriptor);
                }
            }
            Err(err) => {
                eprintln!("error: {}", err);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
