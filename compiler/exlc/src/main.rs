//! EXL command-line driver.

use exlc::commands::{eval_expr, parse_expr, run_vector_files};
use exlc::config::{parse_eval_options, VectorRunConfig};
use exlc::init_tracing;

fn main() {
    // `--log=<filter>` is accepted anywhere on the command line
    let mut log_filter = None;
    let args: Vec<String> = std::env::args()
        .filter(|arg| match arg.strip_prefix("--log=") {
            Some(filter) => {
                log_filter = Some(filter.to_string());
                false
            }
            None => true,
        })
        .collect();
    init_tracing(log_filter.as_deref());

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: exl parse <expr>");
                std::process::exit(1);
            }
            parse_expr(&args[2]);
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: exl eval <expr> [--set name=value]... [--repeat=N]");
                std::process::exit(1);
            }
            let config = match parse_eval_options(&args[3..]) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            };
            eval_expr(&args[2], &config);
        }
        "test" => {
            // Flags can come before or after the paths
            let mut paths = Vec::new();
            let mut config = VectorRunConfig::default();

            for arg in args.iter().skip(2) {
                if let Some(filter) = arg.strip_prefix("--filter=") {
                    config.filter = Some(filter.to_string());
                } else if arg == "--verbose" || arg == "-v" {
                    config.verbose = true;
                } else if arg == "--no-parallel" {
                    config.parallel = false;
                } else if arg.starts_with('-') {
                    eprintln!("error: unknown option `{arg}`");
                    std::process::exit(1);
                } else {
                    paths.push(arg.clone());
                }
            }

            if paths.is_empty() {
                eprintln!("Usage: exl test <file.vec>... [--no-parallel] [--verbose] [--filter=<text>]");
                std::process::exit(1);
            }
            run_vector_files(&paths, &config);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("exl {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("EXL expression language");
    println!();
    println!("Usage: exl <command> [options]");
    println!();
    println!("Commands:");
    println!("  parse <expr>         Print the parsed tree");
    println!("  eval <expr>          Evaluate an expression and print the value");
    println!("  test <file.vec>...   Run golden-vector files");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Eval options:");
    println!("  --set name=value    Bind a symbol (value is itself an expression)");
    println!("  --repeat=<n>        Evaluate the parsed tree n times");
    println!();
    println!("Test options:");
    println!("  --filter=<text>     Only run vectors whose source contains text");
    println!("  --verbose, -v       Show passing vectors too");
    println!("  --no-parallel       Run vectors sequentially");
    println!();
    println!("Global options:");
    println!("  --log=<filter>      Enable tracing output (overrides RUST_LOG)");
    println!();
    println!("Examples:");
    println!("  exl parse 'a + b * c'");
    println!("  exl eval 'scale(level, 0, 127, 0, 1.0)' --set level=64");
    println!("  exl eval 'x * 2' --set x=21 --repeat=100000");
    println!("  exl test compiler/exlc/tests/vectors/eval.vec");
    println!("  exl eval 'abs(-2)' --log=exl_eval=trace");
}
