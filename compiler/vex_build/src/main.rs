//! VEX build CLI.

use std::path::Path;

use vex_build::{
    init_tracing, parse_build_options, BuildConfig, BuildRequest, BuildSession, Submission,
};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "build" => {
            let options = parse_build_options(&args[2..], BuildConfig::from_env());
            let Some(file) = options.file else {
                eprintln!("error: missing file path");
                print_build_usage();
                std::process::exit(1);
            };
            let source = read_file(&file);

            let session = BuildSession::new(options.config);
            let request = BuildRequest {
                source,
                file: Some(file),
                mode: options.mode,
            };
            match session.submit(request) {
                Submission::Started(handle) => {
                    let report = handle.join();
                    println!("{}", report.report.trim_end());
                    if !report.succeeded() {
                        std::process::exit(1);
                    }
                }
                Submission::Rejected => {
                    eprintln!("error: a build is already running");
                    std::process::exit(1);
                }
            }
        }
        "wrap" => {
            if args.len() < 3 {
                eprintln!("Usage: vex-build wrap <file>");
                std::process::exit(1);
            }
            let source = read_file(Path::new(&args[2]));
            match vex_snippet::wrap(&source) {
                Ok(wrapped) => print!("{}", wrapped.text),
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("vex-build {}", env!("CARGO_PKG_VERSION"));
        }
        command => {
            eprintln!("error: unknown command '{command}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn read_file(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read '{}': {err}", path.display());
            std::process::exit(1);
        }
    }
}

fn print_build_usage() {
    eprintln!("Usage: vex-build build <file> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --snippet             Wrap the file as a wrangle snippet (cvex context)");
    eprintln!("  --library             Compile as a CVEX library (cvex context)");
    eprintln!("  --vcc=<exe>           vcc executable (env: VEX_VCC, default: vcc)");
    eprintln!("  --timeout=<secs>      Stop vcc after this long (env: VEX_BUILD_TIMEOUT, default: 30)");
    eprintln!("  --include-dir=<dir>   Extra include directory (repeatable)");
    eprintln!("  --vex-output=<file>   Write compiled VEX to a file instead of discarding it");
    eprintln!("  --show-generated      Append the generated wrapper to snippet reports");
}

fn print_usage() {
    println!("VEX build tool");
    println!();
    println!("Usage: vex-build <command> [options]");
    println!();
    println!("Commands:");
    println!("  build <file>   Compile a VEX file or snippet and report diagnostics");
    println!("  wrap <file>    Print the function generated for a snippet");
    println!("  help           Show this message");
    println!("  version        Show version information");
    println!();
    println!("Set RUST_LOG=debug to trace a build.");
}
