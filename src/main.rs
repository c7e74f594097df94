use clap::{Arg, ArgAction, Command};
use dotenv::dotenv;
use std::path::PathBuf;
use std::process;

mod cli;

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let matches = build_cli().get_matches();

    match cli::commands::rewrite::handle_rewrite(&matches) {
        Ok(summary) if summary.has_failures() => process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn build_cli() -> Command {
    Command::new("gopkg-rewrite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrite `option go_package` in .proto files from their package name")
        .long_about(
            "Recursively scans directories for schema files and sets `option go_package` \
             from each file's `package` directive, rendered through a template.",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("dirs")
                .help("Root directories to scan recursively")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("package")
                .long("package")
                .help("Regex for matching the package [default: (.*)]")
                .value_name("REGEX"),
        )
        .arg(
            Arg::new("go_package")
                .long("go_package")
                .alias("go-package")
                .help("Template of go_package to be set [default: github.com/example/example/{{index . 1}}]")
                .value_name("TEMPLATE"),
        )
        .arg(
            Arg::new("require-package")
                .long("require-package")
                .help("Fail files that have no package directive")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .help("File name suffix of schema files [default: .proto]")
                .value_name("SUFFIX"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file (defaults to ./gopkg.toml if present)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Compute changes but don't write files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Summary output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Debug logging")
                .action(ArgAction::SetTrue),
        )
}
