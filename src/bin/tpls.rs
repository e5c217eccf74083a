//! Command-line interface for tpls
//! This binary parses FANUC TP `.ls` program files and reports the result.
//!
//! Usage:
//!   tpls parse `<path>` [--format `<format>`]  - Parse a program and dump its AST
//!   tpls check `<path>`                      - Parse only; exit non-zero on failure

use clap::{Arg, Command};
use std::process;

use tpls::parse_program;
use tpls::tp::ast::Program;

fn main() {
    let matches = Command::new("tpls")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A parser for FANUC TP teach pendant programs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a program and dump its AST")
                .arg(
                    Arg::new("path")
                        .help("Path to the .ls program file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'summary')")
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a program, reporting only success or failure")
                .arg(
                    Arg::new("path")
                        .help("Path to the .ls program file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").unwrap();
            let format = parse_matches.get_one::<String>("format").unwrap();
            handle_parse_command(path, format);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            handle_check_command(path);
        }
        _ => unreachable!(),
    }
}

fn read_source(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: cannot read {}: {}", path, error);
            process::exit(2);
        }
    }
}

fn parse_or_exit(path: &str) -> Program {
    match parse_program(&read_source(path)) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{}:{}", path, error);
            process::exit(1);
        }
    }
}

/// Handle the parse command
fn handle_parse_command(path: &str, format: &str) {
    let program = parse_or_exit(path);
    match format {
        "json" => match serde_json::to_string_pretty(&program) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("error: cannot serialize AST: {}", error);
                process::exit(2);
            }
        },
        "summary" => print_summary(&program),
        other => {
            eprintln!("error: unknown format '{}' (expected 'json' or 'summary')", other);
            process::exit(2);
        }
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let program = parse_or_exit(path);
    println!(
        "{}: ok ({} instructions, {} positions)",
        program.header.name,
        program.instructions.len(),
        program.positions.len()
    );
}

fn print_summary(program: &Program) {
    println!("program {}", program.header.name);
    if let Some(sub_type) = &program.header.sub_type {
        println!("  sub-type {}", sub_type);
    }
    for attribute in &program.header.attributes {
        println!("  attr {} = {:?}", attribute.key, attribute.value);
    }
    for instruction in &program.instructions {
        println!(
            "  {:>4}: {}",
            instruction.number,
            instruction.instruction.family()
        );
    }
    for position in &program.positions {
        println!(
            "  P[{}] {} group(s)",
            position.index,
            position.groups.len()
        );
    }
}
