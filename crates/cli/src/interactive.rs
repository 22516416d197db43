//! `sectiongen interactive` -- prompt loop around the generator.
//!
//! Each accepted description runs the full pipeline once. After a success
//! the user is asked whether to go again; after a failure the loop asks for
//! a new description.

use std::io::{self, BufRead, Write};
use std::path::Path;

use sectiongen_core::{Pipeline, SchemaSource};

use crate::config::GeneratorConfig;
use crate::report::print_run;
use crate::OutputFormat;

/// Read one trimmed line after printing `prompt`. `None` on EOF or error.
fn ask(reader: &mut impl BufRead, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => {
            println!();
            None
        }
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            eprintln!("error reading input: {}", e);
            None
        }
    }
}

fn wants_to_quit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q")
}

fn is_yes(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "y" | "yes")
}

/// Run the loop until the user leaves. Returns how many runs succeeded.
pub fn run_interactive(
    root: &Path,
    config: &GeneratorConfig,
    source: &dyn SchemaSource,
    output: OutputFormat,
    quiet: bool,
) -> usize {
    let pipeline = Pipeline::new(root, &config.section, &config.paths);
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut succeeded = 0;

    println!("Section generator ({})", root.display());
    println!("Describe the section you want, or type 'quit' to leave.");
    println!();

    loop {
        let Some(request) = ask(&mut reader, "description> ") else {
            break;
        };
        if wants_to_quit(&request) {
            break;
        }
        if request.is_empty() {
            eprintln!("please enter a description");
            continue;
        }

        let report = pipeline.run(source, &request, &mut rand::thread_rng());
        print_run(&report, output, quiet);
        if !report.success() {
            println!("Generation failed, try another description.");
            println!();
            continue;
        }
        succeeded += 1;

        println!();
        match ask(&mut reader, "Generate another? (y/n): ") {
            Some(answer) if is_yes(&answer) => println!(),
            _ => break,
        }
    }

    println!("Generated {} section(s).", succeeded);
    succeeded
}
