//! GRN CLI — build, run and inspect gene regulatory networks
//!
//! Commands:
//!   grn random  — run a network grown from a seeded random genome
//!   grn run     — stabilise and run a network read from a genes file
//!   grn bits    — same, from a file of '0'/'1' characters
//!   grn graph   — write a dot graph of a network with demo inputs
//!   grn encode  — print the canonical gene encoding of a genome

use grn_core::genome::loader::{format_words, load_bits_file, load_words_file};
use grn_core::report::{append_table_to_file, write_dot_file, write_state, write_table};
use grn_core::{Genome, Grn, GrnConfig, Protein};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::io::{self, Write};

const DEFAULT_SEED: u64 = 42;
const DEFAULT_STEPS: usize = 2000;
const DEFAULT_WORDS: usize = 128;

fn print_usage() {
    println!(
        r#"
GRN v0.1 — Artificial Gene Regulatory Network

Usage: grn [--config <file.json>] <command> [options]

Commands:
  random  [seed] [steps] [words]     Run a random genome, append results to <seed>.grn
  run     <genes-file> [steps]       Stabilise then run a word-format genome
  bits    <binary-file> [steps]      Stabilise then run a '0'/'1' text genome
  graph   <genes-file> [name]        Write <name>.dot with four demo inputs injected
  encode  <genes-file>               Print the canonical encoding of the genes found

Examples:
  grn random 7 500
  grn run network.genes 100
  grn --config tuned.json bits genome.txt
  grn graph network.genes graph
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args: Vec<String> = env::args().collect();
    let config = match take_config(&mut args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("  {}", e);
            return;
        }
    };

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "random" => cmd_random(&args[2..], config),
        "run" => cmd_run(&args[2..], config, false),
        "bits" => cmd_run(&args[2..], config, true),
        "graph" => cmd_graph(&args[2..], config),
        "encode" => cmd_encode(&args[2..], config),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
        }
    }
}

/// Strip `--config <path>` from the arguments and load it
fn take_config(args: &mut Vec<String>) -> grn_core::Result<GrnConfig> {
    match args.iter().position(|a| a == "--config") {
        Some(i) if i + 1 < args.len() => {
            let path = args.remove(i + 1);
            args.remove(i);
            GrnConfig::load(path)
        }
        Some(i) => {
            args.remove(i);
            Err(grn_core::GrnError::InvalidConfig("--config needs a file path".into()))
        }
        None => Ok(GrnConfig::default()),
    }
}

fn parse_or<T: std::str::FromStr>(arg: Option<&String>, default: T) -> T {
    arg.and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn build(genome: &Genome, inputs: Vec<Protein>, config: GrnConfig) -> Option<Grn> {
    match Grn::new(genome, inputs, config) {
        Ok(grn) => {
            println!("  {}", grn.summary());
            Some(grn)
        }
        Err(e) => {
            eprintln!("  Failed to build network: {}", e);
            None
        }
    }
}

fn cmd_random(args: &[String], config: GrnConfig) {
    let seed: u64 = parse_or(args.first(), DEFAULT_SEED);
    let steps: usize = parse_or(args.get(1), DEFAULT_STEPS);
    let words: usize = parse_or(args.get(2), DEFAULT_WORDS);

    let mut rng = StdRng::seed_from_u64(seed);
    let genome = Genome::random(words, &mut rng);
    println!("  Genome {} ({} words, seed {})", genome.fingerprint(), words, seed);

    let Some(mut grn) = build(&genome, Vec::new(), config) else {
        return;
    };
    let history = grn.run(steps);

    let path = format!("{}.grn", seed);
    match append_table_to_file(&path, &grn, &history) {
        Ok(()) => println!("  Wrote {} rows to {}", history.rows(), path),
        Err(e) => eprintln!("  Failed to write results: {}", e),
    }
}

fn cmd_run(args: &[String], config: GrnConfig, binary: bool) {
    if args.is_empty() {
        eprintln!("Usage: grn {} <file> [steps]", if binary { "bits" } else { "run" });
        return;
    }
    let steps: usize = parse_or(args.get(1), DEFAULT_STEPS);

    let loaded = if binary {
        load_bits_file(&args[0])
    } else {
        load_words_file(&args[0])
    };
    let genome = match loaded {
        Ok(genome) => genome,
        Err(e) => {
            eprintln!("  {}", e);
            return;
        }
    };

    let Some(mut grn) = build(&genome, Vec::new(), config) else {
        return;
    };
    let init = grn.init();
    println!(
        "  Stabilised in {} steps ({})",
        init.steps_run(),
        if init.at_rest() { "at rest" } else { "capped" }
    );
    let history = grn.run(steps);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_table(&mut out, &grn, &history, true).and_then(|_| out.flush()) {
        eprintln!("  Failed to print results: {}", e);
    }
}

fn cmd_graph(args: &[String], config: GrnConfig) {
    if args.is_empty() {
        eprintln!("Usage: grn graph <genes-file> [name]");
        return;
    }
    let name = args.get(1).map(String::as_str).unwrap_or("graph");

    let genome = match load_words_file(&args[0]) {
        Ok(genome) => genome,
        Err(e) => {
            eprintln!("  {}", e);
            return;
        }
    };
    let Some(mut grn) = build(&genome, Vec::new(), config) else {
        return;
    };

    grn.inject_inputs(vec![
        Protein::input(0x0000_0000, 0.0),
        Protein::input(0x0000_FFFF, 0.1),
        Protein::input(0xFFFF_0000, 0.1),
        Protein::input(0xFFFF_FFFF, 0.1),
    ]);

    let stdout = io::stdout();
    if let Err(e) = write_state(&mut stdout.lock(), &grn) {
        eprintln!("  Failed to print state: {}", e);
    }
    match write_dot_file(".", &grn, name) {
        Ok(path) => println!("  Wrote {}", path.display()),
        Err(e) => eprintln!("  Failed to write graph: {}", e),
    }
}

fn cmd_encode(args: &[String], config: GrnConfig) {
    if args.is_empty() {
        eprintln!("Usage: grn encode <genes-file>");
        return;
    }
    let genome = match load_words_file(&args[0]) {
        Ok(genome) => genome,
        Err(e) => {
            eprintln!("  {}", e);
            return;
        }
    };
    if let Some(grn) = build(&genome, Vec::new(), config) {
        println!("{}", format_words(&grn.encoding()));
    }
}
