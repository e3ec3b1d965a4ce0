use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dcpu16_asm::{assemble, AsmOptions, Assembly};

#[derive(Parser, Debug)]
#[command(author, version, about = "DCPU-16 two-pass assembler")]
struct Opts {
    /// Input assembly file (one instruction per line)
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Output binary (little-endian words)
    #[arg(value_name = "OUTPUT", default_value = "out.bin")]
    output: PathBuf,
    /// Fail on references to undefined labels instead of leaving them as 0
    #[arg(long)]
    strict: bool,
    /// Export the label table as JSON (Vec<{ name, address }>)
    #[arg(long, value_name = "FILE")]
    labels_out: Option<PathBuf>,
    /// Suppress the word listing and label table
    #[arg(short, long)]
    quiet: bool,
}

fn print_report(asm: &Assembly) {
    for l in &asm.listing {
        let hex: Vec<String> = l.words.iter().map(|w| format!("{w:04X}")).collect();
        println!("{:04X}: {:<15} {}", l.address, hex.join(" "), l.source);
    }
    for label in &asm.labels {
        println!("LABEL: {} ({:04X})", label.name, label.address);
    }
    for p in &asm.link.patched {
        println!("LINKED: {} ({:04X}) -> {:04X}", p.name, p.slot, p.target);
    }
    for r in &asm.link.unresolved {
        println!("UNRESOLVED: {} ({:04X}) on line {}", r.name, r.address, r.line);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;

    // nothing is written unless assembly and linking both succeed
    let asm = assemble(&text, AsmOptions { strict: opts.strict })?;
    if !opts.quiet {
        print_report(&asm);
    }
    fs::write(&opts.output, asm.to_bytes())
        .with_context(|| format!("writing {}", opts.output.display()))?;

    if let Some(path) = &opts.labels_out {
        fs::write(path, serde_json::to_string_pretty(&asm.labels)?)?;
    }
    Ok(())
}
