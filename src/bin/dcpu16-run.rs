use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dcpu16_rs::disasm::{disassemble, fmt_registers};
use dcpu16_rs::isa::dcpu16::Dcpu16Decoder;
use dcpu16_rs::{CpuConfig, Interpreter, RunExit};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a DCPU-16 binary image")]
struct Opts {
    /// CPU configuration as JSON (memory_words, load_address, initial_sp)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Start address (defaults to the load address)
    #[arg(short, long, value_parser = parse_u16)]
    entry: Option<u16>,
    /// Stop after this many instructions (default: run until a trap)
    #[arg(long)]
    max_steps: Option<u64>,
    /// Stop before executing the instruction at ADDR. Repeatable.
    #[arg(long = "break", value_name = "ADDR", value_parser = parse_u16)]
    breakpoints: Vec<u16>,
    /// Print each fetched instruction and the register set
    #[arg(long)]
    trace: bool,
    /// Write the final CPU state as JSON
    #[arg(long, value_name = "FILE")]
    dump_state: Option<PathBuf>,
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
}

fn parse_u16(s: &str) -> Result<u16, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse::<u16>()
    };
    parsed.map_err(|e| format!("bad address {s:?}: {e}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let cfg = match &opts.config {
        Some(path) => {
            let txt = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<CpuConfig>(&txt)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => CpuConfig::default(),
    };

    let bytes = std::fs::read(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let mut vm = Interpreter::new(cfg);
    vm.load_bytes(&bytes)?;
    if let Some(entry) = opts.entry {
        vm.cpu.pc = entry;
    }
    vm.breakpoints = opts.breakpoints.iter().copied().collect();

    let dec = Dcpu16Decoder::new();
    let trace = opts.trace;
    let outcome = vm.run(opts.max_steps, |cpu, mem| {
        if trace {
            let text = disassemble(&dec, mem.window(cpu.pc, 3))
                .map(|(t, _)| t)
                .unwrap_or_else(|| "<oob>".into());
            let skip = if cpu.skip_pending() { " (skipped)" } else { "" };
            println!("{}", fmt_registers(cpu));
            println!("{:04x}: {text}{skip}", cpu.pc);
        }
        false
    });

    match outcome {
        Ok(RunExit::Breakpoint(pc)) => println!("breakpoint at {pc:#06x}"),
        Ok(RunExit::BudgetExhausted) => println!("step budget exhausted"),
        Ok(RunExit::Halted) => println!("halted"),
        Err(trap) => eprintln!("TRAP: {trap}"),
    }
    println!("{}", fmt_registers(&vm.cpu));

    if let Some(path) = &opts.dump_state {
        std::fs::write(path, serde_json::to_string_pretty(&vm.cpu)?)?;
    }
    Ok(())
}
