use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use netcalc_cidr::{CalcPolicy, SubnetCalculator};

mod batch;
mod output;

use batch::{BatchProcessor, BatchResult};
use output::OutputFormat;

/// IP subnet calculator: network address, mask and usable host range
#[derive(Parser)]
#[command(name = "netcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reject IPv6 prefixes longer than /126
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate one or more subnets given in CIDR notation
    Cidr(CidrArgs),
    /// Calculate a subnet from an address and a subnet mask
    Mask(MaskArgs),
    /// Batch process inputs from file or stdin, one per line
    Batch(BatchArgs),
}

#[derive(Parser)]
struct CidrArgs {
    /// Subnets such as 10.152.17.240/22 or 2001:db8::1/64
    #[arg(value_name = "CIDR", required = true)]
    cidrs: Vec<String>,
}

#[derive(Parser)]
struct MaskArgs {
    /// IP address
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Subnet mask such as 255.255.252.0
    #[arg(value_name = "MASK")]
    mask: String,
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads (default: CPU cores)
    #[arg(short, long)]
    workers: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let policy = if cli.strict {
        CalcPolicy::strict()
    } else {
        CalcPolicy::default()
    };
    let calculator = SubnetCalculator::new(policy);

    let results = match cli.command {
        Commands::Cidr(args) => handle_cidr(args, &calculator),
        Commands::Mask(args) => handle_mask(args, &calculator),
        Commands::Batch(args) => handle_batch(args, calculator)?,
    };

    output::print_results(&results, cli.output)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_cidr(args: CidrArgs, calculator: &SubnetCalculator) -> Vec<BatchResult> {
    info!("Calculating {} subnet(s)", args.cidrs.len());

    args.cidrs
        .iter()
        .map(|cidr| batch::calculate_cidr(calculator, cidr))
        .collect()
}

fn handle_mask(args: MaskArgs, calculator: &SubnetCalculator) -> Vec<BatchResult> {
    info!("Calculating {} with mask {}", args.address, args.mask);

    vec![batch::calculate_pair(calculator, &args.address, &args.mask)]
}

fn handle_batch(args: BatchArgs, calculator: SubnetCalculator) -> Result<Vec<BatchResult>> {
    let inputs = match args.file.as_deref() {
        None | Some("-") => {
            info!("Reading from stdin");
            batch::read_inputs(std::io::stdin().lock())?
        }
        Some(path) => {
            info!("Reading from: {}", path);
            let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
            batch::read_inputs(BufReader::new(file))?
        }
    };

    let processor = BatchProcessor::new(calculator, args.workers)?;
    info!(
        "Batch processing {} input(s) with {} workers",
        inputs.len(),
        processor.thread_count()
    );

    Ok(processor.process(inputs))
}
