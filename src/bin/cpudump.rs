//! cpudump - dumps the CPUID leaves of every logical processor.
//!
//! Usage:
//!   cpudump                       # native instruction, XML to stdout
//!   cpudump -o cpuid.xml          # write to a file
//!   cpudump --format json         # JSON instead of XML
//!   cpudump --source device       # read /dev/cpu/<n>/cpuid instead

use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::{Parser, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use cpudump::output::{write_json, write_xml};
use cpudump::source::CpuIdFactory;
use cpudump::tree::CpuIdTree;
use cpudump::walk;

/// CPUID enumeration dumper.
#[derive(Parser)]
#[command(name = "cpudump", about = "CPUID enumeration dumper", version)]
struct Args {
    /// Query mechanism.
    #[arg(short, long, value_enum, default_value = "native")]
    source: SourceKind,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "xml")]
    format: Format,

    /// Output file. Defaults to stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is
    /// info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Execute the CPUID instruction pinned to each processor.
    Native,
    /// Read the kernel's /dev/cpu/<n>/cpuid devices.
    Device,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Xml,
    Json,
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("cpudump={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn build_factory(kind: SourceKind) -> Option<Box<dyn CpuIdFactory>> {
    match kind {
        #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
        SourceKind::Native => Some(Box::new(cpudump::source::NativeCpuIdFactory::new())),
        #[cfg(target_os = "linux")]
        SourceKind::Device => Some(Box::new(cpudump::source::DeviceCpuIdFactory::new())),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

fn render(args: &Args, tree: &CpuIdTree) -> io::Result<()> {
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        Format::Xml => write_xml(tree, &mut out)?,
        Format::Json => write_json(tree, &mut out)?,
    }
    out.flush()
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    let Some(factory) = build_factory(args.source) else {
        eprintln!("Error: the selected source is not available on this platform");
        std::process::exit(1);
    };

    let tree = walk::dump_all(factory.as_ref());
    let reachable = tree.iter().filter(|(_, p)| !p.is_empty()).count();
    info!("enumerated {} of {} processors", reachable, tree.len());

    if let Err(err) = render(&args, &tree) {
        eprintln!("Error: cannot write output: {err}");
        std::process::exit(1);
    }
}
