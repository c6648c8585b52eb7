use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ut61e_rs::logging::init_logger_with_default;
use ut61e_rs::util::hex::{format_hex_compact, parse_frame_text};
use ut61e_rs::util::logging::LogThrottle;
use ut61e_rs::log_warn_throttled;
use ut61e_rs::{log_info, FrameLog, OutputFormat, RawFrame};

#[derive(Parser)]
#[command(name = "ut61e-cli")]
#[command(about = "CLI tool for decoding UNI-T UT61E multimeter telegrams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for decoded measurements
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain, global = true)]
    format: OutputFormat,

    /// Print the CSV header before the first line
    #[arg(long, global = true)]
    header: bool,

    /// Stop at the first frame that fails to decode
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode frames given as hex ("34 32 32 b5 ...") or decimal ("52,50,50,-75,...")
    Decode {
        #[arg(required = true)]
        frames: Vec<String>,
    },
    /// Decode one frame per line of a capture file; '#' starts a comment line
    File { path: PathBuf },
    /// Show masked bytes, fields and parity of a frame without decoding it
    Inspect { frame: String },
}

fn main() -> anyhow::Result<()> {
    init_logger_with_default("warn");

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { ref frames } => {
            let lines = frames.iter().map(|f| Ok(f.clone()));
            run_frames(&cli, lines)
        }
        Commands::File { ref path } => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open capture {}", path.display()))?;
            run_frames(&cli, BufReader::new(file).lines())
        }
        Commands::Inspect { ref frame } => inspect(frame),
    }
}

fn run_frames<I>(cli: &Cli, lines: I) -> anyhow::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let stdout = io::stdout();
    let mut sink = FrameLog::new(stdout.lock(), cli.format);
    if cli.header {
        sink.write_header()?;
    }

    let mut parse_throttle = LogThrottle::new(1000, 5);
    for (line_no, line) in lines.enumerate() {
        let line = line.context("Failed to read capture")?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let bytes = match parse_frame_text(text) {
            Ok(bytes) => bytes,
            Err(e) if cli.strict => bail!("Line {}: {e}", line_no + 1),
            Err(e) => {
                log_warn_throttled!(parse_throttle, "Skipping line {}: {e}", line_no + 1);
                continue;
            }
        };

        if let Err(e) = sink.process(&bytes)? {
            if cli.strict {
                bail!("Line {}: {e}", line_no + 1);
            }
        }
    }
    sink.flush()?;

    let stats = sink.stats();
    log_info(&format!(
        "Decoded {} of {} frames ({} failed, {} warnings suppressed)",
        stats.decoded,
        stats.total(),
        stats.failed,
        sink.suppressed_warnings()
    ));
    Ok(())
}

fn inspect(frame: &str) -> anyhow::Result<()> {
    let bytes = parse_frame_text(frame).context("Failed to parse frame text")?;
    let inspection = RawFrame::inspect(&bytes)?;
    let fields = inspection.raw.fields();

    println!("masked:     {}", format_hex_compact(inspection.raw.bytes()));
    println!("digits:     {:?}", inspection.raw.digits());
    println!("mode:       0x{:X}", fields.mode_nibble);
    println!("unit index: {}", fields.unit_index);
    println!("type:       {:?}", fields.type_flags);
    println!("info:       {:?}", fields.info_flags);
    println!("underload:  {}", fields.underload);
    if inspection.parity_ok() {
        println!("parity:     ok");
    } else {
        println!("parity:     failed at {:?}", inspection.parity_failures);
    }
    Ok(())
}
