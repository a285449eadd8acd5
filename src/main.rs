//! # FastUTF16 CLI - Streaming UTF-16 Converter
//!
//! Command-line interface for converting between UTF-16 byte streams and
//! UTF-8 text, with BOM and heuristic byte order detection.

#[cfg(feature = "cli")]
use std::fs::{self, File};
#[cfg(feature = "cli")]
use std::io::{self, BufWriter, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use tracing::debug;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use fast_utf16::detection::{self, Endianness, HEURISTIC_WINDOW};
#[cfg(feature = "cli")]
use fast_utf16::utf16::DEFAULT_ENCODING;
#[cfg(feature = "cli")]
use fast_utf16::{
    CodecLookup, DecoderOptions, EncoderOptions, Encoding, Registry, StreamingDecoder,
};

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features disabled. Enable with --features cli");
    std::process::exit(1);
}

/// FastUTF16: streaming UTF-16 converter
#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "fast-utf16")]
#[command(version, about, long_about = None)]
#[command(author = "FastEncode Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Decode UTF-16 bytes into UTF-8 text
    Decode(DecodeArgs),

    /// Encode UTF-8 text into UTF-16 bytes
    Encode(EncodeArgs),

    /// Report the byte order evidence found at the start of the input
    Detect(DetectArgs),

    /// List all supported encodings
    List(ListArgs),
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct DecodeArgs {
    /// Source encoding
    #[arg(short = 'f', long = "from", default_value = "utf-16")]
    from: String,

    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fallback byte order when neither BOM nor content decides
    #[arg(long)]
    default: Option<String>,

    /// Keep a leading BOM in the output
    #[arg(long)]
    keep_bom: bool,

    /// Decoder options as JSON, e.g. '{"default":"utf-16le"}'
    #[arg(long)]
    options: Option<String>,

    /// Read buffer size (KB)
    #[arg(long, default_value = "64")]
    buffer_size: usize,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct EncodeArgs {
    /// Target encoding
    #[arg(short = 't', long = "to", default_value = "utf-16")]
    to: String,

    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Byte order used by the generic utf-16 encoding
    #[arg(long = "use")]
    use_encoding: Option<String>,

    /// Do not prepend a BOM
    #[arg(long)]
    no_bom: bool,

    /// Encoder options as JSON, e.g. '{"use":"utf-16le","addBOM":false}'
    #[arg(long)]
    options: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct DetectArgs {
    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Fallback byte order reported when the evidence is inconclusive
    #[arg(long, default_value = DEFAULT_ENCODING)]
    default: String,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ListArgs {
    /// Show encoding details
    #[arg(long)]
    details: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct ConversionResult {
    success: bool,
    encoding: String,
    bytes_processed: usize,
    bytes_written: usize,
    processing_time_ms: u64,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct DetectionReport {
    detected_encoding: Option<String>,
    bom: Option<Endianness>,
    spaces_be: usize,
    spaces_le: usize,
    window: usize,
    sample_size: usize,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode(ref args) => decode_command(args, &cli)?,
        Commands::Encode(ref args) => encode_command(args, &cli)?,
        Commands::Detect(ref args) => detect_command(args, &cli)?,
        Commands::List(ref args) => list_command(args, &cli)?,
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading input file");
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => {
            debug!("reading from stdin");
            Ok(Box::new(io::stdin().lock()))
        }
    }
}

#[cfg(feature = "cli")]
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[cfg(feature = "cli")]
fn parse_options<T: serde::de::DeserializeOwned + Default>(json: Option<&str>) -> Result<T> {
    match json {
        Some(json) => serde_json::from_str(json).context("Invalid --options JSON"),
        None => Ok(T::default()),
    }
}

#[cfg(feature = "cli")]
fn report(result: &ConversionResult, to_stdout: bool, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result)?;
            if to_stdout {
                println!("{}", json);
            } else {
                eprintln!("{}", json);
            }
        }
        OutputFormat::Text => {
            if cli.verbose {
                eprintln!(
                    "✓ Processed {} bytes -> {} bytes in {} ms",
                    result.bytes_processed, result.bytes_written, result.processing_time_ms
                );
            }
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn decode_command(args: &DecodeArgs, cli: &Cli) -> Result<()> {
    let start_time = std::time::Instant::now();

    let mut options: DecoderOptions = parse_options(args.options.as_deref())?;
    if let Some(ref default) = args.default {
        options.default = Some(default.clone());
    }
    if args.keep_bom {
        options.strip_bom = Some(false);
    }
    debug!(encoding = %args.from, ?options, "decoding");

    let mut stream = StreamingDecoder::new(&args.from, &options)
        .with_context(|| format!("Failed to create decoder for {}", args.from))?;

    let mut reader = open_input(args.input.as_deref())?;
    let mut writer = open_output(args.output.as_deref())?;

    let mut buffer = vec![0u8; args.buffer_size.max(1) * 1024];
    let mut bytes_processed = 0;
    let mut bytes_written = 0;

    loop {
        let read = reader.read(&mut buffer).context("Failed to read input")?;
        if read == 0 {
            break;
        }
        bytes_processed += read;

        let text = stream.process_chunk(&buffer[..read])?;
        writer.write_all(text.as_bytes()).context("Failed to write output")?;
        bytes_written += text.len();
    }

    let text = stream.finish()?;
    writer.write_all(text.as_bytes()).context("Failed to write output")?;
    writer.flush().context("Failed to flush output")?;
    bytes_written += text.len();

    let result = ConversionResult {
        success: true,
        encoding: args.from.clone(),
        bytes_processed,
        bytes_written,
        processing_time_ms: u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    report(&result, args.output.is_some(), cli)
}

#[cfg(feature = "cli")]
fn encode_command(args: &EncodeArgs, cli: &Cli) -> Result<()> {
    let start_time = std::time::Instant::now();

    let mut options: EncoderOptions = parse_options(args.options.as_deref())?;
    if let Some(ref use_encoding) = args.use_encoding {
        options.use_encoding = Some(use_encoding.clone());
    }
    if args.no_bom {
        options.add_bom = Some(false);
    }
    debug!(encoding = %args.to, ?options, "encoding");

    let text = match args.input {
        Some(ref path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read from stdin")?;
            text
        }
    };

    let mut encoder = Registry::new()
        .get_encoder(&args.to, &options)
        .with_context(|| format!("Failed to create encoder for {}", args.to))?;
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut bytes = encoder.write(&units)?;
    bytes.extend(encoder.end()?);

    let mut writer = open_output(args.output.as_deref())?;
    writer.write_all(&bytes).context("Failed to write output")?;
    writer.flush().context("Failed to flush output")?;

    let result = ConversionResult {
        success: true,
        encoding: args.to.clone(),
        bytes_processed: text.len(),
        bytes_written: bytes.len(),
        processing_time_ms: u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    report(&result, args.output.is_some(), cli)
}

#[cfg(feature = "cli")]
fn detect_command(args: &DetectArgs, cli: &Cli) -> Result<()> {
    let mut sample = Vec::with_capacity(HEURISTIC_WINDOW);
    open_input(args.input.as_deref())?
        .take(HEURISTIC_WINDOW as u64)
        .read_to_end(&mut sample)
        .context("Failed to read input")?;

    let evidence = detection::analyze(&sample);
    let detected = DetectionReport {
        detected_encoding: detection::decide(&sample, &args.default).map(str::to_owned),
        bom: evidence.and_then(|e| e.bom),
        spaces_be: evidence.map_or(0, |e| e.spaces_be),
        spaces_le: evidence.map_or(0, |e| e.spaces_le),
        window: evidence.map_or(0, |e| e.window),
        sample_size: sample.len(),
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&detected)?);
        }
        OutputFormat::Text => {
            match detected.detected_encoding {
                Some(ref encoding) => println!("Detected encoding: {}", encoding),
                None => println!("Detected encoding: none (fewer than 2 bytes)"),
            }
            match detected.bom {
                Some(bom) => println!("BOM detected: {:?}", bom),
                None => println!(
                    "Spaces: {} big-endian, {} little-endian in {} bytes",
                    detected.spaces_be, detected.spaces_le, detected.window
                ),
            }
            println!("Sample size: {} bytes", detected.sample_size);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn list_command(args: &ListArgs, cli: &Cli) -> Result<()> {
    let registry = Registry::new();

    match cli.format {
        OutputFormat::Json => {
            let mut encodings_info = Vec::new();
            for encoding in Encoding::ALL {
                encodings_info.push(serde_json::json!({
                    "name": encoding.name(),
                    "aliases": encoding.aliases(),
                    "bom": encoding.bom().map(|b| format!("{:02X?}", b)),
                    "bom_aware": registry.codec(encoding.name())?.bom_aware(),
                    "description": get_encoding_description(encoding),
                }));
            }
            println!("{}", serde_json::to_string_pretty(&encodings_info)?);
        }
        OutputFormat::Text => {
            println!("Supported Encodings ({} total):", Encoding::ALL.len());
            println!();

            for encoding in Encoding::ALL {
                println!("{:10} {}", encoding.name(), get_encoding_description(encoding));

                if args.details {
                    println!("           Aliases: {}", encoding.aliases().join(", "));
                    match encoding.bom() {
                        Some(bom) => println!("           BOM: {:02X?}", bom),
                        None => println!("           BOM: chosen by --use / detected"),
                    }
                    println!();
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn get_encoding_description(encoding: Encoding) -> &'static str {
    match encoding {
        Encoding::Utf16Be => "Unicode Transformation Format 16-bit, big-endian",
        Encoding::Utf16Le => "Unicode Transformation Format 16-bit, little-endian",
        Encoding::Utf16 => "UTF-16 with byte order from BOM, content heuristic or default",
    }
}
