// Command-line front end for gattcodec.
//
// Decodes characteristic values given as hex on the command line or as raw
// bytes in a file, and renders values through a presentation format
// descriptor.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::codec::{self, DecodeError, FormatType, Value};
use crate::presentation::{PRESENTATION_FORMAT_UUID, PresentationFormat, display_value};

// ---------------------------------------------------------------------------
// Hex parsing
// ---------------------------------------------------------------------------

/// Parse a hex byte string. Accepts an optional `0x` prefix and ignores
/// whitespace, `:` and `-` separators. An odd digit count is read as if a
/// leading `0` were present (`abc` is `0a bc`).
fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let trimmed = s.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let mut digits: Vec<u8> = body
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':' && *b != b'-')
        .collect();

    if !digits.len().is_multiple_of(2) {
        digits.insert(0, b'0');
    }
    digits
        .chunks_exact(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16);
            let lo = (pair[1] as char).to_digit(16);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi * 16 + lo) as u8),
                _ => Err(format!("invalid hex '{s}': bad digit")),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Bluetooth LE GATT characteristic value decoder.
#[derive(Parser, Debug)]
#[command(
    name = "gattcodec",
    version,
    about = "GATT characteristic value decoder",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON on stdout.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Decode an integer value.
    Int(IntArgs),
    /// Decode an SFLOAT or FLOAT value.
    Float(FloatArgs),
    /// Decode the bytes from an offset to the end as UTF-8 text.
    String(StringArgs),
    /// Render a value through a presentation format descriptor.
    Describe(DescribeArgs),
    /// Show a value: descriptor rendering, else UTF-8 text, else hex.
    Show(ShowArgs),
    /// List supported format tags.
    Formats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IntFormatArg {
    Uint8,
    Uint16,
    Uint32,
    Sint8,
    Sint16,
    Sint32,
}

impl From<IntFormatArg> for FormatType {
    fn from(arg: IntFormatArg) -> Self {
        match arg {
            IntFormatArg::Uint8 => FormatType::Uint8,
            IntFormatArg::Uint16 => FormatType::Uint16,
            IntFormatArg::Uint32 => FormatType::Uint32,
            IntFormatArg::Sint8 => FormatType::Sint8,
            IntFormatArg::Sint16 => FormatType::Sint16,
            IntFormatArg::Sint32 => FormatType::Sint32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FloatFormatArg {
    Sfloat,
    Float,
}

impl From<FloatFormatArg> for FormatType {
    fn from(arg: FloatFormatArg) -> Self {
        match arg {
            FloatFormatArg::Sfloat => FormatType::Sfloat,
            FloatFormatArg::Float => FormatType::Float,
        }
    }
}

#[derive(Args, Debug)]
struct ValueSource {
    /// Value bytes as hex (e.g. `72f0` or `"72 f0"`; odd length gets a leading 0).
    #[arg(
        value_name = "HEX",
        conflicts_with = "input",
        required_unless_present = "input"
    )]
    hex: Option<String>,

    /// Read raw value bytes from a file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct IntArgs {
    /// Integer format.
    #[arg(long, short = 'f', value_enum)]
    format: IntFormatArg,

    /// Byte offset of the value.
    #[arg(long, short = 'o', default_value_t = 0)]
    offset: usize,

    #[command(flatten)]
    source: ValueSource,
}

#[derive(Args, Debug)]
struct FloatArgs {
    /// Float format.
    #[arg(long, short = 'f', value_enum, default_value_t = FloatFormatArg::Sfloat)]
    format: FloatFormatArg,

    /// Byte offset of the value.
    #[arg(long, short = 'o', default_value_t = 0)]
    offset: usize,

    #[command(flatten)]
    source: ValueSource,
}

#[derive(Args, Debug)]
struct StringArgs {
    /// Byte offset where the text starts.
    #[arg(long, short = 'o', default_value_t = 0)]
    offset: usize,

    #[command(flatten)]
    source: ValueSource,
}

#[derive(Args, Debug)]
struct DescribeArgs {
    /// Presentation format descriptor (7 bytes) as hex.
    #[arg(value_name = "DESCRIPTOR")]
    descriptor: String,

    #[command(flatten)]
    source: ValueSource,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Presentation format descriptor (7 bytes) as hex, if the
    /// characteristic has one.
    #[arg(long, short = 'd', value_name = "HEX")]
    descriptor: Option<String>,

    #[command(flatten)]
    source: ValueSource,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Int,
    Float,
    String,
    Describe,
    Show,
    Formats,
}

impl Command {
    fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Describe => "describe",
            Self::Show => "show",
            Self::Formats => "formats",
        }
    }
}

#[derive(Debug)]
struct Options {
    command: Command,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    format: Option<FormatType>,
    offset: usize,
    hex: Option<String>,
    input_file: Option<PathBuf>,
    descriptor: Option<String>,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Formats,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        format: None,
        offset: 0,
        hex: None,
        input_file: None,
        descriptor: None,
    };

    let source = match cli.command {
        Cmd::Int(args) => {
            opts.command = Command::Int;
            opts.format = Some(args.format.into());
            opts.offset = args.offset;
            Some(args.source)
        }
        Cmd::Float(args) => {
            opts.command = Command::Float;
            opts.format = Some(args.format.into());
            opts.offset = args.offset;
            Some(args.source)
        }
        Cmd::String(args) => {
            opts.command = Command::String;
            opts.offset = args.offset;
            Some(args.source)
        }
        Cmd::Describe(args) => {
            opts.command = Command::Describe;
            opts.descriptor = Some(args.descriptor);
            Some(args.source)
        }
        Cmd::Show(args) => {
            opts.command = Command::Show;
            opts.descriptor = args.descriptor;
            Some(args.source)
        }
        Cmd::Formats => None,
    };

    if let Some(source) = source {
        opts.hex = source.hex;
        opts.input_file = source.input;
    }
    opts
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("gattcodec".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Input and output
// ---------------------------------------------------------------------------

fn load_value(opts: &Options) -> Result<Vec<u8>, String> {
    match (&opts.hex, &opts.input_file) {
        (Some(hex), _) => parse_hex(hex),
        (None, Some(path)) => {
            let bytes =
                std::fs::read(path).map_err(|e| format!("input file: {}: {e}", path.display()))?;
            log::debug!("read {} byte(s) from {}", bytes.len(), path.display());
            Ok(bytes)
        }
        (None, None) => Err("no value given (pass HEX or --input)".to_string()),
    }
}

fn value_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(v) => serde_json::json!(v),
        Value::Float(v) => serde_json::json!(v),
        Value::Text(s) => serde_json::json!(s),
    }
}

/// Print a decode result and return the exit code.
fn report(opts: &Options, len: usize, result: Result<Value, DecodeError>) -> i32 {
    let exit_code = i32::from(result.is_err());

    if opts.json_output {
        let (value, error) = match &result {
            Ok(value) => (value_json(value), serde_json::Value::Null),
            Err(e) => (serde_json::Value::Null, serde_json::json!(e.to_string())),
        };
        let json = serde_json::json!({
            "command": opts.command.name(),
            "format": opts.format.map(FormatType::name),
            "offset": opts.offset,
            "length": len,
            "value": value,
            "error": error,
        });
        println!("{json}");
        return exit_code;
    }

    match result {
        Ok(value) => {
            if !opts.quiet {
                println!("{value}");
            }
        }
        Err(e) => eprintln!("gattcodec: no value: {e}"),
    }
    exit_code
}

// ---------------------------------------------------------------------------
// Decode commands
// ---------------------------------------------------------------------------

fn cmd_decode(opts: &Options) -> i32 {
    let bytes = match load_value(opts) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("gattcodec: {e}");
            return 1;
        }
    };

    let result = match (opts.command, opts.format) {
        (Command::Int, Some(format)) => {
            codec::try_decode_int(&bytes, format, opts.offset).map(Value::Int)
        }
        (Command::Float, Some(format)) => {
            codec::try_decode_float(&bytes, format, opts.offset).map(Value::Float)
        }
        _ => codec::try_decode_string(Some(&bytes), opts.offset).map(Value::Text),
    };

    if opts.verbose > 0 && !opts.quiet {
        let format = opts.format.map_or("text", FormatType::name);
        eprintln!(
            "gattcodec: {}: {format} at offset {} of {} byte(s)",
            opts.command.name(),
            opts.offset,
            bytes.len()
        );
    }

    report(opts, bytes.len(), result)
}

// ---------------------------------------------------------------------------
// Describe command
// ---------------------------------------------------------------------------

fn cmd_describe(opts: &Options) -> i32 {
    let descriptor = match opts.descriptor.as_deref().map(parse_hex) {
        Some(Ok(bytes)) => bytes,
        Some(Err(e)) => {
            eprintln!("gattcodec: descriptor: {e}");
            return 1;
        }
        None => {
            eprintln!("gattcodec: descriptor: missing");
            return 1;
        }
    };
    let pf = match PresentationFormat::parse(&descriptor) {
        Ok(pf) => pf,
        Err(e) => {
            eprintln!("gattcodec: descriptor: {e}");
            return 1;
        }
    };
    let value = match load_value(opts) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("gattcodec: {e}");
            return 1;
        }
    };

    let rendered = pf.format_value(&value);
    let exit_code = i32::from(rendered.is_none());

    if opts.json_output {
        let json = serde_json::json!({
            "command": opts.command.name(),
            "descriptor_uuid": PRESENTATION_FORMAT_UUID,
            "format": pf.format.name(),
            "exponent": pf.exponent,
            "unit": pf.unit,
            "unit_symbol": pf.unit_symbol(),
            "namespace": pf.namespace,
            "description": pf.description,
            "description_text": pf.description_text(),
            "value": rendered,
        });
        println!("{json}");
        return exit_code;
    }

    match rendered {
        Some(text) => {
            if !opts.quiet {
                println!("{text}");
            }
        }
        None => eprintln!(
            "gattcodec: no value: cannot render {} byte(s) as {}",
            value.len(),
            pf.format
        ),
    }
    exit_code
}

// ---------------------------------------------------------------------------
// Show command
// ---------------------------------------------------------------------------

fn cmd_show(opts: &Options) -> i32 {
    let pf = match opts.descriptor.as_deref().map(parse_hex) {
        None => None,
        Some(Ok(bytes)) => match PresentationFormat::parse(&bytes) {
            Ok(pf) => Some(pf),
            Err(e) => {
                eprintln!("gattcodec: descriptor: {e}");
                return 1;
            }
        },
        Some(Err(e)) => {
            eprintln!("gattcodec: descriptor: {e}");
            return 1;
        }
    };
    let value = match load_value(opts) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("gattcodec: {e}");
            return 1;
        }
    };

    let shown = display_value(pf.as_ref(), &value);

    if opts.json_output {
        let json = serde_json::json!({
            "command": opts.command.name(),
            "format": pf.map(|pf| pf.format.name()),
            "length": value.len(),
            "value": shown,
        });
        println!("{json}");
    } else if !opts.quiet {
        println!("{shown}");
    }
    0
}

// ---------------------------------------------------------------------------
// Formats command
// ---------------------------------------------------------------------------

fn cmd_formats(opts: &Options) -> i32 {
    if opts.json_output {
        let formats: Vec<_> = FormatType::ALL
            .iter()
            .map(|f| {
                serde_json::json!({
                    "name": f.name(),
                    "tag": f.tag(),
                    "bytes": f.byte_len(),
                })
            })
            .collect();
        println!("{}", serde_json::Value::Array(formats));
        return 0;
    }

    for format in FormatType::ALL {
        println!(
            "{:<8} {:#04X}  {} byte(s)",
            format.name(),
            format.tag(),
            format.byte_len()
        );
    }
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    let filter = match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let exit_code = match opts.command {
        Command::Int | Command::Float | Command::String => cmd_decode(&opts),
        Command::Describe => cmd_describe(&opts),
        Command::Show => cmd_show(&opts),
        Command::Formats => cmd_formats(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
