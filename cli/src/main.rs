use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use ini_lite::{Document, ParseOptions, Value, GLOBAL_SECTION};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ini", version, about = "Query INI configuration files")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Keep a trailing carriage return on values instead of trimming it.
    #[arg(long, global = true)]
    keep_cr: bool,

    /// Log parser activity to stderr (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List declared sections as "<index>\t<name>".
    Sections {
        /// Input file path. Omit or use '-' to read from stdin.
        input: Option<String>,
    },
    /// Print the first value stored under KEY.
    Get {
        key: String,

        /// Input file path. Omit or use '-' to read from stdin.
        input: Option<String>,

        /// Section to search (default: the global section).
        #[arg(short, long, value_name = "name")]
        section: Option<String>,

        /// How to read the value.
        #[arg(long = "as", value_enum, value_name = "type", default_value_t = ValueType::Str)]
        as_type: ValueType,

        /// Fail instead of printing zero when the value does not convert.
        #[arg(long)]
        strict: bool,
    },
    /// Write the parsed document as JSON.
    Dump {
        /// Input file path. Omit or use '-' to read from stdin.
        input: Option<String>,

        /// Output file path (prints to stdout if omitted).
        #[arg(short, long, value_name = "file")]
        output: Option<String>,

        /// Indentation size; 0 writes compact JSON (default: 2).
        #[arg(long, value_name = "number", default_value_t = 2)]
        indent: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ValueType {
    Str,
    Int,
    Float,
    Bool,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

impl InputSource {
    fn from_arg(input: Option<&str>) -> Self {
        match input {
            None | Some("-") => InputSource::Stdin,
            Some(path) => InputSource::File(path.to_string()),
        }
    }

    fn label(&self) -> &str {
        match self {
            InputSource::Stdin => "stdin",
            InputSource::File(path) => path,
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("ini_lite=debug"),
        _ => EnvFilter::new("ini_lite=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let options = ParseOptions::new().with_trim_carriage_return(!args.keep_cr);

    match args.command {
        Command::Sections { input } => {
            let doc = load(input.as_deref(), &options)?;
            run_sections(&doc)
        }
        Command::Get {
            key,
            input,
            section,
            as_type,
            strict,
        } => {
            let doc = load(input.as_deref(), &options)?;
            run_get(&doc, &key, section.as_deref(), as_type, strict)
        }
        Command::Dump {
            input,
            output,
            indent,
        } => {
            let doc = load(input.as_deref(), &options)?;
            run_dump(&doc, output.as_deref(), indent)
        }
    }
}

fn load(input: Option<&str>, options: &ParseOptions) -> Result<Document, Box<dyn Error>> {
    let source = InputSource::from_arg(input);
    let bytes = read_input(&source)?;
    let doc = ini_lite::from_slice_with_options(&bytes, options)?;
    debug!(
        input = source.label(),
        sections = doc.section_count(),
        properties = doc.property_count(),
        "loaded document"
    );
    Ok(doc)
}

fn read_input(source: &InputSource) -> Result<Vec<u8>, Box<dyn Error>> {
    match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        InputSource::File(path) => fs::read(path)
            .map_err(|err| format!("failed to read {path}: {err}").into()),
    }
}

fn run_sections(doc: &Document) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for section in doc.sections() {
        writeln!(handle, "{}\t{}", section.id(), section.name())?;
    }
    Ok(())
}

fn run_get(
    doc: &Document,
    key: &str,
    section: Option<&str>,
    as_type: ValueType,
    strict: bool,
) -> Result<(), Box<dyn Error>> {
    let id = match section {
        Some(name) => doc
            .find_section(name)
            .ok_or_else(|| format!("section not found: {name}"))?,
        None => GLOBAL_SECTION,
    };
    let value = doc
        .get(id, key)
        .ok_or_else(|| format!("key not found: {key}"))?;
    println!("{}", render_value(value, as_type, strict)?);
    Ok(())
}

fn render_value(value: Value<'_>, as_type: ValueType, strict: bool) -> ini_lite::Result<String> {
    Ok(match (as_type, strict) {
        (ValueType::Str, _) => value.as_str().to_string(),
        (ValueType::Int, false) => value.as_int().to_string(),
        (ValueType::Int, true) => value.parse_int()?.to_string(),
        (ValueType::Float, false) => value.as_float().to_string(),
        (ValueType::Float, true) => value.parse_float()?.to_string(),
        (ValueType::Bool, false) => value.as_bool().to_string(),
        (ValueType::Bool, true) => value.parse_bool()?.to_string(),
    })
}

fn run_dump(doc: &Document, output: Option<&str>, indent: usize) -> Result<(), Box<dyn Error>> {
    with_output_writer(output, |writer| {
        write_json(writer, doc, indent)?;
        writer.write_all(b"\n")?;
        Ok(())
    })?;
    if let Some(path) = output.filter(|path| *path != "-") {
        println!("✔ Dumped document → {path}");
    }
    Ok(())
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) if path != "-" => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_json<T: Serialize>(
    writer: &mut dyn Write,
    value: &T,
    indent: usize,
) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(writer, value)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}
