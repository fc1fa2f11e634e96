//! verscan - Parse version identifiers against a declarative field scheme
//!
//! The scheme is either the built-in semantic version layout or a list of
//! `NAME=DECL` field declarations given on the command line or in a file.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;
use verscan_core::{FieldDescriptor, FieldKind, Scanner, ScannerConfig, SemVersion, Target};

/// Parse version identifiers against a declarative field scheme
#[derive(Parser, Debug)]
#[command(name = "verscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Version string to parse
    input: String,

    #[command(flatten)]
    scheme: SchemeSource,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value = "key-value")]
    format: OutputFormat,

    /// Maximum input length in bytes (0 = unlimited)
    #[arg(long, default_value = "0")]
    max_len: usize,
}

#[derive(Args, Debug)]
#[group(required = false, multiple = false)]
struct SchemeSource {
    /// Field declaration such as `major=0,number,.1` (repeatable)
    #[arg(short, long = "field", value_name = "NAME=DECL", value_parser = parse_field_arg)]
    fields: Vec<FieldDecl>,

    /// File with one `NAME = DECL` declaration per line
    #[arg(short, long)]
    scheme: Option<PathBuf>,

    /// Use the built-in semantic version scheme (the default)
    #[arg(long)]
    semver: bool,
}

/// Output format for parsed fields
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// `name=value` per populated field
    KeyValue,
    /// Bare value per field, empty line when not populated (for scripting)
    Values,
}

/// A named field declaration from the command line or a scheme file
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldDecl {
    name: String,
    declaration: String,
}

/// A value written by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Number(i64),
    Text(String),
}

/// One output line: a field and what the scan left in it
#[derive(Debug, PartialEq, Eq)]
struct Row {
    name: String,
    value: Option<Value>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let scanner = Scanner::with_config(ScannerConfig::new().max_input_len(cli.max_len));

    // Dispatch based on scheme source
    let rows = if let Some(ref path) = cli.scheme.scheme {
        let decls = load_scheme(path)?;
        parse_with_decls(&scanner, &decls, &cli.input)?
    } else if !cli.scheme.fields.is_empty() {
        parse_with_decls(&scanner, &cli.scheme.fields, &cli.input)?
    } else {
        if !cli.scheme.semver {
            debug!("No scheme given, falling back to semver");
        }
        parse_semver(&scanner, &cli.input)?
    };

    print!("{}", render(&rows, cli.format));
    Ok(())
}

/// Parses a `NAME=DECL` command line argument
fn parse_field_arg(arg: &str) -> std::result::Result<FieldDecl, String> {
    let (name, declaration) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=DECL, got '{}'", arg))?;
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", arg));
    }
    Ok(FieldDecl {
        name: name.to_string(),
        declaration: declaration.to_string(),
    })
}

/// Parses scheme file contents: `NAME = DECL` lines, `#` comments, blank lines
fn parse_scheme(text: &str) -> Result<Vec<FieldDecl>> {
    let mut decls = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((name, declaration)) = line.split_once('=') else {
            bail!("line {}: expected NAME = DECL, got '{}'", number + 1, line);
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("line {}: missing field name", number + 1);
        }

        decls.push(FieldDecl {
            name: name.to_string(),
            declaration: declaration.trim().to_string(),
        });
    }

    if decls.is_empty() {
        bail!("scheme declares no fields");
    }
    Ok(decls)
}

/// Reads and parses a scheme file
fn load_scheme(path: &Path) -> Result<Vec<FieldDecl>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scheme file: {}", path.display()))?;
    let decls = parse_scheme(&text)
        .with_context(|| format!("Invalid scheme file: {}", path.display()))?;
    debug!("Loaded {} field declarations from {}", decls.len(), path.display());
    Ok(decls)
}

/// Parses `input` against user-supplied declarations
fn parse_with_decls(scanner: &Scanner, decls: &[FieldDecl], input: &str) -> Result<Vec<Row>> {
    info!("Parsing '{}' with {} declared fields", input, decls.len());

    let mut values: Vec<Option<Value>> = vec![None; decls.len()];
    let descriptors = decls
        .iter()
        .zip(values.iter_mut())
        .map(|(decl, slot)| bind(decl, slot))
        .collect::<verscan_core::Result<Vec<_>>>()
        .context("Invalid field scheme")?;

    scanner
        .parse(descriptors, input)
        .with_context(|| format!("Failed to parse version '{}'", input))?;

    Ok(decls
        .iter()
        .zip(values)
        .map(|(decl, value)| Row {
            name: decl.name.clone(),
            value,
        })
        .collect())
}

/// Builds a descriptor whose target records into `slot`
fn bind<'a>(
    decl: &FieldDecl,
    slot: &'a mut Option<Value>,
) -> verscan_core::Result<FieldDescriptor<'a>> {
    // An unknown tag is reported by the declaration parser; any target will do
    let kind = decl
        .declaration
        .split(',')
        .nth(1)
        .and_then(FieldKind::from_tag)
        .unwrap_or(FieldKind::Text);

    let target = match kind {
        FieldKind::Number => Target::number_with(move |n| *slot = Some(Value::Number(n))),
        FieldKind::Text => Target::text_with(move |s| *slot = Some(Value::Text(s.to_string()))),
    };
    FieldDescriptor::from_declaration(decl.name.as_str(), &decl.declaration, target)
}

/// Parses `input` with the built-in semantic version scheme
fn parse_semver(scanner: &Scanner, input: &str) -> Result<Vec<Row>> {
    info!("Parsing '{}' as a semantic version", input);

    let mut version = SemVersion::default();
    scanner
        .parse_into(&mut version, input)
        .with_context(|| format!("Failed to parse version '{}'", input))?;

    let row = |name: &str, value: Value| Row {
        name: name.to_string(),
        value: Some(value),
    };
    Ok(vec![
        row("major", Value::Number(version.major)),
        row("minor", Value::Number(version.minor)),
        row("patch", Value::Number(version.patch)),
        row("pre_release", Value::Text(version.pre_release)),
        row("build", Value::Text(version.build)),
    ])
}

/// Formats rows for output
fn render(rows: &[Row], format: OutputFormat) -> String {
    let mut out = String::new();
    for row in rows {
        let value = match &row.value {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Text(s)) => s.clone(),
            None => String::new(),
        };
        match format {
            OutputFormat::KeyValue => {
                if row.value.is_some() {
                    let _ = writeln!(out, "{}={}", row.name, value);
                }
            }
            OutputFormat::Values => {
                let _ = writeln!(out, "{}", value);
            }
        }
    }
    out
}
