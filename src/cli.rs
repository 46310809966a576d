//! Minimal CLI: schema file(s) → TypeScript interface(s)
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;
use tracing::info;

use schema_iface::codegen::related_type_name;
use schema_iface::{generate, Generated, RelationTable, Schema};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile JSON-schema-like object descriptions into TypeScript interfaces
#[derive(Parser, Debug)]
#[command(name = "schema-iface", version)]
pub struct CommandLineInterface {
    /// log progress to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit one `export interface` per input schema
    Interface(InterfaceOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the schema inside each document (e.g. /components/schemas/User)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; must yield exactly one value
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct InterfaceOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// declaration name (single input only; otherwise derived from each file stem)
    #[arg(long)]
    name: Option<String>,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// write the relation lookup table (type name → foreign key) as JSON
    #[arg(long)]
    relations: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Debug)]
struct SourceSchema {
    path: PathBuf,
    schema: Schema,
}

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_schemas(&self) -> Result<Vec<SourceSchema>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .map_err(|error| anyhow!("failed to resolve input file paths: {error}"))?;
        source_paths
            .into_iter()
            .map(|path| {
                let schema = self
                    .load_one(&path)
                    .with_context(|| format!("failed to load schema ({})", path.display()))?;
                Ok(SourceSchema { path, schema })
            })
            .collect()
    }

    fn load_one(&self, source_path: &Path) -> Result<Schema> {
        let source = std::fs::read_to_string(source_path).context("failed to read source file")?;
        let mut json_value = serde_json::from_str::<Value>(&source).context("failed to parse JSON")?;

        if let Some(pointer) = self.json_pointer.as_deref() {
            json_value = json_value
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| anyhow!("JSON pointer {pointer} selects nothing"))?;
        }

        if let Some(jq_expr) = self.jq_expr.as_deref() {
            let mut results = schema_iface::jq_exec::run_jaq(jq_expr, &json_value)
                .context("failed to apply jq expression")?;
            if results.len() != 1 {
                bail!("jq expression must yield exactly one schema, got {}", results.len());
            }
            json_value = results.remove(0);
        }

        Ok(Schema::from_value(json_value)?)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Interface(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                // 1) load schemas
                let sources = target.input_settings.load_schemas()?;
                let names = sources
                    .iter()
                    .map(|s| declaration_name(target.name.as_deref(), &s.path, sources.len()))
                    .collect::<Result<Vec<_>>>()?;

                // 2) one independent run per schema
                let results = sources
                    .par_iter()
                    .zip(names.par_iter())
                    .map(|(source, name)| generate(name, &source.schema))
                    .collect::<Vec<_>>();

                // 3) collect in input order
                let mut declarations = Vec::with_capacity(results.len());
                let mut relations = RelationTable::new();
                for (source, result) in sources.iter().zip(results) {
                    let Generated { source: text, relations: table } = result
                        .with_context(|| format!("failed to generate ({})", source.path.display()))?;
                    info!(path = %source.path.display(), relations = table.len(), "generated");
                    declarations.push(text);
                    relations.merge(table);
                }

                write_or_print(target.out.as_deref(), &declarations.join("\n\n"))?;

                if let Some(path) = target.relations.as_deref() {
                    let json = serde_json::to_string_pretty(&relations)?;
                    write_or_print(Some(path), &json)?;
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `--name` wins for a single input; otherwise `user-profile.json` → `UserProfile`.
fn declaration_name(explicit: Option<&str>, source_path: &Path, inputs: usize) -> Result<String> {
    let name = match explicit {
        Some(_) if inputs > 1 => bail!("--name can only be used with a single input ({inputs} given)"),
        Some(name) => name.to_string(),
        None => {
            let stem = source_path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| anyhow!("cannot derive a name from {}", source_path.display()))?;
            related_type_name(stem)
        }
    };
    if !IDENTIFIER.is_match(&name) {
        bail!("`{name}` is not a valid declaration name");
    }
    Ok(name)
}

fn write_or_print(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                return Err(format!("glob pattern matched no files: {pattern}").into());
            }
            matched.sort();
            out.extend(matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
