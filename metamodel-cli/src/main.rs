mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger, MergedConfig, OutputFormat};
use metamodel_load::{LoadedSchema, OrderScope, load_schemas};
use metamodel_types::{Schema, retain_strings};
use serde::Serialize;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "metamodel",
    version,
    about = "Decode, inspect, and check meta model schema documents."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every collection's members in declaration order.
    Inspect(InspectArgs),
    /// Decode every schema document and report the ones that fail.
    Check(LoadArgs),
}

#[derive(Debug, Parser)]
struct LoadArgs {
    /// Project root holding metamodel.toml (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Schema directory (default: <root>/schema).
    #[arg(long)]
    schema_dir: Option<Utf8PathBuf>,

    /// Glob pattern for schema documents (default: *.yaml).
    #[arg(long)]
    pattern: Option<String>,

    /// Declaration order numbering scope.
    #[arg(long, value_enum)]
    order_scope: Option<ScopeArg>,
}

#[derive(Debug, Parser)]
struct InspectArgs {
    #[command(flatten)]
    load: LoadArgs,

    /// Output format (text, json).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only show members whose type holds text.
    #[arg(long, default_value_t = false)]
    strings_only: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ScopeArg {
    /// One sequence for the whole run.
    Process,
    /// Restart numbering for every document.
    Document,
}

impl From<ScopeArg> for OrderScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Process => OrderScope::Process,
            ScopeArg::Document => OrderScope::Document,
        }
    }
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn merged_config(
    args: &LoadArgs,
    format: Option<OutputFormat>,
    strings_only: bool,
) -> anyhow::Result<MergedConfig> {
    let file_config =
        config::load_or_default(&args.root).context("load metamodel.toml config")?;
    let merged = ConfigMerger::new(file_config).merge(
        &args.root,
        CliOverrides {
            schema_dir: args.schema_dir.clone(),
            pattern: args.pattern.clone(),
            order_scope: args.order_scope.map(OrderScope::from),
            format,
            strings_only,
        },
    );
    debug!(
        "merged config: schema_dir={}, pattern={}, order_scope={:?}",
        merged.schema_dir, merged.load.pattern, merged.load.order_scope
    );
    Ok(merged)
}

/// One document as printed by `inspect --format json`.
#[derive(Debug, Serialize)]
struct InspectedDocument<'a> {
    name: &'a str,
    path: &'a str,
    #[serde(flatten)]
    schema: &'a Schema,
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<ExitCode> {
    let merged = merged_config(&args.load, args.format, args.strings_only)?;
    let loaded = load_schemas(&merged.schema_dir, &merged.load)
        .with_context(|| format!("load schemas from {}", merged.schema_dir))?;

    let mut documents = Vec::with_capacity(loaded.len());
    for doc in &loaded {
        let mut schema = doc
            .schema
            .clone()
            .with_context(|| format!("decode {}", doc.path))?;
        if merged.strings_only {
            schema.retain(retain_strings());
        }
        documents.push((doc, schema));
    }

    match merged.format {
        OutputFormat::Text => {
            for (doc, schema) in &documents {
                println!("# {} ({})", doc.name, doc.path);
                for (collection, fields) in &schema.collections {
                    for (field, member) in fields.declared() {
                        println!("{collection}.{field}\t{}\t#{}", member.kind, member.order);
                    }
                }
            }
        }
        OutputFormat::Json => {
            let out: Vec<InspectedDocument<'_>> = documents
                .iter()
                .map(|(doc, schema)| InspectedDocument {
                    name: &doc.name,
                    path: doc.path.as_str(),
                    schema,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_check(args: LoadArgs) -> anyhow::Result<ExitCode> {
    let merged = merged_config(&args, None, false)?;
    let loaded = load_schemas(&merged.schema_dir, &merged.load)
        .with_context(|| format!("load schemas from {}", merged.schema_dir))?;

    let mut failed = 0usize;
    for LoadedSchema { path, schema, .. } in &loaded {
        match schema {
            Ok(schema) => println!("ok\t{path}\t{} members", schema.member_count()),
            Err(err) => {
                failed += 1;
                println!("error\t{path}\t{err}");
            }
        }
    }

    println!("{} document(s), {} failed", loaded.len(), failed);
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
