//! valuedoc - Generates reference documentation from an annotated values file

use std::{error::Error, path::PathBuf, process};

use clap::Parser;
use tracing::debug;
use valuedoc::{
    config::{DEFAULT_CONFIG_FILE, ValuedocConfig},
    docs::{DocsGenerator, OutputFormat},
    tracing_config,
};

#[derive(Parser, Debug)]
#[command(name = "valuedoc", version)]
#[command(about = "Generate documentation for a chart's values file")]
struct Cli {
    /// Path to a project's doc.{json|yaml} info file
    #[arg(short, long, default_value = "doc.yaml")]
    doc: PathBuf,

    /// Path to the chart values file
    #[arg(short, long, default_value = "values.yaml")]
    values: PathBuf,

    /// Path to a README template; the built-in one is used if it does not exist
    #[arg(short, long, default_value = "readme.tpl")]
    template: PathBuf,

    /// Path to the output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON Schema file that `$ref` markers resolve against
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Path to valuedoc.toml
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// What to generate
    #[arg(long, value_enum, default_value_t = OutputFormat::Readme)]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = tracing_config::init() {
        eprintln!("failed to initialize logging: {e}");
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    debug!(?cli, "starting");
    let config = ValuedocConfig::load(&cli.config)?;

    DocsGenerator::new()
        .with_doc_file(cli.doc)
        .with_values_file(cli.values)
        .with_template_file(cli.template)
        .with_schema_file(cli.schema)
        .with_output_file(cli.output)
        .with_format(cli.format)
        .with_config(config)
        .generate()?;

    Ok(())
}
