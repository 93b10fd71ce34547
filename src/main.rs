use anyhow::Context;
use clap::Parser;
use polyschema::config::{self, GenerationMode};
use polyschema::{PrismaSchemaGenerator, Schema};
use std::path::PathBuf;

/// Polyschema - compiles a data model with delegate inheritance into a Prisma schema
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input model document (YAML, or JSON by `.json` extension)
    #[arg(long, short)]
    input: PathBuf,

    /// Output schema file [env: POLYSCHEMA_OUTPUT]
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Generation mode [env: POLYSCHEMA_MODE, default: physical]
    #[arg(long, value_enum)]
    mode: Option<GenerationMode>,

    /// Skip the external formatter
    #[arg(long)]
    no_format: bool,

    /// Override the output path of `prisma-client-js` generators
    #[arg(long)]
    client_output: Option<String>,

    /// Formatter command line; the schema path is appended
    /// [env: POLYSCHEMA_FORMATTER, default: npx prisma format --schema]
    #[arg(long)]
    formatter: Option<String>,

    /// Kill the formatter after this many seconds
    #[arg(long)]
    formatter_timeout: Option<u64>,

    /// Maximum identifier length for generated names
    /// [env: POLYSCHEMA_IDENTIFIER_MAX_LENGTH, default: 50]
    #[arg(long)]
    identifier_max_length: Option<usize>,

    /// Project root used to detect the installed Prisma version
    /// [env: POLYSCHEMA_PROJECT_ROOT, default: .]
    #[arg(long)]
    project_root: Option<PathBuf>,
}

impl From<Cli> for config::CliConfig {
    fn from(cli: Cli) -> Self {
        config::CliConfig {
            output: cli.output,
            mode: cli.mode,
            // absent flag leaves POLYSCHEMA_FORMAT or the default in charge
            format: cli.no_format.then_some(false),
            override_client_output: cli.client_output,
            formatter_command: cli.formatter,
            formatter_timeout_secs: cli.formatter_timeout,
            identifier_max_length: cli.identifier_max_length,
            project_root: cli.project_root,
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let input = cli.input.clone();
    let config =
        config::CompilerConfig::from_env_and_cli(cli.into()).context("Configuration error")?;

    let schema = Schema::from_path(&input)
        .with_context(|| format!("Failed to load model from {}", input.display()))?;

    // warnings are already logged as they are raised
    let outcome = PrismaSchemaGenerator::new(&schema, &config).generate()?;
    log::info!(
        "Generated {} schema at {} ({} warning(s))",
        config.mode,
        outcome.output.display(),
        outcome.warnings.len()
    );
    Ok(())
}

fn main() {
    // before the logger so RUST_LOG may come from .env
    let dotenv = dotenvy::dotenv();

    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match dotenv {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) => log::debug!("No .env file loaded: {}", e),
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
