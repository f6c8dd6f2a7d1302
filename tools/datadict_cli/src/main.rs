use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use datadict::{
    compile_schema, display_paths, parser, write_dictionary, CompileOptions, ForeignKeyPolicy,
    NamingPolicy,
};

mod logging;

#[derive(Parser)]
#[command(name = "datadict")]
#[command(about = "Compile a relational schema into CSV data dictionaries")]
#[command(version)]
struct Args {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one <table>-dd.csv file per concrete class
    Generate {
        /// Path to the schema YAML file
        schema: PathBuf,

        /// Directory to write the dictionary files into (created if missing)
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Naming policy for emitted names: preserve, underscore, camelcase
        #[arg(long)]
        naming: Option<NamingPolicy>,

        /// Foreign key policy: enabled, disabled (bare flag means enabled)
        #[arg(long, num_args = 0..=1, default_missing_value = "enabled")]
        foreign_keys: Option<ForeignKeyPolicy>,

        /// Shorthand for --foreign-keys disabled
        #[arg(long, conflicts_with = "foreign_keys")]
        no_foreign_keys: bool,

        /// YAML file with compile options; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    match args.command {
        Commands::Generate {
            schema,
            output_dir,
            naming,
            foreign_keys,
            no_foreign_keys,
            config,
        } => {
            let mut options = match config {
                Some(path) => CompileOptions::from_file(&path)
                    .with_context(|| format!("Failed to load config '{}'", path.display()))?,
                None => CompileOptions::default(),
            };
            if let Some(naming) = naming {
                options = options.with_naming(naming);
            }
            if let Some(policy) = foreign_keys {
                options = options.with_foreign_keys(policy);
            }
            if no_foreign_keys {
                options = options.with_foreign_keys(ForeignKeyPolicy::Disabled);
            }

            let paths = generate(&schema, &output_dir, &options)?;
            println!("{}", display_paths(&paths));
        }
    }

    Ok(())
}

/// Load, compile and write. Returns the written file paths.
fn generate(schema: &Path, output_dir: &Path, options: &CompileOptions) -> Result<Vec<PathBuf>> {
    tracing::debug!(
        schema = %schema.display(),
        naming = %options.naming,
        foreign_keys = %options.foreign_keys,
        "generating data dictionary"
    );

    let view = parser::load_file(schema)
        .with_context(|| format!("Failed to load schema '{}'", schema.display()))?;
    let compilation = compile_schema(&view, options).context("Failed to compile schema")?;
    if compilation.has_warnings() {
        tracing::info!(
            warnings = compilation.warnings.len(),
            "some ranges could not be resolved and were typed as string"
        );
    }

    write_dictionary(&compilation.dictionary, output_dir)
        .with_context(|| format!("Failed to write dictionary to '{}'", output_dir.display()))
}
