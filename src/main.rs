use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use steering::cli::{Cli, Commands, ConfigAction, Display};
use steering::config::{ProjectPaths, SteeringConfig};
use steering::context::ContextAssembler;
use steering::document::{DocumentStore, SteeringLoader};
use steering::error::Result;
use steering::output::OutputWriter;
use steering::resolver::{InclusionResolver, TargetSet};

/// Loaded configuration plus the paths derived from it.
struct Project {
    paths: ProjectPaths,
    config: SteeringConfig,
}

impl Project {
    async fn load(root: PathBuf, config_file: Option<PathBuf>) -> Result<Self> {
        let root = std::path::absolute(&root)?;
        let config_file =
            config_file.unwrap_or_else(|| ProjectPaths::default_config_file(&root));
        let config = SteeringConfig::load(&config_file).await?;
        let paths = ProjectPaths::new(root, Some(config_file), &config);
        debug!(
            root = %paths.root.display(),
            steering_dir = %paths.steering_dir.display(),
            "Project loaded"
        );
        Ok(Self { paths, config })
    }

    async fn store(&self) -> Result<DocumentStore> {
        SteeringLoader::new(&self.paths.steering_dir)
            .load_store()
            .await
    }
}

struct ResolveArgs {
    files: Vec<PathBuf>,
    stdin: bool,
    manual: Vec<String>,
    max_bytes: Option<usize>,
    list_only: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Display::new().print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("steering=debug")
    } else {
        EnvFilter::new("steering=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let writer = OutputWriter::new(cli.output);
    let project = Project::load(cli.root, cli.config).await?;

    match cli.command {
        Commands::Resolve {
            files,
            stdin,
            manual,
            max_bytes,
            list_only,
        } => {
            let args = ResolveArgs {
                files,
                stdin,
                manual,
                max_bytes,
                list_only,
            };
            cmd_resolve(&writer, &project, args).await
        }
        Commands::List => cmd_list(&writer, &project).await,
        Commands::Check => cmd_check(&writer, &project).await,
        Commands::Config { action } => cmd_config(&writer, &project, action).await,
    }
}

async fn cmd_resolve(writer: &OutputWriter, project: &Project, args: ResolveArgs) -> Result<()> {
    let store = project.store().await?;

    let mut files = args.files;
    if args.stdin {
        files.extend(read_stdin_paths().await?);
    }
    // Targets are given relative to the working directory, not the root.
    let files = files
        .iter()
        .map(|f| Ok(project.paths.relativize(&std::path::absolute(f)?)))
        .collect::<Result<Vec<PathBuf>>>()?;

    let targets = TargetSet::from_paths(&files)?;
    let requested: BTreeSet<String> = args.manual.into_iter().collect();
    let result = InclusionResolver::new(&store).resolve(&targets, &requested);

    if args.list_only {
        writer.emit_resolution(&result);
        return Ok(());
    }

    let max_bytes = args.max_bytes.unwrap_or(project.config.context.max_bytes);
    let assembler =
        ContextAssembler::new(max_bytes).with_max_documents(project.config.context.max_documents);
    let context = assembler.assemble(&result);

    if context.is_truncated() {
        warn!(
            truncated = ?context.truncated,
            max_bytes = assembler.max_bytes(),
            "Steering context truncated"
        );
    }

    writer.emit_context(&result, &context);
    Ok(())
}

async fn cmd_list(writer: &OutputWriter, project: &Project) -> Result<()> {
    let store = project.store().await?;
    writer.emit_documents(&store);
    Ok(())
}

async fn cmd_check(writer: &OutputWriter, project: &Project) -> Result<()> {
    let store = project.store().await?;
    writer.emit_check(&store, &project.paths.steering_dir);
    Ok(())
}

async fn cmd_config(writer: &OutputWriter, project: &Project, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => writer.emit_config(&project.config),
        ConfigAction::Init => {
            let path = &project.paths.config_file;
            if tokio::fs::try_exists(path).await? {
                writer.emit_message(&format!(
                    "Configuration already exists at {}",
                    path.display()
                ));
            } else {
                SteeringConfig::default().save(path).await?;
                writer.emit_message(&format!(
                    "Wrote default configuration to {}",
                    path.display()
                ));
            }
            Ok(())
        }
    }
}

async fn read_stdin_paths() -> Result<Vec<PathBuf>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut paths = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            paths.push(PathBuf::from(line));
        }
    }
    Ok(paths)
}
