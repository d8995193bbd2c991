mod diagram;
mod lint;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use wfkit_types::WorkflowKind;

#[derive(Parser)]
#[command(name = "wfkit", about = "Workflow file linter and dependency diagram compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Agent,
    Command,
    Skill,
}

impl From<KindArg> for WorkflowKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Agent => WorkflowKind::Agent,
            KindArg::Command => WorkflowKind::Command,
            KindArg::Skill => WorkflowKind::Skill,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Mermaid,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint workflow files (agents, commands, skills)
    Lint {
        /// Files to lint
        files: Vec<PathBuf>,

        /// File kind (inferred from the path when omitted)
        #[arg(short, long)]
        kind: Option<KindArg>,

        /// Apply fixable diagnostics and write files back
        #[arg(long)]
        fix: bool,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a dependency diagram from an index file
    Diagram {
        /// Path to a dependency index JSON file
        index: PathBuf,

        /// Id of the entity to diagram
        #[arg(short, long)]
        select: String,

        /// Kind of the selected entity
        #[arg(short, long)]
        kind: KindArg,

        /// Output format
        #[arg(short, long, value_enum, default_value = "mermaid")]
        format: FormatArg,

        /// Skip the layout pass (JSON output keeps placeholder positions)
        #[arg(long)]
        no_layout: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lint {
            files,
            kind,
            fix,
            json,
        } => {
            let has_errors = lint::run_lint(&files, kind.map(Into::into), fix, json)?;
            if has_errors {
                std::process::exit(1);
            }
        }
        Commands::Diagram {
            index,
            select,
            kind,
            format,
            no_layout,
        } => {
            let output = diagram::run_diagram(&index, &select, kind.into(), format, no_layout)?;
            println!("{output}");
        }
    }

    Ok(())
}
