use anyhow::Context;
use clap::{Parser, Subcommand};
use storyboard_desc::{
    Config, DescriptionBlock, DescriptionCodec, DescriptionPhase, FlowStage,
};
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storyboard-desc")]
#[command(about = "Parse and edit storyboard description blocks", long_about = None)]
struct Args {
    /// Serialization spacing: `canonical` or `legacy` (falls back to STORYBOARD_SPACING)
    #[arg(long, global = true)]
    spacing: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Description text
    #[arg(short, long)]
    text: Option<String>,

    /// Description file path (stdin when neither --text nor --file is given)
    #[arg(short, long)]
    file: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the entries of a description block as JSON
    Parse {
        /// RoleDescription, FirstFrameDescription or VideoDescription
        #[arg(short, long)]
        phase: DescriptionPhase,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Replace one entry's content and print the whole block
    Merge {
        #[arg(short, long)]
        phase: DescriptionPhase,

        /// Entry label, e.g. "Character 2"
        #[arg(short, long)]
        key: String,

        /// New content for the entry
        #[arg(short, long)]
        content: String,

        /// Input is a JSON array of entries instead of description text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Empty one entry's content so it can be regenerated
    Clear {
        #[arg(short, long)]
        phase: DescriptionPhase,

        #[arg(short, long)]
        key: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// List the wizard stages and their task phases
    Phases,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 初始化日志，输出到 stderr，stdout 只留给结果
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    let config = Config::from_env(args.spacing.as_deref()).context("Invalid configuration")?;
    let codec = DescriptionCodec::from_config(&config);

    if let Err(e) = run(args.command, codec).await {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command, codec: DescriptionCodec) -> anyhow::Result<()> {
    match command {
        Command::Parse { phase, input } => {
            let raw = read_input(input).await?;
            match codec.parse(&raw, phase) {
                Some(blocks) => {
                    info!("Parsed {} {} entries", blocks.len(), phase);
                    println!("{}", serde_json::to_string_pretty(&blocks)?);
                }
                None => warn!("No structured {} entries found", phase),
            }
        }
        Command::Merge {
            phase,
            key,
            content,
            json,
            input,
        } => {
            let raw = read_input(input).await?;
            let merged = if json {
                let blocks =
                    DescriptionBlock::list_from_json(&raw).context("Failed to parse entries JSON")?;
                if blocks.is_empty() {
                    None
                } else {
                    Some(codec.merge_by_key(phase, &content, &blocks, &key))
                }
            } else {
                codec.merge_description(phase, &raw, &content, &key)
            };
            emit(merged, phase);
        }
        Command::Clear { phase, key, input } => {
            let raw = read_input(input).await?;
            emit(codec.clear_description(phase, &raw, &key), phase);
        }
        Command::Phases => {
            for stage in FlowStage::ORDER {
                let phases: Vec<String> = stage
                    .task_phases()
                    .iter()
                    .map(|phase| match phase.description_phase() {
                        Some(_) => format!("{}*", phase),
                        None => phase.to_string(),
                    })
                    .collect();
                println!("{:?}\t{}\t{}", stage, stage.title(), phases.join(", "));
            }
        }
    }

    Ok(())
}

fn emit(merged: Option<String>, phase: DescriptionPhase) {
    match merged {
        Some(text) => println!("{}", text),
        // 没有结构化内容时不输出，避免把残缺数据交给下游
        None => warn!("No structured {} entries found, nothing to merge", phase),
    }
}

async fn read_input(input: InputArgs) -> anyhow::Result<String> {
    if let Some(text) = input.text {
        return Ok(text);
    }

    if let Some(file_path) = input.file {
        return tokio::fs::read_to_string(&file_path)
            .await
            .context(format!("Failed to read file: {}", file_path));
    }

    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .context("Failed to read stdin")?;
    Ok(buffer)
}
