mod commands;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slovo_protocol::Lexicon;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Slovo: Russian sentence analysis toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON lexicon into a validated rkyv binary
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Write the builtin lexicon as JSON, a starting point for `compile`
    Dump {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Rule-based analysis of Russian text
    Analyze {
        text: String,

        /// Compiled lexicon; the builtin one when omitted
        #[arg(short, long, value_name = "FILE")]
        lexicon: Option<PathBuf>,

        /// Print Markdown instead of JSON
        #[arg(long)]
        markdown: bool,
    },
    /// Parse a free-text analysis response into a constituent tree
    Parse {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Render sentence records (JSON) as a Markdown document
    Export {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn emit(output: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("✅ Written to {:?}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compile { input, output } => {
            eprintln!("📖 Reading JSON from {:?}...", input);
            let source = fs::read_to_string(&input)?;

            let (lexicon, bytes) = commands::compile(&source)?;
            eprintln!(
                "⚙️  Compiling lexicon version {} with {} entries...",
                lexicon.version,
                lexicon.entries.len()
            );

            fs::write(&output, bytes)?;
            eprintln!("✅ Success! Binary written to {:?}", output);
        }
        Command::Dump { output } => {
            let json = serde_json::to_string_pretty(&Lexicon::builtin())?;
            emit(output.as_ref(), &json)?;
        }
        Command::Analyze { text, lexicon, markdown } => {
            let lexicon = commands::load_lexicon(lexicon.as_deref())?;
            println!("{}", commands::analyze(&lexicon, &text, markdown)?);
        }
        Command::Parse { input } => {
            let text = fs::read_to_string(&input)?;
            println!("{}", commands::parse(&text)?);
        }
        Command::Export { input, output } => {
            let source = fs::read_to_string(&input)?;
            let markdown = commands::export(&source)?;
            emit(output.as_ref(), &markdown)?;
        }
    }

    Ok(())
}
