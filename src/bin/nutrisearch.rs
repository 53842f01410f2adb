//! Interactive food search and diet tracking CLI.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use nutrisearch::{Catalog, NutrientReport, Ranker, Sampler, Session, Tokenizer, Turn, VectorSpace};

#[derive(Parser)]
#[command(name = "nutrisearch", about = "Search a food catalog and track nutrients against daily targets")]
struct Cli {
    /// Path to the food catalog CSV.
    #[arg(default_value = "food.csv")]
    data: PathBuf,

    /// Seed for the option shuffle; fixed seeds give a reproducible
    /// display order.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the nutrition report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let catalog = Catalog::load(&cli.data)
        .with_context(|| format!("loading catalog from {}", cli.data.display()))?;
    let tokenizer = Tokenizer::new();
    let space = VectorSpace::build(&catalog, &tokenizer).context("indexing catalog")?;
    let ranker = Ranker::new(&space, &tokenizer);
    let sampler = match cli.seed {
        Some(seed) => Sampler::with_seed(seed),
        None => Sampler::new(),
    };
    let mut session = Session::new(&catalog, ranker, sampler);

    println!(
        "Loaded {} foods. Type a keyword to search, 'calculate' for your report, 'exit' to quit.",
        catalog.len()
    );

    let mut rl = DefaultEditor::new().context("initializing prompt")?;
    while !session.finished() {
        let prompt = if session.awaiting_query() {
            "search> "
        } else {
            "choice> "
        };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("reading input"),
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match session.handle_line(&line) {
            Turn::Options { query, options } => {
                println!("\nFood options containing '{query}':");
                for option in &options {
                    println!("{}. {}", option.number, option.description);
                }
                println!("Enter a number to select, R to refresh, N for a new search, Q to quit.");
            }
            Turn::NoMatch => {
                println!("No matching food found. Please try a different search.");
            }
            Turn::Selected { description } => {
                println!("Added '{description}' to your plan.");
            }
            Turn::NewSearch => {}
            Turn::Report(report) => print_report(&report, cli.json)?,
            Turn::Invalid { max_choice } => {
                println!(
                    "Invalid choice. Enter a number between 1 and {max_choice}, R to refresh, \
                     N for a new search, or Q to quit."
                );
            }
            Turn::Quit => break,
        }
    }

    Ok(())
}

fn print_report(report: &[NutrientReport], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nNutritional Analysis:");
    for line in report {
        println!(
            "{} (Target: {} grams): {}",
            line.kind, line.target, line.consumed
        );
    }

    let recommendations: Vec<String> = report
        .iter()
        .filter_map(|line| {
            line.advice.map(|advice| match advice {
                nutrisearch::Advice::Increase => format!("Increase {}", line.kind),
                nutrisearch::Advice::Decrease => format!("Decrease {}", line.kind),
            })
        })
        .collect();

    if !recommendations.is_empty() {
        println!("\nDietary Recommendations:");
        for recommendation in &recommendations {
            println!("{recommendation}");
        }
    }
    println!();

    Ok(())
}
