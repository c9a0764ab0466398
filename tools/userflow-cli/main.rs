use clap::{Parser, Subcommand};
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userflow::graph::{GraphSnapshot, outline};
use userflow::prelude::*;
use userflow::suggestion::placement::overlap_score;

/// Inspect and edit user-flow documents from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to a layout/placeholder configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the node/edge graph of a flow as JSON
    Project {
        /// Path to the flow JSON file
        flow_path: String,
    },
    /// Print a human-readable outline of a flow
    Outline {
        /// Path to the flow JSON file
        flow_path: String,
    },
    /// Show where a step described by TEXT would be inserted
    Place {
        /// Path to the flow JSON file
        flow_path: String,
        /// Free-text description of the new step
        text: String,
    },
    /// Apply AI suggestions to a flow
    Apply {
        /// Path to the flow JSON file
        flow_path: String,
        /// Path to the raw suggestion response
        suggestions_path: String,
        /// Only apply the suggestion with this id
        #[arg(long)]
        id: Option<String>,
        /// Where to write the updated flow (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Create a flow document from a raw flow-generation response
    Import {
        /// Path to the raw generation response
        response_path: String,
        /// Name of the new flow
        #[arg(short, long, default_value = "Untitled Flow")]
        name: String,
        /// Where to write the new flow
        #[arg(short, long, default_value = "flow.json")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => FlowConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => FlowConfig::default(),
    };

    match cli.command {
        Command::Project { flow_path } => {
            let store = load_store(&flow_path, config);
            let snapshot = GraphSnapshot::new(&store.flow().name, store.graph());
            let json = snapshot
                .to_json()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to export graph: {}", e)));
            println!("{}", json);
        }
        Command::Outline { flow_path } => {
            let store = load_store(&flow_path, config);
            println!("{}", outline(store.graph(), &store.flow().name));
        }
        Command::Place { flow_path, text } => run_place(load_store(&flow_path, config), &text),
        Command::Apply {
            flow_path,
            suggestions_path,
            id,
            output,
        } => {
            let output = output.unwrap_or_else(|| flow_path.clone());
            run_apply(
                load_store(&flow_path, config),
                &suggestions_path,
                id.as_deref(),
                &output,
            );
        }
        Command::Import {
            response_path,
            name,
            output,
        } => run_import(&response_path, name, &output, config),
    }
}

fn load_store(path: &str, config: FlowConfig) -> FlowStore {
    let flow = Flow::from_file(path, &config.placeholders)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow: {}", e)));
    FlowStore::load(flow, config)
}

fn run_place(store: FlowStore, text: &str) {
    let Some(placement) = infer_placement(text, store.steps()) else {
        exit_with_error("The flow has no steps to place a new one against.");
    };
    let anchor = &store.steps()[placement.anchor_index];
    println!(
        "-> {} \"{}\" (step {}, rule {:?})",
        if placement.insert_after { "After" } else { "Before" },
        anchor.title,
        placement.anchor_index + 1,
        placement.rule
    );

    println!("\n--- Overlap Scores ---");
    for step in store.steps() {
        println!("{:>3}  {}", overlap_score(text, step), step.title);
    }
}

fn run_apply(mut store: FlowStore, suggestions_path: &str, only: Option<&str>, output: &str) {
    let response = fs::read_to_string(suggestions_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read suggestions file '{}': {}",
            suggestions_path, e
        ))
    });
    let suggestions = parse_suggestions(&response)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse suggestions: {}", e)));

    let mut board = SuggestionBoard::new();
    board.replace(suggestions);

    let ids: Vec<String> = board
        .suggestions()
        .iter()
        .filter(|s| only.is_none_or(|id| s.id == id))
        .map(|s| s.id.clone())
        .collect();
    if ids.is_empty() {
        exit_with_error("No matching suggestions to apply.");
    }

    println!("Applying {} suggestion(s) to '{}'...", ids.len(), store.flow().name);
    for id in &ids {
        let outcome = board.apply(id, &mut store);
        let notice = Notice::from_outcome(&outcome);
        match notice.detail {
            Some(detail) => println!("  [{:?}] {}: {} ({})", notice.level, id, notice.message, detail),
            None => println!("  [{:?}] {}: {}", notice.level, id, notice.message),
        }
    }

    store
        .flow()
        .save(output)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to save flow: {}", e)));
    println!(
        "\nSaved {} steps to '{}' ({} suggestion(s) left unapplied).",
        store.steps().len(),
        output,
        board.len()
    );
}

fn run_import(response_path: &str, name: String, output: &str, config: FlowConfig) {
    let response = fs::read_to_string(response_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read response file '{}': {}",
            response_path, e
        ))
    });

    let mut store = FlowStore::new(name, config);
    let ticket = store.ticket();
    let steps = parse_generated_steps(&response, &store.config().placeholders)
        .unwrap_or_else(|e| exit_with_error(&format!("Could not read generated flow: {}", e)));
    store
        .apply_generated(ticket, steps)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    store
        .flow()
        .save(output)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to save flow: {}", e)));
    println!("{}", outline(store.graph(), &store.flow().name));
    println!("\nSaved to '{}'.", output);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
