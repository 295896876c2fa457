use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List leads sorted by propensity score (default if no subcommand)
    List {
        /// Emit tab-separated values for scripting
        #[arg(long)]
        tsv: bool,

        /// Emit the full score breakdown as JSON
        #[arg(long, conflicts_with = "tsv")]
        json: bool,
    },
    /// Show the full score breakdown for a lead by its index number
    Show {
        /// Index number of the lead (1-based, as shown in list)
        index: usize,
    },
    /// Write a starter config file with the default scoring tables
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "leadrank")]
#[command(about = "Biotech sales lead prioritization CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/leadrank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the leads JSON file (defaults to config `leads`, then leads.json)
    #[arg(short, long, global = true)]
    leads: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List {
        tsv: false,
        json: false,
    });
    let start_time = Instant::now();

    let config_path = cli.config.as_ref().map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = leadrank::config::run_init(config_path) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match leadrank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring = config.effective_scoring();
    if let Err(errors) = leadrank::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Resolve leads file: flag beats config, config beats the local default
    let leads_path = cli
        .leads
        .clone()
        .or_else(|| config.leads.clone())
        .unwrap_or_else(|| "leads.json".to_string());
    let leads_path = PathBuf::from(leads_path);

    let leads = match leadrank::leads::load_leads(&leads_path) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Leads error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if cli.verbose {
        eprintln!("Loaded {} leads from {}", leads.len(), leads_path.display());
        eprintln!(
            "Normalizing against max raw score {}",
            scoring.max_raw_score()
        );
    }

    // Score every lead; the engine is pure, so order does not matter
    let mut scored: Vec<_> = leads
        .iter()
        .map(|lead| (lead, leadrank::scoring::score(lead, &scoring)))
        .collect();

    // Sort by normalized score descending; raw score, then name, break ties
    scored.sort_by(|a, b| {
        b.1.normalized_score
            .cmp(&a.1.normalized_score)
            .then(b.1.raw_score.cmp(&a.1.raw_score))
            .then(a.0.name.cmp(&b.0.name))
    });

    let scored_refs: Vec<leadrank::output::ScoredLead> = scored
        .iter()
        .map(|(lead, result)| leadrank::output::ScoredLead { lead: *lead, result })
        .collect();

    match command {
        Commands::List { tsv, json } => {
            if tsv {
                let output = leadrank::output::format_tsv(&scored_refs);
                if !output.is_empty() {
                    println!("{}", output);
                }
            } else if json {
                let rows: Vec<_> = scored
                    .iter()
                    .map(|(lead, result)| {
                        serde_json::json!({
                            "name": lead.name,
                            "company": lead.company.name,
                            "title": lead.title,
                            "score": result,
                        })
                    })
                    .collect();
                match serde_json::to_string_pretty(&rows) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize results: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            } else {
                let use_colors = leadrank::output::should_use_colors();
                if cli.verbose && !scored_refs.is_empty() {
                    for lead in &scored_refs {
                        println!("{}", leadrank::output::format_lead_detail(lead, use_colors));
                        println!();
                    }
                } else {
                    println!(
                        "{}",
                        leadrank::output::format_scored_table(&scored_refs, use_colors)
                    );
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Total: {} leads in {:?}",
                    scored_refs.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Show { index } => {
            if index < 1 || index > scored_refs.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    scored_refs.len()
                );
                std::process::exit(EXIT_INPUT);
            }

            let use_colors = leadrank::output::should_use_colors();
            println!(
                "{}",
                leadrank::output::format_lead_detail(&scored_refs[index - 1], use_colors)
            );
        }
        Commands::Init => unreachable!("handled before config load"),
    }

    std::process::exit(EXIT_SUCCESS);
}
