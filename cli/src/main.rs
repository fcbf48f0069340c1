//! Perron CLI: PageRank over delimited edge-list files
//!
//! Reads an edge list from a file or stdin, ranks the graph, and prints one
//! score per vertex in ascending order. Logs go to stderr so piped output
//! stays clean.

use clap::{Parser, ValueEnum};
use comfy_table::{ContentArrangement, Table};
use perron::{
    page_rank, page_rank_parallel, read_edge_list, read_edge_list_path, read_named_edge_list,
    read_named_edge_list_path, DanglingPolicy, GraphStore, PageRankConfig, RankedScores,
    VertexNames,
};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "perron", version, about = "PageRank over delimited edge lists")]
struct Cli {
    /// Input edge-list file; reads stdin when omitted
    file: Option<PathBuf>,

    /// Delimiter separating the two vertex fields of each record
    #[arg(short, long, default_value = "\t")]
    delimiter: String,

    /// Damping factor: probability of following an outgoing edge
    #[arg(short = 'a', long, default_value_t = 0.85)]
    damping: f64,

    /// Convergence tolerance on the largest per-vertex score change
    #[arg(short = 'c', long, default_value_t = 1e-10)]
    tolerance: f64,

    /// Iteration cap when convergence is not reached
    #[arg(short = 'm', long, default_value_t = 200)]
    max_iterations: usize,

    /// Treatment of vertices without outgoing edges
    #[arg(long, default_value = "redistribute")]
    dangling: DanglingArg,

    /// Treat fields as arbitrary names instead of integers
    #[arg(short = 'n', long)]
    names: bool,

    /// Spread ranking sweeps over all cores
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum DanglingArg {
    /// Spread dangling mass uniformly; scores keep summing to 1
    Redistribute,
    /// Let dangling mass leak out of the system
    Drop,
}

impl From<DanglingArg> for DanglingPolicy {
    fn from(arg: DanglingArg) -> Self {
        match arg {
            DanglingArg::Redistribute => DanglingPolicy::Redistribute,
            DanglingArg::Drop => DanglingPolicy::Drop,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// "vertex = score" lines followed by the score sum
    Plain,
    Table,
    Json,
    Csv,
}

struct ScoreRow {
    label: String,
    score: f64,
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = PageRankConfig {
        damping_factor: cli.damping,
        max_iterations: cli.max_iterations,
        tolerance: cli.tolerance,
        dangling: cli.dangling.into(),
    };
    info!(
        "damping = {} tolerance = {} max_iterations = {} dangling = {:?}",
        config.damping_factor, config.tolerance, config.max_iterations, config.dangling
    );

    let (store, names) = load_graph(cli)?;

    let ranked = if cli.parallel {
        page_rank_parallel(&store, config)?
    } else {
        page_rank(&store, config)?
    };

    let rows = score_rows(&ranked, names.as_ref());
    match cli.format {
        OutputFormat::Plain => render_plain(&rows, &ranked),
        OutputFormat::Table => render_table(&rows, &ranked),
        OutputFormat::Json => render_json(&rows, &ranked)?,
        OutputFormat::Csv => render_csv(&rows),
    }

    Ok(())
}

fn load_graph(cli: &Cli) -> Result<(GraphStore, Option<VertexNames>), Box<dyn std::error::Error>> {
    match &cli.file {
        Some(path) => {
            info!("reading input from {}", path.display());
            if cli.names {
                let (store, names) = read_named_edge_list_path(path, &cli.delimiter)?;
                Ok((store, Some(names)))
            } else {
                Ok((read_edge_list_path(path, &cli.delimiter)?, None))
            }
        }
        None => {
            info!("reading input from stdin");
            let stdin = io::stdin();
            if cli.names {
                let (store, names) = read_named_edge_list(stdin.lock(), &cli.delimiter)?;
                Ok((store, Some(names)))
            } else {
                Ok((read_edge_list(stdin.lock(), &cli.delimiter)?, None))
            }
        }
    }
}

fn score_rows(ranked: &RankedScores, names: Option<&VertexNames>) -> Vec<ScoreRow> {
    ranked
        .ascending()
        .map(|(vertex, score)| {
            let label = match names.and_then(|n| n.name(vertex)) {
                Some(name) => name.to_string(),
                None => vertex.to_string(),
            };
            ScoreRow { label, score }
        })
        .collect()
}

fn render_plain(rows: &[ScoreRow], ranked: &RankedScores) {
    for row in rows {
        println!("{} = {}", row.label, row.score);
    }
    println!("s = {}", ranked.total());
}

fn render_table(rows: &[ScoreRow], ranked: &RankedScores) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["vertex", "score"]);

    for row in rows {
        table.add_row(vec![row.label.clone(), row.score.to_string()]);
    }

    println!("{}", table);
    println!(
        "{} vertex(es), sum = {}, {} iteration(s), converged: {}",
        rows.len(),
        ranked.total(),
        ranked.iterations,
        ranked.converged
    );
}

fn render_json(rows: &[ScoreRow], ranked: &RankedScores) -> Result<(), Box<dyn std::error::Error>> {
    let scores: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "vertex": row.label,
                "score": row.score,
            })
        })
        .collect();
    let payload = serde_json::json!({
        "scores": scores,
        "sum": ranked.total(),
        "iterations": ranked.iterations,
        "converged": ranked.converged,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn render_csv(rows: &[ScoreRow]) {
    println!("vertex,score");
    for row in rows {
        println!("{},{}", format_csv_value(&row.label), row.score);
    }
}

fn format_csv_value(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
