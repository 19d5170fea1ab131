//! Ring distribution tool
//!
//! Shows how synthetic keys spread over a consistent-hash ring and how
//! they move when a node joins or leaves.
//!
//! ```bash
//! hashring --nodes node1,node2 --keys 1000 --add node3
//! ```

use std::collections::BTreeMap;
use std::process::ExitCode;

use clap::Parser;

use shardcache::ring::Rebalance;

#[derive(Parser)]
#[command(
    name = "hashring",
    about = "Show key distribution over a consistent-hash ring",
    version
)]
struct Cli {
    /// Comma-separated node ids
    #[arg(long, value_delimiter = ',')]
    nodes: Vec<String>,

    /// Number of synthetic keys to distribute
    #[arg(long, default_value_t = 1000)]
    keys: usize,

    /// Virtual points per node
    #[arg(long, default_value_t = 100)]
    replicas: usize,

    /// Add a node and show the redistribution
    #[arg(long)]
    add: Option<String>,

    /// Remove a node and show the redistribution
    #[arg(long)]
    remove: Option<String>,
}

fn print_distribution(title: &str, distribution: &BTreeMap<String, usize>) {
    println!("{}:", title);
    for (node, count) in distribution {
        println!("  {}: {}", node, count);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let nodes: Vec<String> = cli
        .nodes
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    if nodes.is_empty() {
        eprintln!(
            "Usage: hashring --nodes node1,node2 --keys 1000 [--add node3] [--remove node2] [--replicas 100]"
        );
        return ExitCode::FAILURE;
    }

    let report = Rebalance::run(
        &nodes,
        cli.replicas,
        cli.keys,
        cli.add.as_deref(),
        cli.remove.as_deref(),
    );

    if cli.add.is_none() && cli.remove.is_none() {
        print_distribution("Key distribution", &report.after);
        return ExitCode::SUCCESS;
    }

    print_distribution("Key distribution before", &report.before);
    if let Some(node) = &cli.add {
        println!("Added node: {}", node);
    }
    if let Some(node) = &cli.remove {
        println!("Removed node: {}", node);
    }
    print_distribution("Key distribution after", &report.after);
    println!("Keys moved: {} of {}", report.moved, report.keys);

    ExitCode::SUCCESS
}
