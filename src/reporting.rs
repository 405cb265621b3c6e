// src/reporting.rs
//! Console output for analysis, graph and selection results.

use colored::Colorize;

use crate::analyzer::RepoAnalysis;
use crate::graph::CentralityRanker;
use crate::select::{SelectReason, SelectedFile};

fn pluralize(word: &str, n: usize) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

fn heading(text: &str) {
    println!("\n{}", text.bold().underline());
}

/// Prints the repository summary and per-category breakdown.
pub fn print_analysis(analysis: &RepoAnalysis) {
    let s = &analysis.summary;
    println!(
        "{} {} analyzed, {:.2}% custom code",
        s.file_count.to_string().bold(),
        pluralize("file", s.file_count),
        s.custom_code_percentage
    );

    heading("File types");
    for (ext, n) in &s.top_file_types {
        println!("  {ext:<12} {n}");
    }

    heading("Directories");
    for (dir, n) in &s.top_directories {
        println!("  {dir:<40} {n}");
    }

    if !s.third_party_technologies.is_empty() {
        heading("Third-party");
        for (group, names) in &s.third_party_technologies {
            println!("  {}: {}", group.cyan(), names.join(", "));
        }
    }

    heading("Categories");
    for (id, count) in &s.category_stats {
        match analysis.file_summaries.get(id) {
            Some(cat) => {
                println!(
                    "  {:<34} {:>5} {} ({:.0}% custom)",
                    id.yellow(),
                    count,
                    pluralize("file", *count),
                    cat.custom_percentage
                );
                for tech in &cat.technologies {
                    println!("      {} {}", "-".blue(), tech.dimmed());
                }
            }
            None => println!("  {:<34} {:>5} files", id.dimmed(), 0),
        }
    }

    let important = &analysis.dependency_analysis.important_files;
    if !important.is_empty() {
        heading("Most important files");
        for path in important {
            let score = analysis.dependency_analysis.centrality.get(path).copied().unwrap_or(0);
            println!("  {score:>4}  {path}");
        }
    }
}

/// Prints the top of the centrality ranking, optionally with edges.
pub fn print_graph(analysis: &RepoAnalysis, top: usize, edges: bool) {
    let graph = analysis.graph();
    println!(
        "{} {}, {} {}",
        graph.nodes().len().to_string().bold(),
        pluralize("node", graph.nodes().len()),
        graph.edge_count().to_string().bold(),
        pluralize("edge", graph.edge_count())
    );
    for path in analysis.ranking().iter().take(top) {
        let score = CentralityRanker::score(graph, path);
        println!(
            "  {score:>4}  {path}  {}",
            format!("(in {}, out {})", graph.in_degree(path), graph.out_degree(path)).dimmed()
        );
        if edges {
            for dep in graph.dependencies(path) {
                println!("        {} {dep}", "->".blue());
            }
        }
    }
}

/// Prints what a category would forward.
pub fn print_selection(category: &str, budget: i64, selected: &[SelectedFile]) {
    let used: i64 = selected.iter().map(|s| s.cost).sum();
    println!(
        "{} {} selected for {} ({used}/{budget} units)",
        selected.len().to_string().bold(),
        pluralize("file", selected.len()),
        category.yellow()
    );
    for file in selected {
        let reason = match file.reason {
            SelectReason::Important => "important".green(),
            SelectReason::Proportional => "sample".normal(),
            SelectReason::Spill => "spill".cyan(),
            SelectReason::Fallback => "fallback".red(),
        };
        let note = if file.truncated { " (truncated)" } else { "" };
        println!("  {:>6}  {:<11} {}{}", file.cost, reason, file.path, note.dimmed());
    }
}
