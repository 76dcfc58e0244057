//! Business scenario runner

use anyhow::{anyhow, Result};

use agent_runner::{
    find_use_case, run_use_case, OverallStats, QueryOutcome, SharePointAgent, UseCase,
    UseCaseReport, USE_CASES,
};
use spf_core::Config;

use super::build_agent;

const RESPONSE_PREVIEW_CHARS: usize = 200;

pub async fn execute(config: &Config, name: Option<String>, list: bool) -> Result<()> {
    if list {
        for use_case in USE_CASES {
            println!("{}: {}", use_case.name, use_case.description);
        }
        return Ok(());
    }

    let selected: Vec<&UseCase> = match name {
        Some(name) => {
            let use_case = find_use_case(&name).ok_or_else(|| {
                let names: Vec<&str> = USE_CASES.iter().map(|u| u.name).collect();
                anyhow!("Unknown use case '{}'. Available: {}", name, names.join(", "))
            })?;
            vec![use_case]
        }
        None => USE_CASES.iter().collect(),
    };

    let mut agent = build_agent(config)?;
    let result = run_selected(&mut agent, &selected).await;
    agent.cleanup().await;
    result
}

async fn run_selected(agent: &mut SharePointAgent, selected: &[&UseCase]) -> Result<()> {
    let mut reports = Vec::with_capacity(selected.len());

    for use_case in selected {
        println!("\n{}", "=".repeat(60));
        println!("Use Case: {}", use_case.name);
        println!("Description: {}", use_case.description);
        println!("{}", "=".repeat(60));

        let report = run_use_case(agent, use_case, print_outcome).await?;
        print_report(&report);
        reports.push(report);
    }

    if reports.len() > 1 {
        print_overall(&OverallStats::from_reports(&reports));
    }
    Ok(())
}

fn print_outcome(index: usize, outcome: &QueryOutcome) {
    println!("\nQuery {}: {}", index, outcome.query);
    println!("{}", "-".repeat(40));
    if outcome.success {
        println!("Response: {}", truncate(&outcome.content, RESPONSE_PREVIEW_CHARS));
        println!("Time: {:.2}s", outcome.elapsed.as_secs_f64());
    } else {
        println!("Error: {}", outcome.content);
    }
}

fn print_report(report: &UseCaseReport) {
    println!("\nUse Case Summary:");
    println!("   Success Rate: {:.1}%", report.success_rate());
    println!("   Total Time: {:.2}s", report.total_time().as_secs_f64());
    println!("   Average Time: {:.2}s", report.average_time().as_secs_f64());
}

fn print_overall(stats: &OverallStats) {
    println!("\n{}", "=".repeat(60));
    println!("FINAL SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Use Cases Run: {}", stats.use_cases);
    println!("Total Queries: {}", stats.total_queries);
    println!("Successful Responses: {}", stats.total_successes);
    println!("Overall Success Rate: {:.1}%", stats.success_rate());
    println!("Total Time: {:.2}s", stats.total_time.as_secs_f64());
    println!("Average Response Time: {:.2}s", stats.average_time().as_secs_f64());
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
