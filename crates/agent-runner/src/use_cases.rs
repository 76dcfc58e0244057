//! Built-in business scenarios for exercising the agent

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::agent::Responder;
use crate::error::Result;

/// A named scenario with sample questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UseCase {
    pub name: &'static str,
    pub description: &'static str,
    pub queries: &'static [&'static str],
}

pub const USE_CASES: &[UseCase] = &[
    UseCase {
        name: "Document Summarization",
        description: "Summarize key content from SharePoint documents",
        queries: &[
            "Summarize the main points from the latest quarterly report",
            "What are the key takeaways from project documentation?",
            "Provide an executive summary of policy documents",
        ],
    },
    UseCase {
        name: "Content Discovery",
        description: "Find and discover relevant content in SharePoint",
        queries: &[
            "What documents are available about budget planning?",
            "Find all training materials related to new employees",
            "Show me documents from the last quarter",
        ],
    },
    UseCase {
        name: "Knowledge Extraction",
        description: "Extract specific knowledge and insights",
        queries: &[
            "What are the current project deadlines mentioned in documents?",
            "Extract contact information from team directories",
            "What are the compliance requirements mentioned in policies?",
        ],
    },
    UseCase {
        name: "Comparative Analysis",
        description: "Compare information across multiple documents",
        queries: &[
            "Compare this quarter's performance with last quarter",
            "How do the new policies differ from previous versions?",
            "What changes were made in the latest project updates?",
        ],
    },
    UseCase {
        name: "Research Assistance",
        description: "Help with research and information gathering",
        queries: &[
            "Research best practices mentioned in our knowledge base",
            "What expertise areas are covered in our team profiles?",
            "Find examples of successful project implementations",
        ],
    },
];

/// Look up a use case by name, ignoring case
pub fn find_use_case(name: &str) -> Option<&'static UseCase> {
    let name = name.trim();
    USE_CASES.iter().find(|u| u.name.eq_ignore_ascii_case(name))
}

/// Outcome of one scenario question
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub query: String,
    pub success: bool,
    pub elapsed: Duration,
    /// Reply text on success, error message otherwise
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UseCaseReport {
    pub name: String,
    pub outcomes: Vec<QueryOutcome>,
}

impl UseCaseReport {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn total_time(&self) -> Duration {
        self.outcomes.iter().map(|o| o.elapsed).sum()
    }

    /// Percentage of questions answered
    pub fn success_rate(&self) -> f64 {
        percentage(self.success_count(), self.outcomes.len())
    }

    pub fn average_time(&self) -> Duration {
        average(self.total_time(), self.outcomes.len())
    }
}

/// Totals across several use case reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OverallStats {
    pub use_cases: usize,
    pub total_queries: usize,
    pub total_successes: usize,
    pub total_time: Duration,
}

impl OverallStats {
    pub fn from_reports(reports: &[UseCaseReport]) -> Self {
        Self {
            use_cases: reports.len(),
            total_queries: reports.iter().map(|r| r.outcomes.len()).sum(),
            total_successes: reports.iter().map(|r| r.success_count()).sum(),
            total_time: reports.iter().map(|r| r.total_time()).sum(),
        }
    }

    pub fn success_rate(&self) -> f64 {
        percentage(self.total_successes, self.total_queries)
    }

    pub fn average_time(&self) -> Duration {
        average(self.total_time, self.total_queries)
    }
}

/// Ask every question of a use case, each on a fresh thread.
///
/// `on_outcome` sees each result as soon as it is known. Failed questions
/// are recorded; errors that make further questions pointless are returned.
pub async fn run_use_case<R, F>(
    responder: &mut R,
    use_case: &UseCase,
    mut on_outcome: F,
) -> Result<UseCaseReport>
where
    R: Responder + ?Sized,
    F: FnMut(usize, &QueryOutcome),
{
    info!("Running use case '{}'", use_case.name);
    let mut outcomes = Vec::with_capacity(use_case.queries.len());

    for (i, query) in use_case.queries.iter().enumerate() {
        let started = Instant::now();
        let outcome = match responder.respond(query, None).await {
            Ok(response) => QueryOutcome {
                query: query.to_string(),
                success: true,
                elapsed: response.elapsed,
                content: response.content,
            },
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("Use case '{}' query {} failed: {}", use_case.name, i + 1, e);
                QueryOutcome {
                    query: query.to_string(),
                    success: false,
                    elapsed: started.elapsed(),
                    content: e.to_string(),
                }
            }
        };
        on_outcome(i + 1, &outcome);
        outcomes.push(outcome);
    }

    let report = UseCaseReport {
        name: use_case.name.to_string(),
        outcomes,
    };
    info!(
        "Use case '{}' finished: {}/{} succeeded",
        report.name,
        report.success_count(),
        report.outcomes.len()
    );
    Ok(report)
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn average(total: Duration, count: usize) -> Duration {
    match u32::try_from(count) {
        Ok(n) if n > 0 => total / n,
        _ => Duration::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use spf_core::run::RunStatus;

    use crate::agent::{AgentSettings, SharePointAgent};
    use crate::poller::PollConfig;
    use crate::testing::MockAgentsApi;

    fn agent(api: &Arc<MockAgentsApi>) -> SharePointAgent {
        SharePointAgent::new(
            api.clone(),
            AgentSettings {
                model: "test-model".to_string(),
                connection_name: "test-sp".to_string(),
                poll: PollConfig {
                    interval: Duration::from_millis(1),
                    timeout: Duration::from_millis(100),
                },
            },
        )
    }

    #[test]
    fn test_catalog_shape() {
        assert_eq!(USE_CASES.len(), 5);
        assert!(USE_CASES.iter().all(|u| u.queries.len() == 3));
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let found = find_use_case("content discovery").unwrap();
        assert_eq!(found.name, "Content Discovery");
        assert!(find_use_case(" RESEARCH ASSISTANCE ").is_some());
        assert!(find_use_case("Unknown").is_none());
    }

    #[tokio::test]
    async fn test_run_use_case_counts_successes() {
        let api = Arc::new(MockAgentsApi::new("Found three documents"));
        let mut agent = agent(&api);
        let mut seen = Vec::new();

        let report = run_use_case(&mut agent, &USE_CASES[0], |i, o| seen.push((i, o.success)))
            .await
            .unwrap();

        assert_eq!(report.name, "Document Summarization");
        assert_eq!(report.success_count(), 3);
        assert_eq!(report.success_rate(), 100.0);
        assert_eq!(seen, vec![(1, true), (2, true), (3, true)]);
        // One thread per question, one agent for the whole case
        assert_eq!(api.count("create_thread"), 3);
        assert_eq!(api.count("create_agent"), 1);
    }

    #[tokio::test]
    async fn test_failed_queries_are_recorded() {
        let api = Arc::new(MockAgentsApi::new("unused").with_statuses(&[RunStatus::Expired]));
        let mut agent = agent(&api);

        let report = run_use_case(&mut agent, &USE_CASES[1], |_, _| {}).await.unwrap();
        assert_eq!(report.success_count(), 0);
        assert_eq!(report.outcomes.len(), 3);
        assert!(report.outcomes[0].content.contains("expired"));
    }

    #[tokio::test]
    async fn test_missing_connection_aborts_use_case() {
        let api = Arc::new(MockAgentsApi::new("unused").without_connection());
        let mut agent = agent(&api);

        let result = run_use_case(&mut agent, &USE_CASES[2], |_, _| {}).await;
        assert!(result.is_err());
        assert_eq!(api.count("get_connection"), 1);
    }

    #[test]
    fn test_overall_stats() {
        let outcome = |success: bool, ms: u64| QueryOutcome {
            query: "q".to_string(),
            success,
            elapsed: Duration::from_millis(ms),
            content: String::new(),
        };
        let reports = vec![
            UseCaseReport {
                name: "a".to_string(),
                outcomes: vec![outcome(true, 1000), outcome(false, 3000)],
            },
            UseCaseReport {
                name: "b".to_string(),
                outcomes: vec![outcome(true, 2000), outcome(true, 2000)],
            },
        ];

        let stats = OverallStats::from_reports(&reports);
        assert_eq!(stats.use_cases, 2);
        assert_eq!(stats.total_queries, 4);
        assert_eq!(stats.total_successes, 3);
        assert_eq!(stats.total_time, Duration::from_secs(8));
        assert_eq!(stats.success_rate(), 75.0);
        assert_eq!(stats.average_time(), Duration::from_secs(2));
        assert_eq!(reports[0].average_time(), Duration::from_secs(2));

        assert_eq!(OverallStats::default().success_rate(), 0.0);
        assert_eq!(OverallStats::default().average_time(), Duration::ZERO);
    }
}
