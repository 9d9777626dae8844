//! Console output for discovery runs

use colored::Colorize;
use discovery_application::use_cases::export_context_map::ExportContextMapOutput;
use discovery_domain::{ConfigIssue, ContextMap, OutputFormat, Severity};
use serde::Serialize;

/// Serializable overview of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoverySummary {
    pub output: String,
    pub bounded_contexts: Vec<ContextSummary>,
    pub relationships: Vec<RelationshipSummary>,
    pub failures: Vec<FailureSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSummary {
    pub name: String,
    pub technology: Option<String>,
    pub aggregates: usize,
    pub domain_objects: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipSummary {
    pub upstream: String,
    pub downstream: String,
    pub exposed_aggregates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureSummary {
    pub strategy: String,
    pub message: String,
}

impl DiscoverySummary {
    pub fn from_output(output: &ExportContextMapOutput) -> Self {
        let mut summary = Self::from_map(&output.report.context_map, output.written_to.display().to_string());
        summary.failures = output
            .report
            .failures
            .iter()
            .map(|f| FailureSummary {
                strategy: f.strategy.clone(),
                message: f.message.clone(),
            })
            .collect();
        summary
    }

    pub fn from_map(map: &ContextMap, output: String) -> Self {
        Self {
            output,
            bounded_contexts: map
                .bounded_contexts()
                .iter()
                .map(|bc| ContextSummary {
                    name: bc.name().to_string(),
                    technology: bc.technology().map(str::to_string),
                    aggregates: bc.aggregates().len(),
                    domain_objects: bc.domain_object_count(),
                })
                .collect(),
            relationships: map
                .relationships()
                .iter()
                .map(|r| RelationshipSummary {
                    upstream: r.upstream().to_string(),
                    downstream: r.downstream().to_string(),
                    exposed_aggregates: r.exposed_aggregates().to_vec(),
                })
                .collect(),
            failures: Vec::new(),
        }
    }
}

/// Formats discovery summaries and configuration issues for the console
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colored output on or off
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    pub fn format(summary: &DiscoverySummary, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format_text(summary),
            OutputFormat::Json => Self::format_json(summary),
        }
    }

    pub fn format_text(summary: &DiscoverySummary) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Discovered Context Map"));
        output.push('\n');

        output.push_str(&Self::section_header(&format!(
            "Bounded Contexts ({})",
            summary.bounded_contexts.len()
        )));
        for context in &summary.bounded_contexts {
            let technology = context
                .technology
                .as_deref()
                .map(|t| format!(" [{t}]").dimmed().to_string())
                .unwrap_or_default();
            output.push_str(&format!(
                "  {}{}  {} aggregates, {} domain objects\n",
                context.name.yellow().bold(),
                technology,
                context.aggregates,
                context.domain_objects
            ));
        }

        if !summary.relationships.is_empty() {
            output.push_str(&Self::section_header(&format!(
                "Relationships ({})",
                summary.relationships.len()
            )));
            for relationship in &summary.relationships {
                output.push_str(&format!(
                    "  {} {} {}",
                    relationship.upstream.cyan(),
                    "[U]->[D]".dimmed(),
                    relationship.downstream.cyan()
                ));
                if !relationship.exposed_aggregates.is_empty() {
                    output.push_str(&format!(
                        "  exposes {}",
                        relationship.exposed_aggregates.join(", ")
                    ));
                }
                output.push('\n');
            }
        }

        if !summary.failures.is_empty() {
            output.push_str(&Self::section_header("Failed strategies"));
            for failure in &summary.failures {
                output.push_str(&format!("  {} {}: {}\n", "x".red(), failure.strategy.red().bold(), failure.message));
            }
        }

        output.push_str(&format!("\n{} {}\n", "Written to:".green().bold(), summary.output));
        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(summary: &DiscoverySummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per configuration issue
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| {
                let label = match issue.severity {
                    Severity::Error => "error:".red().bold(),
                    Severity::Warning => "warning:".yellow().bold(),
                };
                format!("{label} {}", issue.message)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_domain::{Aggregate, BoundedContext, ConfigIssueCode, Relationship};

    fn summary() -> DiscoverySummary {
        let mut customer = BoundedContext::new("CustomerCore").unwrap().with_technology("Spring Boot");
        customer.add_aggregate(Aggregate::new("CustomerCore", "customers").unwrap());
        let policy = BoundedContext::new("PolicyManagement").unwrap();

        let mut map = ContextMap::new();
        map.add_bounded_context(customer.clone());
        map.add_bounded_context(policy.clone());
        let mut relationship = Relationship::new(&customer, &policy);
        relationship.expose_all_aggregates();
        map.add_relationship(relationship).unwrap();

        let mut summary = DiscoverySummary::from_map(&map, "src-gen/map.cml".to_string());
        summary.failures.push(FailureSummary {
            strategy: "docker-compose".to_string(),
            message: "Topology source directory does not exist: deploy".to_string(),
        });
        summary
    }

    #[test]
    fn test_summary_from_map() {
        let summary = summary();
        assert_eq!(summary.bounded_contexts.len(), 2);
        assert_eq!(summary.bounded_contexts[0].aggregates, 1);
        assert_eq!(summary.bounded_contexts[0].technology.as_deref(), Some("Spring Boot"));
        assert_eq!(summary.relationships[0].exposed_aggregates, vec!["customers"]);
    }

    #[test]
    fn test_format_text_lists_everything() {
        let text = ConsoleFormatter::format(&summary(), OutputFormat::Text);
        assert!(text.contains("CustomerCore"));
        assert!(text.contains("PolicyManagement"));
        assert!(text.contains("exposes customers"));
        assert!(text.contains("docker-compose"));
        assert!(text.contains("src-gen/map.cml"));
    }

    #[test]
    fn test_format_json() {
        let json = ConsoleFormatter::format(&summary(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["output"], "src-gen/map.cml");
        assert_eq!(value["bounded_contexts"][1]["name"], "PolicyManagement");
        assert_eq!(value["bounded_contexts"][1]["technology"], serde_json::Value::Null);
        assert_eq!(value["relationships"][0]["upstream"], "CustomerCore");
        assert_eq!(value["failures"][0]["strategy"], "docker-compose");
    }

    #[test]
    fn test_format_config_issues() {
        let issues = vec![ConfigIssue::error(
            ConfigIssueCode::InvalidOutputExtension {
                path: "map.txt".to_string(),
            },
            "output.path: 'map.txt' must end with '.cml'",
        )];
        let text = ConsoleFormatter::format_config_issues(&issues);
        assert!(text.contains("output.path: 'map.txt' must end with '.cml'"));
    }
}
