use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::checker::RemoteOpsOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub project: String,
    pub workspace: String,
    pub using_remote_ops: bool,
    #[serde(flatten)]
    pub outcome: RemoteOpsOutcome,
}

impl CheckReport {
    pub fn new(project: &std::path::Path, workspace: &str, outcome: RemoteOpsOutcome) -> Self {
        Self {
            project: project.display().to_string(),
            workspace: workspace.to_string(),
            using_remote_ops: outcome.using_remote_ops(),
            outcome,
        }
    }

    fn reason(&self) -> String {
        match &self.outcome {
            RemoteOpsOutcome::NoStatefile => "no backend statefile".to_string(),
            RemoteOpsOutcome::NoBackend => "no backend configured".to_string(),
            RemoteOpsOutcome::OtherBackend { backend_type } if backend_type.is_empty() => {
                "backend type not recorded".to_string()
            }
            RemoteOpsOutcome::OtherBackend { backend_type } => {
                format!("backend type is {:?}", backend_type)
            }
            RemoteOpsOutcome::NotEntitled { .. } => {
                "organization lacks the operations entitlement".to_string()
            }
            RemoteOpsOutcome::Workspace { operations, .. } => {
                format!("workspace operations = {}", operations)
            }
        }
    }
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn render(report: &CheckReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Table => Ok(render_table(report)),
    }
}

fn render_table(report: &CheckReport) -> String {
    let mut rows = vec![
        ReportRow {
            field: "Project",
            value: report.project.clone(),
        },
        ReportRow {
            field: "Local workspace",
            value: report.workspace.clone(),
        },
    ];

    match &report.outcome {
        RemoteOpsOutcome::NotEntitled {
            hostname,
            organization,
        } => {
            rows.push(ReportRow {
                field: "Hostname",
                value: hostname.clone(),
            });
            rows.push(ReportRow {
                field: "Organization",
                value: organization.clone(),
            });
        }
        RemoteOpsOutcome::Workspace {
            hostname,
            organization,
            remote_workspace,
            ..
        } => {
            rows.push(ReportRow {
                field: "Hostname",
                value: hostname.clone(),
            });
            rows.push(ReportRow {
                field: "Organization",
                value: organization.clone(),
            });
            rows.push(ReportRow {
                field: "Remote workspace",
                value: remote_workspace.clone(),
            });
        }
        _ => {}
    }

    rows.push(ReportRow {
        field: "Reason",
        value: report.reason(),
    });
    rows.push(ReportRow {
        field: "Remote ops",
        value: if report.using_remote_ops { "yes" } else { "no" }.to_string(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn workspace_report(operations: bool) -> CheckReport {
        CheckReport::new(
            Path::new("/srv/infra/network"),
            "prod",
            RemoteOpsOutcome::Workspace {
                hostname: "app.terraform.io".to_string(),
                organization: "acme".to_string(),
                remote_workspace: "net-prod".to_string(),
                operations,
            },
        )
    }

    #[test]
    fn test_report_json_flattens_outcome() {
        let json = render(&workspace_report(true), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["project"], "/srv/infra/network");
        assert_eq!(value["using_remote_ops"], true);
        assert_eq!(value["result"], "workspace");
        assert_eq!(value["remote_workspace"], "net-prod");
    }

    #[test]
    fn test_report_table_lists_remote_details() {
        let table = render(&workspace_report(false), OutputFormat::Table).unwrap();

        assert!(table.contains("Remote workspace"));
        assert!(table.contains("net-prod"));
        assert!(table.contains("workspace operations = false"));
        assert!(table.contains("no"));
    }

    #[test]
    fn test_report_table_for_local_project() {
        let report = CheckReport::new(Path::new("/srv/app"), "default", RemoteOpsOutcome::NoBackend);
        let table = render(&report, OutputFormat::Table).unwrap();

        assert!(!report.using_remote_ops);
        assert!(table.contains("no backend configured"));
        assert!(!table.contains("Organization"));
    }
}
