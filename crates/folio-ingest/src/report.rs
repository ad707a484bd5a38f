//! Ingestion reporting
//!
//! Aggregates per-client and batch-wide success/failure counts for display
//! after a batch completes. Carries no behavior beyond accumulation.

use serde::Serialize;

/// Outcome for one client within a batch.
#[derive(Debug, Clone, Serialize)]
pub struct ClientOutcome {
    pub client_name: String,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Summary of one ingest invocation, in batch order.
#[derive(Debug, Default, Serialize)]
pub struct IngestionReport {
    clients: Vec<ClientOutcome>,
    warnings: Vec<String>,
}

impl IngestionReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn outcome_mut(&mut self, client_name: &str) -> &mut ClientOutcome {
        let idx = match self
            .clients
            .iter()
            .position(|c| c.client_name == client_name)
        {
            Some(idx) => idx,
            None => {
                self.clients.push(ClientOutcome {
                    client_name: client_name.to_string(),
                    succeeded: 0,
                    failed: 0,
                    errors: Vec::new(),
                });
                self.clients.len() - 1
            }
        };
        &mut self.clients[idx]
    }

    pub fn record_success(&mut self, client_name: &str) {
        self.outcome_mut(client_name).succeeded += 1;
    }

    pub fn record_failure(&mut self, client_name: &str, error: String) {
        let outcome = self.outcome_mut(client_name);
        outcome.failed += 1;
        outcome.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn clients(&self) -> &[ClientOutcome] {
        &self.clients
    }

    pub fn client(&self, client_name: &str) -> Option<&ClientOutcome> {
        self.clients.iter().find(|c| c.client_name == client_name)
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn total_succeeded(&self) -> usize {
        self.clients.iter().map(|c| c.succeeded).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.clients.iter().map(|c| c.failed).sum()
    }

    /// Distinct error messages across all clients, in first-seen order.
    pub fn distinct_errors(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for outcome in &self.clients {
            for err in &outcome.errors {
                if !seen.contains(&err.as_str()) {
                    seen.push(err.as_str());
                }
            }
        }
        seen
    }

    pub fn is_complete_success(&self) -> bool {
        self.total_failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_per_client_and_totals() {
        let mut report = IngestionReport::new();
        report.record_success("Acme");
        report.record_success("Acme");
        report.record_failure("Beta", "storage write failed".to_string());
        report.record_failure("Beta", "storage write failed".to_string());
        report.record_success("Beta");

        let acme = report.client("Acme").unwrap();
        assert_eq!((acme.succeeded, acme.failed), (2, 0));
        let beta = report.client("Beta").unwrap();
        assert_eq!((beta.succeeded, beta.failed), (1, 2));

        assert_eq!(report.total_succeeded(), 3);
        assert_eq!(report.total_failed(), 2);
        assert_eq!(report.distinct_errors(), vec!["storage write failed"]);
        assert!(!report.is_complete_success());
    }

    #[test]
    fn warnings_do_not_count_as_failures() {
        let mut report = IngestionReport::new();
        report.add_warning("skipped loose file".to_string());

        assert_eq!(report.total_succeeded(), 0);
        assert_eq!(report.total_failed(), 0);
        assert_eq!(report.warnings().len(), 1);
        assert!(report.is_complete_success());
    }
}
