use serde::Serialize;
use uuid::Uuid;

/// Outcome of a bulk administrative action. Each selected entity is
/// processed independently; one failure never aborts the rest.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub results: Vec<BatchItemOutcome>,
    pub completed: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct BatchItemOutcome {
    pub id: Uuid,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchReport {
    pub fn record_ok(&mut self, id: Uuid) {
        self.completed += 1;
        self.results.push(BatchItemOutcome {
            id,
            ok: true,
            error: None,
        });
    }

    pub fn record_err(&mut self, id: Uuid, error: impl ToString) {
        self.failed += 1;
        self.results.push(BatchItemOutcome {
            id,
            ok: false,
            error: Some(error.to_string()),
        });
    }
}
