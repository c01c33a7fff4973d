//! Append-only record of install outcomes

use crate::installer::UpdateOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRecord {
    pub name: String,
    pub outcome: UpdateOutcome,
}

/// Counts per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Outcomes in the order items were processed; entries are never changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallLog {
    records: Vec<InstallRecord>,
}

impl InstallLog {
    pub fn append(&mut self, name: &str, outcome: UpdateOutcome) {
        self.records.push(InstallRecord {
            name: name.to_string(),
            outcome,
        });
    }

    pub fn records(&self) -> &[InstallRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for record in &self.records {
            match record.outcome {
                UpdateOutcome::Updated => tally.updated += 1,
                UpdateOutcome::Skipped => tally.skipped += 1,
                UpdateOutcome::Failed => tally.failed += 1,
            }
        }
        tally
    }
}
