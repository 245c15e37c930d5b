use serde::{Deserialize, Serialize};

/// One signup record as stored in `waitlist/waitlist.json`.
///
/// Entries have no identifier and no dedup; the file is an append-only list
/// in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub current_tool: String,
    #[serde(default)]
    pub willing_to_pay: String,
    #[serde(default)]
    pub commitments: Vec<String>,
    #[serde(default)]
    pub note: String,
    /// Stamped by the storage layer at append time, `YYYY-MM-DDTHH:MM:SSZ`
    #[serde(default)]
    pub submitted_at: String,
}

/// Inbound POST body for the signup form. Every field except `email`
/// defaults to empty when absent.
#[derive(Debug, Default, Deserialize)]
pub struct WaitlistSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub current_tool: String,
    #[serde(default)]
    pub willing_to_pay: String,
    #[serde(default)]
    pub commitments: Vec<String>,
    #[serde(default)]
    pub note: String,
}

impl WaitlistSubmission {
    /// Build the entry to store. `submitted_at` is left empty here; the
    /// storage layer stamps it at append time.
    pub fn into_entry(self) -> WaitlistEntry {
        WaitlistEntry {
            name: self.name,
            email: self.email,
            plan: self.plan,
            problem: self.problem,
            urgency: self.urgency,
            current_tool: self.current_tool,
            willing_to_pay: self.willing_to_pay,
            commitments: self.commitments,
            note: self.note,
            submitted_at: String::new(),
        }
    }
}
