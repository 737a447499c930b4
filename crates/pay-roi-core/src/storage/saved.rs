use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PayRoiError;
use crate::model::CalculationData;
use crate::PayRoiResult;

pub const STORE_VERSION: &str = "1.0.0";

/// Named calculations kept before the oldest are dropped.
pub const MAX_SAVED_CALCULATIONS: usize = 10;

/// How many calculations `cleanup_old` keeps.
pub const CLEANUP_KEEP: usize = 5;

/// The auto-saved working calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCalculation {
    pub data: CalculationData,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCalculation {
    pub id: String,
    pub name: String,
    pub data: CalculationData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry without the calculation body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Versioned document holding the working calculation and up to
/// [`MAX_SAVED_CALCULATIONS`] named ones, newest first.
///
/// Pure data: reading and writing the document is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStore {
    pub version: String,
    pub last_accessed: DateTime<Utc>,
    pub current_calculation: Option<CurrentCalculation>,
    pub saved_calculations: Vec<SavedCalculation>,
    #[serde(default)]
    next_sequence: u64,
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

impl CalculationStore {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            last_accessed: now,
            current_calculation: None,
            saved_calculations: Vec::new(),
            next_sequence: 0,
        }
    }

    pub fn from_json_str(json: &str) -> PayRoiResult<Self> {
        serde_json::from_str(json).map_err(|e| PayRoiError::MalformedSnapshot(e.to_string()))
    }

    pub fn to_json_string(&self) -> PayRoiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed = now;
    }

    fn generate_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        self.next_sequence += 1;
        format!("{}{}", to_base36(millis), to_base36(self.next_sequence))
    }

    // -- Working calculation ------------------------------------------------

    pub fn save_current(&mut self, data: CalculationData, now: DateTime<Utc>) {
        self.current_calculation = Some(CurrentCalculation {
            data,
            timestamp: now,
        });
        self.touch(now);
    }

    pub fn load_current(&self) -> Option<&CalculationData> {
        self.current_calculation.as_ref().map(|c| &c.data)
    }

    // -- Named calculations -------------------------------------------------

    /// Save under `name`, replacing an existing entry with the same name
    /// (keeping its id and creation time). Unnamed saves are numbered.
    pub fn save_named(
        &mut self,
        name: Option<&str>,
        data: CalculationData,
        now: DateTime<Utc>,
    ) -> &SavedCalculation {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("Calculation {}", self.saved_calculations.len() + 1),
        };
        self.touch(now);

        if let Some(idx) = self.saved_calculations.iter().position(|c| c.name == name) {
            let existing = &mut self.saved_calculations[idx];
            existing.data = data;
            existing.updated_at = now;
            debug!(id = %existing.id, name = %existing.name, "saved calculation updated");
            return &self.saved_calculations[idx];
        }

        let id = self.generate_id(now);
        debug!(%id, %name, "calculation saved");
        self.saved_calculations.insert(
            0,
            SavedCalculation {
                id,
                name,
                data,
                created_at: now,
                updated_at: now,
            },
        );
        self.saved_calculations.truncate(MAX_SAVED_CALCULATIONS);
        &self.saved_calculations[0]
    }

    pub fn load(&self, id: &str) -> Option<&CalculationData> {
        self.saved_calculations
            .iter()
            .find(|c| c.id == id)
            .map(|c| &c.data)
    }

    pub fn list(&self) -> Vec<SavedSummary> {
        self.saved_calculations
            .iter()
            .map(|c| SavedSummary {
                id: c.id.clone(),
                name: c.name.clone(),
                created_at: c.created_at,
                updated_at: c.updated_at,
            })
            .collect()
    }

    /// Returns whether anything was removed.
    pub fn delete(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let before = self.saved_calculations.len();
        self.saved_calculations.retain(|c| c.id != id);
        self.touch(now);
        self.saved_calculations.len() != before
    }

    pub fn clear(&mut self, now: DateTime<Utc>) {
        self.saved_calculations.clear();
        self.touch(now);
    }

    /// Keep only the most recently updated calculations.
    pub fn cleanup_old(&mut self) {
        if self.saved_calculations.len() > CLEANUP_KEEP {
            self.saved_calculations
                .sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            self.saved_calculations.truncate(CLEANUP_KEEP);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
