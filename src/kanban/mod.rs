pub mod store;
pub mod transition;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board columns, in stage order. Drops may target any column from any
/// other, backward moves included.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Todo,
    Inprogress,
    Validation,
    Done,
}

impl PlanStatus {
    pub const ALL: [PlanStatus; 4] = [
        PlanStatus::Todo,
        PlanStatus::Inprogress,
        PlanStatus::Validation,
        PlanStatus::Done,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Inprogress => "inprogress",
            Self::Validation => "validation",
            Self::Done => "done",
        }
    }
}

impl Display for PlanStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Todo => "À faire",
            Self::Inprogress => "En cours",
            Self::Validation => "Validation",
            Self::Done => "Terminé",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown board column: {0}")]
pub struct PlanStatusParseError(pub String);

impl FromStr for PlanStatus {
    type Err = PlanStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "todo" | "a_faire" => Ok(Self::Todo),
            "inprogress" | "in_progress" | "en_cours" => Ok(Self::Inprogress),
            "validation" => Ok(Self::Validation),
            "done" | "termine" | "terminé" => Ok(Self::Done),
            _ => Err(PlanStatusParseError(s.to_string())),
        }
    }
}

/// An engagement plan card. `progress` stays within 0–100 and is never
/// lowered by a status transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KanbanPlan {
    pub id: String,
    pub client_id: String,
    pub titre: String,
    pub status: PlanStatus,
    pub progress: u8,
    pub echeance: Option<DateTime<Utc>>,
}

impl KanbanPlan {
    pub fn new(id: &str, client_id: &str, titre: &str) -> Self {
        Self {
            id: id.to_string(),
            client_id: client_id.to_string(),
            titre: titre.to_string(),
            status: PlanStatus::Todo,
            progress: 0,
            echeance: None,
        }
    }

    pub fn with_status(mut self, status: PlanStatus, progress: u8) -> Self {
        self.status = status;
        self.progress = progress.min(100);
        self
    }

    pub fn with_echeance(mut self, echeance: DateTime<Utc>) -> Self {
        self.echeance = Some(echeance);
        self
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.echeance {
            Some(echeance) => self.status != PlanStatus::Done && echeance < now,
            None => false,
        }
    }
}
