pub mod dataset;
pub mod sample;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Year-to-date financial facts for one client engagement. Percentages are
/// relative to the annual revenue target and hour budget respectively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientFinancialFact {
    pub pourcentage_ca: f64,
    pub pourcentage_heures: f64,
    pub heures: f64,
    pub chiffre_affaires: f64,
}

impl ClientFinancialFact {
    /// Effective hourly rate billed so far. Zero logged hours yield a zero
    /// rate rather than a division error.
    pub fn tarif_horaire_reel(&self) -> f64 {
        if self.heures > 0.0 {
            self.chiffre_affaires / self.heures
        } else {
            0.0
        }
    }

    /// Positive when billing runs ahead of delivered work, negative when
    /// hours run ahead of billing.
    pub fn ecart_facturation_prestation(&self) -> f64 {
        self.pourcentage_ca - self.pourcentage_heures
    }

    pub fn field_value(&self, field: FactField) -> f64 {
        match field {
            FactField::PourcentageCa => self.pourcentage_ca,
            FactField::PourcentageHeures => self.pourcentage_heures,
            FactField::Heures => self.heures,
            FactField::ChiffreAffaires => self.chiffre_affaires,
        }
    }

    pub fn apply_field_change(&mut self, field: FactField, to: f64) {
        match field {
            FactField::PourcentageCa => self.pourcentage_ca = to,
            FactField::PourcentageHeures => self.pourcentage_heures = to,
            FactField::Heures => self.heures = to,
            FactField::ChiffreAffaires => self.chiffre_affaires = to,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FactField {
    PourcentageCa,
    PourcentageHeures,
    Heures,
    ChiffreAffaires,
}

impl Display for FactField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PourcentageCa => write!(f, "pourcentage_ca"),
            Self::PourcentageHeures => write!(f, "pourcentage_heures"),
            Self::Heures => write!(f, "heures"),
            Self::ChiffreAffaires => write!(f, "chiffre_affaires"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Actif,
    Prospect,
    Suspendu,
    Archive,
}

impl ClientStatus {
    pub const ALL: [ClientStatus; 4] = [
        ClientStatus::Actif,
        ClientStatus::Prospect,
        ClientStatus::Suspendu,
        ClientStatus::Archive,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Actif => "actif",
            Self::Prospect => "prospect",
            Self::Suspendu => "suspendu",
            Self::Archive => "archive",
        }
    }
}

impl Display for ClientStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Actif => "Actif",
            Self::Prospect => "Prospect",
            Self::Suspendu => "Suspendu",
            Self::Archive => "Archivé",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown client status: {0}")]
pub struct StatutParseError(pub String);

impl FromStr for ClientStatus {
    type Err = StatutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "actif" | "active" => Ok(Self::Actif),
            "prospect" => Ok(Self::Prospect),
            "suspendu" | "suspended" => Ok(Self::Suspendu),
            "archive" | "archivé" | "archived" => Ok(Self::Archive),
            _ => Err(StatutParseError(s.to_string())),
        }
    }
}

/// One client of the firm, with the facts the diagnostic chain runs on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRecord {
    pub id: String,
    pub nom: String,
    pub responsable: String,
    pub statut: ClientStatus,
    pub fact: ClientFinancialFact,
    pub evaluated_at: DateTime<Utc>,
}

impl ClientRecord {
    pub fn new(id: &str, nom: &str) -> Self {
        Self {
            id: id.to_string(),
            nom: nom.to_string(),
            responsable: String::new(),
            statut: ClientStatus::Actif,
            fact: ClientFinancialFact {
                pourcentage_ca: 0.0,
                pourcentage_heures: 0.0,
                heures: 0.0,
                chiffre_affaires: 0.0,
            },
            evaluated_at: Utc::now(),
        }
    }

    pub fn with_responsable(mut self, responsable: &str) -> Self {
        self.responsable = responsable.to_string();
        self
    }

    pub fn with_statut(mut self, statut: ClientStatus) -> Self {
        self.statut = statut;
        self
    }

    pub fn with_fact(mut self, fact: ClientFinancialFact) -> Self {
        self.fact = fact;
        self
    }
}

/// Per-field fact overrides collected from CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactOverrides {
    pub pourcentage_ca: Option<f64>,
    pub pourcentage_heures: Option<f64>,
    pub heures: Option<f64>,
    pub chiffre_affaires: Option<f64>,
}

impl FactOverrides {
    /// Flattens the set overrides into ordered `(field, target)` pairs.
    pub fn as_changes(&self) -> Vec<(FactField, f64)> {
        let mut out = Vec::new();
        if let Some(v) = self.pourcentage_ca {
            out.push((FactField::PourcentageCa, v));
        }
        if let Some(v) = self.pourcentage_heures {
            out.push((FactField::PourcentageHeures, v));
        }
        if let Some(v) = self.heures {
            out.push((FactField::Heures, v));
        }
        if let Some(v) = self.chiffre_affaires {
            out.push((FactField::ChiffreAffaires, v));
        }
        out
    }
}
