pub mod classifier;
pub mod rules;
pub mod summary;
pub mod whatif;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::clients::ClientStatus;

/// Financial health category for one client, first-match-wins over the rule
/// table in [`rules`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    DettePrestation,
    SousFacturation,
    RentabiliteFaible,
    Equilibre,
}

impl DiagnosticKind {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::DettePrestation => "dette_prestation",
            Self::SousFacturation => "sous_facturation",
            Self::RentabiliteFaible => "rentabilite_faible",
            Self::Equilibre => "equilibre",
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::DettePrestation => "Dette de prestation",
            Self::SousFacturation => "Sous-facturation",
            Self::RentabiliteFaible => "Rentabilité faible",
            Self::Equilibre => "Équilibre",
        };
        write!(f, "{display}")
    }
}

/// Ordered so that a category change can be read as a raise or a drop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Urgence {
    None,
    Medium,
    High,
}

impl Display for Urgence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::None => "-",
            Self::Medium => "MOYENNE",
            Self::High => "HAUTE",
        };
        write!(f, "{display}")
    }
}

/// Outcome of classifying one fact set. Exactly one is produced per client
/// per evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    pub urgence: Urgence,
    pub alerte: String,
    pub action_recommandee: String,
}

/// A diagnostic attached to the client it was computed for, with the derived
/// figures the rules were fed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientDiagnostic {
    pub client_id: String,
    pub nom: String,
    pub statut: ClientStatus,
    pub tarif_horaire_reel: f64,
    pub ecart_facturation_prestation: f64,
    pub diagnostic: Diagnostic,
}

impl ClientDiagnostic {
    pub fn urgence(&self) -> Urgence {
        self.diagnostic.urgence
    }
}

/// Aggregates over one full portfolio evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    pub nb_clients: usize,
    pub total_chiffre_affaires: f64,
    pub total_heures: f64,
    pub tarif_horaire_moyen: f64,
    pub par_categorie: BTreeMap<DiagnosticKind, usize>,
    pub clients_a_risque: Vec<String>,
}
