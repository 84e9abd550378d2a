use crate::clients::{ClientFinancialFact, ClientRecord};
use crate::diagnostic::rules::{EQUILIBRE, RULE_TABLE};
use crate::diagnostic::{ClientDiagnostic, Diagnostic};

/// Walks the rule table in priority order and builds the diagnostic of the
/// first matching rule. The table ends with a catch-all, so the fallback is
/// never reached in practice.
pub fn classify(fact: &ClientFinancialFact, seuil_rentabilite: f64) -> Diagnostic {
    RULE_TABLE
        .iter()
        .find(|rule| (rule.applies)(fact, seuil_rentabilite))
        .unwrap_or(&EQUILIBRE)
        .build(fact, seuil_rentabilite)
}

pub fn diagnose_client(record: &ClientRecord, seuil_rentabilite: f64) -> ClientDiagnostic {
    ClientDiagnostic {
        client_id: record.id.clone(),
        nom: record.nom.clone(),
        statut: record.statut,
        tarif_horaire_reel: record.fact.tarif_horaire_reel(),
        ecart_facturation_prestation: record.fact.ecart_facturation_prestation(),
        diagnostic: classify(&record.fact, seuil_rentabilite),
    }
}

pub fn evaluate_portfolio(records: &[ClientRecord], seuil_rentabilite: f64) -> Vec<ClientDiagnostic> {
    records
        .iter()
        .map(|record| diagnose_client(record, seuil_rentabilite))
        .collect()
}
