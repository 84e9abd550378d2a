use crate::clients::ClientFinancialFact;
use crate::diagnostic::{DiagnosticKind, Urgence};

/// Billing must lead delivered work by more than this many points before a
/// prestation debt is flagged.
pub const SEUIL_ECART_DETTE: f64 = 25.0;
/// A prestation debt is only meaningful once a large share of the annual
/// revenue target has been billed.
pub const SEUIL_CA_DETTE: f64 = 70.0;
/// Delivered work leading billing by more than 20 points flags under-billing.
pub const SEUIL_ECART_SOUS_FACTURATION: f64 = -20.0;
/// Profitability floor in currency units per hour, overridable per firm.
pub const DEFAULT_SEUIL_RENTABILITE: f64 = 90.0;

/// One entry of the classification chain. The chain priority lives in
/// [`RULE_TABLE`] ordering, not in control flow.
pub struct DiagnosticRule {
    pub kind: DiagnosticKind,
    pub urgence: Urgence,
    pub applies: fn(&ClientFinancialFact, f64) -> bool,
    pub message: fn(&ClientFinancialFact, f64) -> (String, String),
}

impl DiagnosticRule {
    pub fn build(&self, fact: &ClientFinancialFact, seuil_rentabilite: f64) -> super::Diagnostic {
        let (alerte, action_recommandee) = (self.message)(fact, seuil_rentabilite);
        super::Diagnostic {
            kind: self.kind,
            urgence: self.urgence,
            alerte,
            action_recommandee,
        }
    }
}

fn dette_applies(fact: &ClientFinancialFact, _seuil: f64) -> bool {
    fact.ecart_facturation_prestation() > SEUIL_ECART_DETTE && fact.pourcentage_ca > SEUIL_CA_DETTE
}

fn dette_message(fact: &ClientFinancialFact, _seuil: f64) -> (String, String) {
    (
        format!(
            "Facturation à {:.1}% du CA annuel pour {:.1}% des heures consommées",
            fact.pourcentage_ca, fact.pourcentage_heures
        ),
        "Planifier la réalisation des prestations déjà facturées".to_string(),
    )
}

fn sous_facturation_applies(fact: &ClientFinancialFact, _seuil: f64) -> bool {
    fact.ecart_facturation_prestation() < SEUIL_ECART_SOUS_FACTURATION
}

fn sous_facturation_message(fact: &ClientFinancialFact, _seuil: f64) -> (String, String) {
    (
        format!(
            "Les heures réalisées dépassent la facturation de {:.1} points",
            fact.ecart_facturation_prestation().abs()
        ),
        "Facturer les travaux réalisés non encore facturés".to_string(),
    )
}

fn rentabilite_applies(fact: &ClientFinancialFact, seuil: f64) -> bool {
    fact.tarif_horaire_reel() < seuil
}

fn rentabilite_message(fact: &ClientFinancialFact, seuil: f64) -> (String, String) {
    (
        format!(
            "Tarif horaire réel de {} € sous le seuil de {} €",
            fact.tarif_horaire_reel().round() as i64,
            seuil
        ),
        "Revoir la tarification ou le temps passé sur le dossier".to_string(),
    )
}

fn equilibre_applies(_fact: &ClientFinancialFact, _seuil: f64) -> bool {
    true
}

fn equilibre_message(_fact: &ClientFinancialFact, _seuil: f64) -> (String, String) {
    (
        "Facturation et prestation alignées".to_string(),
        "Aucune action requise".to_string(),
    )
}

pub const DETTE_PRESTATION: DiagnosticRule = DiagnosticRule {
    kind: DiagnosticKind::DettePrestation,
    urgence: Urgence::Medium,
    applies: dette_applies,
    message: dette_message,
};

pub const SOUS_FACTURATION: DiagnosticRule = DiagnosticRule {
    kind: DiagnosticKind::SousFacturation,
    urgence: Urgence::High,
    applies: sous_facturation_applies,
    message: sous_facturation_message,
};

pub const RENTABILITE_FAIBLE: DiagnosticRule = DiagnosticRule {
    kind: DiagnosticKind::RentabiliteFaible,
    urgence: Urgence::High,
    applies: rentabilite_applies,
    message: rentabilite_message,
};

pub const EQUILIBRE: DiagnosticRule = DiagnosticRule {
    kind: DiagnosticKind::Equilibre,
    urgence: Urgence::None,
    applies: equilibre_applies,
    message: equilibre_message,
};

/// Classification chain, highest priority first. The last entry is the
/// catch-all and always applies.
pub const RULE_TABLE: [DiagnosticRule; 4] = [
    DETTE_PRESTATION,
    SOUS_FACTURATION,
    RENTABILITE_FAIBLE,
    EQUILIBRE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ClientFinancialFact;

    fn fact(ca: f64, heures_pct: f64, heures: f64, montant: f64) -> ClientFinancialFact {
        ClientFinancialFact {
            pourcentage_ca: ca,
            pourcentage_heures: heures_pct,
            heures,
            chiffre_affaires: montant,
        }
    }

    #[test]
    fn dette_requires_both_gap_and_billed_share() {
        // gap above 25 but billed share at the threshold exactly
        assert!(!dette_applies(&fact(70.0, 40.0, 10.0, 1000.0), 90.0));
        // billed share high enough but gap at the threshold exactly
        assert!(!dette_applies(&fact(80.0, 55.0, 10.0, 1000.0), 90.0));
        assert!(dette_applies(&fact(80.0, 50.0, 10.0, 1000.0), 90.0));
    }

    #[test]
    fn sous_facturation_triggers_strictly_below_minus_twenty() {
        assert!(!sous_facturation_applies(&fact(40.0, 60.0, 10.0, 1000.0), 90.0));
        assert!(sous_facturation_applies(&fact(40.0, 60.1, 10.0, 1000.0), 90.0));
    }

    #[test]
    fn rentabilite_compares_rate_to_threshold() {
        // 1000 / 20 = 50 per hour
        assert!(rentabilite_applies(&fact(60.0, 55.0, 20.0, 1000.0), 90.0));
        assert!(!rentabilite_applies(&fact(60.0, 55.0, 20.0, 2000.0), 90.0));
        // rate exactly at the threshold passes
        assert!(!rentabilite_applies(&fact(60.0, 55.0, 10.0, 900.0), 90.0));
    }

    #[test]
    fn catch_all_always_applies() {
        assert!(equilibre_applies(&fact(0.0, 0.0, 0.0, 0.0), 90.0));
    }

    #[test]
    fn table_order_matches_priority() {
        let kinds: Vec<DiagnosticKind> = RULE_TABLE.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::DettePrestation,
                DiagnosticKind::SousFacturation,
                DiagnosticKind::RentabiliteFaible,
                DiagnosticKind::Equilibre,
            ]
        );
    }

    #[test]
    fn messages_embed_expected_figures() {
        let (alerte, _) = dette_message(&fact(80.0, 50.0, 10.0, 1000.0), 90.0);
        assert!(alerte.contains("80.0"));
        assert!(alerte.contains("50.0"));

        let (alerte, _) = sous_facturation_message(&fact(40.0, 70.0, 10.0, 1000.0), 90.0);
        assert!(alerte.contains("30.0"));

        let (alerte, _) = rentabilite_message(&fact(60.0, 55.0, 20.0, 1000.0), 90.0);
        assert!(alerte.contains("50"));
        assert!(alerte.contains("90"));
    }
}
