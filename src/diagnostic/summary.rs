use std::collections::BTreeMap;

use crate::clients::ClientRecord;
use crate::diagnostic::{ClientDiagnostic, PortfolioSummary, Urgence};

/// Aggregates one portfolio evaluation. The mean hourly rate only counts
/// clients with logged hours.
pub fn build_summary(
    records: &[ClientRecord],
    diagnostics: &[ClientDiagnostic],
) -> PortfolioSummary {
    let total_chiffre_affaires: f64 = records.iter().map(|r| r.fact.chiffre_affaires).sum();
    let total_heures: f64 = records.iter().map(|r| r.fact.heures).sum();

    let billed: Vec<f64> = records
        .iter()
        .filter(|r| r.fact.heures > 0.0)
        .map(|r| r.fact.tarif_horaire_reel())
        .collect();
    let tarif_horaire_moyen = if billed.is_empty() {
        0.0
    } else {
        billed.iter().sum::<f64>() / billed.len() as f64
    };

    let mut par_categorie = BTreeMap::new();
    let mut clients_a_risque = Vec::new();
    for diag in diagnostics {
        *par_categorie.entry(diag.diagnostic.kind).or_insert(0usize) += 1;
        if diag.urgence() == Urgence::High {
            clients_a_risque.push(diag.client_id.clone());
        }
    }

    PortfolioSummary {
        nb_clients: records.len(),
        total_chiffre_affaires,
        total_heures,
        tarif_horaire_moyen,
        par_categorie,
        clients_a_risque,
    }
}

#[cfg(test)]
mod tests {
    use super::build_summary;
    use crate::clients::sample::sample_portfolio;
    use crate::diagnostic::classifier::evaluate_portfolio;
    use crate::diagnostic::rules::DEFAULT_SEUIL_RENTABILITE;

    #[test]
    fn summary_counts_match_portfolio() {
        let portfolio = sample_portfolio();
        let diagnostics = evaluate_portfolio(&portfolio, DEFAULT_SEUIL_RENTABILITE);
        let summary = build_summary(&portfolio, &diagnostics);

        assert_eq!(summary.nb_clients, portfolio.len());
        assert_eq!(
            summary.par_categorie.values().sum::<usize>(),
            portfolio.len()
        );
        let expected_ca: f64 = portfolio.iter().map(|r| r.fact.chiffre_affaires).sum();
        assert!((summary.total_chiffre_affaires - expected_ca).abs() < 1e-9);
    }

    #[test]
    fn at_risk_list_holds_high_urgency_clients_only() {
        let portfolio = sample_portfolio();
        let diagnostics = evaluate_portfolio(&portfolio, DEFAULT_SEUIL_RENTABILITE);
        let summary = build_summary(&portfolio, &diagnostics);

        for id in &summary.clients_a_risque {
            let diag = diagnostics
                .iter()
                .find(|d| &d.client_id == id)
                .expect("missing diagnostic for at-risk client");
            assert_eq!(diag.urgence(), crate::diagnostic::Urgence::High);
        }
    }

    #[test]
    fn dormant_clients_do_not_skew_mean_rate() {
        let portfolio = sample_portfolio();
        let diagnostics = evaluate_portfolio(&portfolio, DEFAULT_SEUIL_RENTABILITE);
        let summary = build_summary(&portfolio, &diagnostics);
        // every billed sample client runs between 40 and 120 per hour
        assert!(summary.tarif_horaire_moyen > 40.0);
    }
}
