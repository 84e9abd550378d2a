use anyhow::Result;

use crate::clients::ClientRecord;
use crate::diagnostic::ClientDiagnostic;

pub fn diagnostics_to_csv(diagnostics: &[ClientDiagnostic]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "client_id",
        "nom",
        "statut",
        "type",
        "urgence",
        "tarif_horaire_reel",
        "ecart_facturation_prestation",
        "alerte",
        "action_recommandee",
    ])?;
    for diag in diagnostics {
        writer.write_record([
            diag.client_id.clone(),
            diag.nom.clone(),
            diag.statut.as_slug().to_string(),
            diag.diagnostic.kind.as_slug().to_string(),
            format!("{:?}", diag.diagnostic.urgence).to_lowercase(),
            format!("{:.2}", diag.tarif_horaire_reel),
            format!("{:.2}", diag.ecart_facturation_prestation),
            diag.diagnostic.alerte.clone(),
            diag.diagnostic.action_recommandee.clone(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn clients_to_csv(records: &[ClientRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "id",
        "nom",
        "responsable",
        "statut",
        "pourcentage_ca",
        "pourcentage_heures",
        "heures",
        "chiffre_affaires",
    ])?;
    for record in records {
        writer.write_record([
            record.id.clone(),
            record.nom.clone(),
            record.responsable.clone(),
            record.statut.as_slug().to_string(),
            format!("{:.1}", record.fact.pourcentage_ca),
            format!("{:.1}", record.fact.pourcentage_heures),
            format!("{:.1}", record.fact.heures),
            format!("{:.2}", record.fact.chiffre_affaires),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::{clients_to_csv, diagnostics_to_csv};
    use crate::clients::sample::sample_portfolio;
    use crate::diagnostic::classifier::evaluate_portfolio;
    use crate::diagnostic::rules::DEFAULT_SEUIL_RENTABILITE;

    #[test]
    fn csv_outputs_one_line_per_client_plus_header() {
        let portfolio = sample_portfolio();
        let diagnostics = evaluate_portfolio(&portfolio, DEFAULT_SEUIL_RENTABILITE);

        let clients = clients_to_csv(&portfolio).expect("failed rendering clients CSV");
        assert_eq!(clients.trim().lines().count(), portfolio.len() + 1);

        let diags = diagnostics_to_csv(&diagnostics).expect("failed rendering diagnostics CSV");
        assert!(diags.starts_with("client_id,"));
        assert!(diags.contains("dette_prestation"));
    }
}
