use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::clients::ClientRecord;
use crate::diagnostic::whatif::WhatIfReport;
use crate::diagnostic::{ClientDiagnostic, PortfolioSummary, Urgence};
use crate::kanban::{KanbanPlan, PlanStatus};
use crate::listing::Page;

fn urgence_cell(urgence: Urgence) -> Cell {
    let label = urgence.to_string();
    match urgence {
        Urgence::High => Cell::new(label).fg(Color::Red),
        Urgence::Medium => Cell::new(label).fg(Color::Yellow),
        Urgence::None => Cell::new(label).fg(Color::Green),
    }
}

pub fn render_diagnostics_table(diagnostics: &[ClientDiagnostic]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Client",
        "Statut",
        "Diagnostic",
        "Urgence",
        "Tarif réel",
        "Écart",
        "Action recommandée",
    ]);

    for diag in diagnostics {
        table.add_row(Row::from(vec![
            Cell::new(&diag.nom),
            Cell::new(diag.statut.to_string()),
            Cell::new(diag.diagnostic.kind.to_string()),
            urgence_cell(diag.diagnostic.urgence),
            Cell::new(format!("{:.0} €/h", diag.tarif_horaire_reel)),
            Cell::new(format!("{:+.1}", diag.ecart_facturation_prestation)),
            Cell::new(&diag.diagnostic.action_recommandee),
        ]));
    }
    table.to_string()
}

pub fn render_clients_table(page: &Page<ClientRecord>) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Client",
        "Responsable",
        "Statut",
        "CA facturé",
        "Heures",
        "% CA",
        "% Heures",
    ]);

    for record in &page.items {
        table.add_row(vec![
            record.nom.clone(),
            record.responsable.clone(),
            record.statut.to_string(),
            format!("{:.0} €", record.fact.chiffre_affaires),
            format!("{:.0}", record.fact.heures),
            format!("{:.1}%", record.fact.pourcentage_ca),
            format!("{:.1}%", record.fact.pourcentage_heures),
        ]);
    }

    let mut out = table.to_string();
    out.push_str(&format!(
        "\nPage {}/{} - {} client(s)",
        page.page,
        page.total_pages.max(1),
        page.total_items
    ));
    out
}

pub fn render_summary(summary: &PortfolioSummary) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Catégorie", "Clients"]);
    for (kind, count) in &summary.par_categorie {
        table.add_row(vec![kind.to_string(), count.to_string()]);
    }

    let mut out = table.to_string();
    out.push_str(&format!(
        "\nClients: {}\nCA facturé total: {:.0} €\nHeures totales: {:.0}\nTarif horaire moyen: {:.0} €/h\nClients à risque: {}",
        summary.nb_clients,
        summary.total_chiffre_affaires,
        summary.total_heures,
        summary.tarif_horaire_moyen,
        if summary.clients_a_risque.is_empty() {
            "-".to_string()
        } else {
            summary.clients_a_risque.join(", ")
        }
    ));
    out
}

pub fn render_board_table(plans: &[KanbanPlan]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Colonne", "Plan", "Client", "Titre", "Avancement", "Échéance"]);

    for status in PlanStatus::ALL {
        for plan in plans.iter().filter(|p| p.status == status) {
            table.add_row(vec![
                status.to_string(),
                plan.id.clone(),
                plan.client_id.clone(),
                plan.titre.clone(),
                format!("{}%", plan.progress),
                plan.echeance
                    .map(|e| e.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
    }
    table.to_string()
}

pub fn render_whatif_table(report: &WhatIfReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Diagnostic", "Urgence", "Alerte"]);
    table.add_row(Row::from(vec![
        Cell::new("Avant"),
        Cell::new(report.before.kind.to_string()),
        urgence_cell(report.before.urgence),
        Cell::new(&report.before.alerte),
    ]));
    table.add_row(Row::from(vec![
        Cell::new("Après"),
        Cell::new(report.after.kind.to_string()),
        urgence_cell(report.after.urgence),
        Cell::new(&report.after.alerte),
    ]));

    let changes = report
        .changes_applied
        .iter()
        .map(|c| format!("{} {} -> {}", c.champ, c.from, c.to))
        .collect::<Vec<_>>()
        .join(", ");
    let verdict = if report.urgence_reduite {
        "urgence réduite"
    } else if report.urgence_aggravee {
        "urgence aggravée"
    } else {
        "urgence inchangée"
    };

    let mut out = table.to_string();
    out.push_str(&format!(
        "\nSimulation pour {}: {changes}\nImpact: {verdict}",
        report.nom
    ));
    out
}
