use chrono::{Duration, Utc};

use crate::clients::{ClientFinancialFact, ClientRecord, ClientStatus};
use crate::kanban::{KanbanPlan, PlanStatus};

fn fact(ca: f64, heures_pct: f64, heures: f64, montant: f64) -> ClientFinancialFact {
    ClientFinancialFact {
        pourcentage_ca: ca,
        pourcentage_heures: heures_pct,
        heures,
        chiffre_affaires: montant,
    }
}

/// Built-in demonstration portfolio. Deterministic apart from the evaluation
/// timestamp, and covers every diagnostic category and client status.
pub fn sample_portfolio() -> Vec<ClientRecord> {
    vec![
        ClientRecord::new("cl-001", "Boulangerie Martin")
            .with_responsable("Claire Fontaine")
            .with_fact(fact(80.0, 50.0, 120.0, 14_400.0)),
        ClientRecord::new("cl-002", "Transports Lefebvre")
            .with_responsable("Marc Oliveira")
            .with_fact(fact(40.0, 70.0, 210.0, 16_800.0)),
        ClientRecord::new("cl-003", "Garage Dubois")
            .with_responsable("Claire Fontaine")
            .with_fact(fact(60.0, 55.0, 200.0, 10_000.0)),
        ClientRecord::new("cl-004", "SCI Les Tilleuls")
            .with_responsable("Sophie Nguyen")
            .with_fact(fact(62.0, 58.0, 90.0, 10_800.0)),
        ClientRecord::new("cl-005", "Pharmacie Bernard")
            .with_responsable("Marc Oliveira")
            .with_fact(fact(75.0, 68.0, 150.0, 15_750.0)),
        ClientRecord::new("cl-006", "Menuiserie Roche")
            .with_responsable("Sophie Nguyen")
            .with_fact(fact(92.0, 60.0, 80.0, 9_600.0)),
        ClientRecord::new("cl-007", "NovaTech Conseil")
            .with_responsable("Claire Fontaine")
            .with_statut(ClientStatus::Prospect)
            .with_fact(fact(0.0, 0.0, 0.0, 0.0)),
        ClientRecord::new("cl-008", "Restaurant Chez Paul")
            .with_responsable("Marc Oliveira")
            .with_fact(fact(30.0, 55.0, 140.0, 5_600.0)),
        ClientRecord::new("cl-009", "Immobilière Azur")
            .with_responsable("Sophie Nguyen")
            .with_statut(ClientStatus::Suspendu)
            .with_fact(fact(50.0, 45.0, 160.0, 12_000.0)),
        ClientRecord::new("cl-010", "Holding Verdier")
            .with_responsable("Claire Fontaine")
            .with_statut(ClientStatus::Archive)
            .with_fact(fact(100.0, 95.0, 300.0, 36_000.0)),
    ]
}

/// Built-in engagement plans for the demonstration portfolio, spread across
/// every board column. One plan is already past its due date.
pub fn sample_plans() -> Vec<KanbanPlan> {
    let now = Utc::now();
    vec![
        KanbanPlan::new("plan-001", "cl-001", "Bilan annuel 2025")
            .with_status(PlanStatus::Inprogress, 35)
            .with_echeance(now + Duration::days(21)),
        KanbanPlan::new("plan-002", "cl-002", "Régularisation facturation")
            .with_status(PlanStatus::Todo, 0)
            .with_echeance(now - Duration::days(3)),
        KanbanPlan::new("plan-003", "cl-003", "Revue de rentabilité")
            .with_status(PlanStatus::Validation, 85),
        KanbanPlan::new("plan-004", "cl-005", "Déclaration TVA T3")
            .with_status(PlanStatus::Done, 100),
        KanbanPlan::new("plan-005", "cl-006", "Point prestation client")
            .with_status(PlanStatus::Inprogress, 50)
            .with_echeance(now + Duration::days(7)),
        KanbanPlan::new("plan-006", "cl-007", "Proposition de mission")
            .with_status(PlanStatus::Todo, 0),
    ]
}
