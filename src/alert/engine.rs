use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::rules::AlertEventKind;
use crate::diagnostic::{ClientDiagnostic, DiagnosticKind};
use crate::kanban::KanbanPlan;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub kind: AlertEventKind,
    pub title: String,
    pub body: String,
}

/// Diffs two portfolio evaluations per client and inspects the board for
/// late plans. The caller decides which event kinds actually get delivered.
pub fn evaluate_alerts(
    previous: Option<&[ClientDiagnostic]>,
    current: &[ClientDiagnostic],
    plans: &[KanbanPlan],
    now: DateTime<Utc>,
) -> Vec<AlertEvent> {
    let mut events = Vec::new();

    for plan in plans.iter().filter(|p| p.is_overdue(now)) {
        events.push(AlertEvent {
            kind: AlertEventKind::PlanEnRetard,
            title: format!("Plan en retard : {}", plan.titre),
            body: format!(
                "Le plan {} (client {}) a dépassé son échéance sans être terminé.",
                plan.id, plan.client_id
            ),
        });
    }

    if let Some(previous) = previous {
        for before in previous {
            let Some(after) = current.iter().find(|d| d.client_id == before.client_id) else {
                continue;
            };
            if after.diagnostic.kind == before.diagnostic.kind {
                continue;
            }
            if after.diagnostic.kind == DiagnosticKind::Equilibre {
                events.push(AlertEvent {
                    kind: AlertEventKind::RetourEquilibre,
                    title: format!("Retour à l'équilibre pour {}", after.nom),
                    body: format!(
                        "Le dossier sort de la catégorie « {} ».",
                        before.diagnostic.kind
                    ),
                });
            } else if after.diagnostic.urgence > before.diagnostic.urgence {
                events.push(AlertEvent {
                    kind: AlertEventKind::DiagnosticDegrade,
                    title: format!("Diagnostic dégradé pour {}", after.nom),
                    body: format!(
                        "Passage de « {} » à « {} ». {}",
                        before.diagnostic.kind, after.diagnostic.kind, after.diagnostic.alerte
                    ),
                });
            } else {
                events.push(AlertEvent {
                    kind: AlertEventKind::DiagnosticChange,
                    title: format!("Nouveau diagnostic pour {}", after.nom),
                    body: format!(
                        "Passage de « {} » à « {} ».",
                        before.diagnostic.kind, after.diagnostic.kind
                    ),
                });
            }
        }
    }

    events
}
