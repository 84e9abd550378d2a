use serde::{Deserialize, Serialize};

use crate::clients::{ClientRecord, FactField};
use crate::diagnostic::classifier::classify;
use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactChange {
    pub champ: FactField,
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfReport {
    pub client_id: String,
    pub nom: String,
    pub changes_applied: Vec<FactChange>,
    pub before: Diagnostic,
    pub after: Diagnostic,
    pub urgence_aggravee: bool,
    pub urgence_reduite: bool,
}

/// Re-classifies a client after applying hypothetical fact changes. The input
/// record is left untouched.
pub fn simulate_whatif(
    record: &ClientRecord,
    target_changes: &[(FactField, f64)],
    seuil_rentabilite: f64,
) -> WhatIfReport {
    let before = classify(&record.fact, seuil_rentabilite);

    let mut changed = record.fact.clone();
    let mut changes_applied = Vec::new();
    for (field, to) in target_changes {
        let from = changed.field_value(*field);
        changed.apply_field_change(*field, *to);
        changes_applied.push(FactChange {
            champ: *field,
            from,
            to: *to,
        });
    }

    let after = classify(&changed, seuil_rentabilite);
    let urgence_aggravee = after.urgence > before.urgence;
    let urgence_reduite = after.urgence < before.urgence;

    WhatIfReport {
        client_id: record.id.clone(),
        nom: record.nom.clone(),
        changes_applied,
        before,
        after,
        urgence_aggravee,
        urgence_reduite,
    }
}
