use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::kanban::transition::progress_after_drop;
use crate::kanban::{KanbanPlan, PlanStatus};

#[derive(Debug, Error)]
pub enum PlanStoreError {
    #[error("unknown plan id: {0}")]
    UnknownPlan(String),
    #[error("duplicate plan id: {0}")]
    DuplicatePlan(String),
}

/// In-memory board state. Every mutation goes through these methods; the
/// progress invariant is enforced here and nowhere else.
#[derive(Debug, Clone, Default)]
pub struct PlanStore {
    plans: Vec<KanbanPlan>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_plans(plans: Vec<KanbanPlan>) -> Self {
        Self { plans }
    }

    pub fn all(&self) -> &[KanbanPlan] {
        &self.plans
    }

    pub fn by_id(&self, id: &str) -> Option<&KanbanPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn by_status(&self, status: PlanStatus) -> Vec<&KanbanPlan> {
        self.plans.iter().filter(|p| p.status == status).collect()
    }

    pub fn add(&mut self, mut plan: KanbanPlan) -> Result<(), PlanStoreError> {
        if self.by_id(&plan.id).is_some() {
            return Err(PlanStoreError::DuplicatePlan(plan.id));
        }
        plan.progress = plan.progress.min(100);
        self.plans.push(plan);
        Ok(())
    }

    pub fn update_titre(&mut self, id: &str, titre: &str) -> Result<(), PlanStoreError> {
        let plan = self.by_id_mut(id)?;
        plan.titre = titre.to_string();
        Ok(())
    }

    pub fn update_echeance(
        &mut self,
        id: &str,
        echeance: Option<DateTime<Utc>>,
    ) -> Result<(), PlanStoreError> {
        let plan = self.by_id_mut(id)?;
        plan.echeance = echeance;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<KanbanPlan, PlanStoreError> {
        let index = self
            .plans
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PlanStoreError::UnknownPlan(id.to_string()))?;
        Ok(self.plans.remove(index))
    }

    /// Applies a drop on `target`: the plan takes the column status and the
    /// column's progress floor, never losing progress already made. A
    /// missing id fails without touching the board.
    pub fn move_plan(
        &mut self,
        id: &str,
        target: PlanStatus,
    ) -> Result<&KanbanPlan, PlanStoreError> {
        let plan = self.by_id_mut(id)?;
        plan.progress = progress_after_drop(target, plan.progress);
        plan.status = target;
        Ok(plan)
    }

    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<&KanbanPlan> {
        self.plans.iter().filter(|p| p.is_overdue(now)).collect()
    }

    fn by_id_mut(&mut self, id: &str) -> Result<&mut KanbanPlan, PlanStoreError> {
        self.plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlanStoreError::UnknownPlan(id.to_string()))
    }
}
