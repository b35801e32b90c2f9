//! Plans: ordered file-system actions with a two-phase execution model.
//!
//! A plan is built, then simulated (validated without touching storage),
//! then executed once. Execution is not transactional: when action `k`
//! fails, actions before it stay on disk.

mod action;
mod simulation;

pub use action::Action;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};

/// Lifecycle state of a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanState {
    #[default]
    Building,
    Simulated,
    Executed,
}

/// An ordered list of actions.
#[derive(Debug, Default)]
pub struct Plan {
    actions: Vec<Action>,
    state: PlanState,
    replaceable: HashSet<PathBuf>,
}

impl Plan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a plan from an existing list of actions.
    #[must_use]
    pub fn from_actions(actions: Vec<Action>) -> Self {
        Self {
            actions,
            state: PlanState::Building,
            replaceable: HashSet::new(),
        }
    }

    /// Append an action.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::IllegalState` once the plan has been simulated.
    pub fn add_action(&mut self, action: Action) -> Result<()> {
        self.ensure_building()?;
        self.actions.push(action);
        Ok(())
    }

    /// Append actions, e.g. those returned by a nested split.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::IllegalState` once the plan has been simulated.
    pub fn add_actions(&mut self, actions: impl IntoIterator<Item = Action>) -> Result<()> {
        self.ensure_building()?;
        self.actions.extend(actions);
        Ok(())
    }

    /// Allow a clearing `CreatePath` to replace the existing file at `path`.
    ///
    /// Any other existing file is protected from overwrites.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::IllegalState` once the plan has been simulated.
    pub fn allow_replacing(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.ensure_building()?;
        self.replaceable.insert(path.into());
        Ok(())
    }

    /// Whether the existing file at `path` may be replaced.
    #[must_use]
    pub fn is_replaceable(&self, path: &Path) -> bool {
        self.replaceable.contains(path)
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn state(&self) -> PlanState {
        self.state
    }

    fn ensure_building(&self) -> Result<()> {
        if self.state != PlanState::Building {
            return Err(SplitError::IllegalState(format!(
                "cannot add actions to a plan in state {:?}",
                self.state
            )));
        }
        Ok(())
    }

    /// Validate every action without writing anything.
    ///
    /// All violations are reported together. Can be called repeatedly with
    /// identical results as long as storage does not change.
    ///
    /// # Errors
    ///
    /// * `IllegalState` for an empty or already executed plan.
    /// * `PlanValidation` listing every violation found.
    pub fn simulate(&mut self) -> Result<()> {
        if self.state == PlanState::Executed {
            return Err(SplitError::IllegalState(
                "plan has already been executed".to_string(),
            ));
        }
        if self.actions.is_empty() {
            return Err(SplitError::IllegalState(
                "cannot simulate an empty plan".to_string(),
            ));
        }

        let violations = simulation::check_actions(&self.actions, &self.replaceable);
        if !violations.is_empty() {
            tracing::warn!(
                violations = violations.len(),
                actions = self.actions.len(),
                "plan simulation failed"
            );
            return Err(SplitError::PlanValidation(violations));
        }

        tracing::debug!(actions = self.actions.len(), "plan simulated");
        self.state = PlanState::Simulated;
        Ok(())
    }

    /// Perform every action in order.
    ///
    /// The plan is consumed by the first call: it moves to `Executed` even
    /// when an action fails.
    ///
    /// # Errors
    ///
    /// * `IllegalState` unless the plan was simulated successfully first.
    /// * `ActionFailed` with the index of the first failing action.
    pub fn execute(&mut self) -> Result<()> {
        if self.state != PlanState::Simulated {
            return Err(SplitError::IllegalState(format!(
                "plan must be simulated before it is executed (state is {:?})",
                self.state
            )));
        }
        self.state = PlanState::Executed;

        for (index, action) in self.actions.iter().enumerate() {
            tracing::debug!(index, action = %action, "executing action");
            action.execute().map_err(|e| {
                tracing::error!(index, action = %action, error = %e, "action failed");
                SplitError::ActionFailed {
                    index,
                    action: action.to_string(),
                    source: Box::new(e),
                }
            })?;
        }

        tracing::info!(actions = self.actions.len(), "plan executed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FileContentType;
    use crate::element::Element;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_plan(target: &Path) -> Plan {
        let mut plan = Plan::new();
        plan.add_action(Action::create_path(target)).unwrap();
        plan.add_action(Action::write_file(
            target,
            Element::new(json!({"id": 1}), "item"),
            FileContentType::Json,
        ))
        .unwrap();
        plan
    }

    #[test]
    fn test_simulate_then_execute() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("items").join("00000__item.json");
        let mut plan = write_plan(&target);

        plan.simulate().unwrap();
        assert_eq!(plan.state(), PlanState::Simulated);
        assert!(!target.exists());

        plan.execute().unwrap();
        assert_eq!(plan.state(), PlanState::Executed);
        assert!(fs::read_to_string(&target).unwrap().contains("\"item\""));
    }

    #[test]
    fn test_execute_before_simulate_is_illegal() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a.json");
        let mut plan = write_plan(&target);

        assert!(matches!(plan.execute(), Err(SplitError::IllegalState(_))));
        assert!(!target.exists());
    }

    #[test]
    fn test_execute_twice_is_illegal() {
        let dir = tempdir().unwrap();
        let mut plan = write_plan(&dir.path().join("a.json"));
        plan.simulate().unwrap();
        plan.execute().unwrap();

        assert!(matches!(plan.execute(), Err(SplitError::IllegalState(_))));
        assert!(matches!(plan.simulate(), Err(SplitError::IllegalState(_))));
    }

    #[test]
    fn test_empty_plan_is_illegal() {
        let mut plan = Plan::new();
        assert!(plan.is_empty());
        assert!(matches!(plan.simulate(), Err(SplitError::IllegalState(_))));
    }

    #[test]
    fn test_add_after_simulate_is_illegal() {
        let dir = tempdir().unwrap();
        let mut plan = write_plan(&dir.path().join("a.json"));
        plan.simulate().unwrap();

        let result = plan.add_action(Action::create_path(dir.path().join("b.json")));
        assert!(matches!(result, Err(SplitError::IllegalState(_))));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_simulate_is_repeatable_and_side_effect_free() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("taken.json");
        fs::write(&existing, "{}").unwrap();

        let mut plan = Plan::from_actions(vec![
            Action::create_path(&existing),
            Action::create_path(dir.path().join("new").join("x.json")),
        ]);

        let first = plan.simulate().unwrap_err().to_string();
        let second = plan.simulate().unwrap_err().to_string();
        assert_eq!(first, second);
        assert_eq!(plan.state(), PlanState::Building);

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(fs::read_to_string(&existing).unwrap(), "{}");
    }

    #[test]
    fn test_clearing_only_replaces_allowed_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("doc.json");
        let other = dir.path().join("other.json");
        fs::write(&source, "{}").unwrap();
        fs::write(&other, "keep me").unwrap();

        let mut plan = Plan::from_actions(vec![
            Action::create_path_clearing(&source),
            Action::create_path_clearing(&other),
        ]);
        plan.allow_replacing(&source).unwrap();

        let Err(SplitError::PlanValidation(violations)) = plan.simulate() else {
            panic!("expected a validation error");
        };
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].action_index, 1);
        assert_eq!(fs::read_to_string(&other).unwrap(), "keep me");
    }

    #[test]
    fn test_allow_replacing_after_simulate_is_illegal() {
        let dir = tempdir().unwrap();
        let mut plan = write_plan(&dir.path().join("a.json"));
        plan.simulate().unwrap();

        let result = plan.allow_replacing(dir.path().join("a.json"));
        assert!(matches!(result, Err(SplitError::IllegalState(_))));
        assert!(!plan.is_replaceable(&dir.path().join("a.json")));
    }

    #[test]
    fn test_failed_action_reports_index_and_keeps_earlier_work() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.json");
        let blocked = dir.path().join("blocker").join("second.json");

        let mut plan = Plan::from_actions(vec![
            Action::create_path(&first),
            Action::create_path(&blocked),
        ]);
        plan.simulate().unwrap();

        // Storage changes between simulate and execute
        fs::write(dir.path().join("blocker"), "not a directory").unwrap();

        let err = plan.execute().unwrap_err();
        assert!(matches!(err, SplitError::ActionFailed { index: 1, .. }));
        assert!(first.exists());
    }
}
