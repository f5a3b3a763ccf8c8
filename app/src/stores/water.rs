//! Daily water intake tracker

use crate::clock::Clock;
use crate::storage::{read_json, Persister, StorageKey, Write};
use fitbuddy_shared::state::WaterState;
use fitbuddy_shared::{StoreResult, WaterDay, WaterEntry, WaterSnapshot};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

pub struct WaterStore {
    state: RwLock<WaterState>,
    persister: Persister,
    clock: Arc<dyn Clock>,
    default_goal: u32,
}

impl WaterStore {
    pub fn new(persister: Persister, clock: Arc<dyn Clock>, default_goal: u32) -> Self {
        let today = clock.local_now().date();
        Self {
            state: RwLock::new(WaterState::new(default_goal, today)),
            persister,
            clock,
            default_goal,
        }
    }

    /// Read the goal and today's intake. A stored day from another date is dropped.
    #[instrument(skip(self))]
    pub async fn load(&self) -> StoreResult<()> {
        let storage = self.persister.storage().as_ref();
        let goal = match storage.get(StorageKey::WaterGoal.as_str()).await? {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(goal) if goal > 0 => goal,
                _ => {
                    warn!(value = %raw, "Ignoring invalid stored water goal");
                    self.default_goal
                }
            },
            None => self.default_goal,
        };
        let persisted: Option<WaterDay> = read_json(storage, StorageKey::WaterIntake).await?;

        let today = self.clock.local_now().date();
        let state = WaterState::hydrate(goal, persisted, today);
        debug!(goal, amount = state.today.amount, "Water intake loaded");
        *self.state.write().await = state;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_intake(&self, amount_ml: u32) -> StoreResult<WaterSnapshot> {
        let mut state = self.state.write().await;
        let previous_date = state.today.date;
        state.add_intake(amount_ml, self.clock.local_now())?;
        if state.today.date != previous_date {
            info!(date = %state.today.date, "Started a new water day");
        }
        self.persist_day(&state).await;
        Ok(snapshot_of(&state))
    }

    /// Remove the most recent entry; None when there is nothing to undo
    pub async fn undo_last(&self) -> Option<WaterEntry> {
        let mut state = self.state.write().await;
        let entry = state.undo_last()?;
        self.persist_day(&state).await;
        Some(entry)
    }

    /// Change the daily goal; the write is awaited and errors surface
    #[instrument(skip(self))]
    pub async fn set_goal(&self, goal_ml: u32) -> StoreResult<WaterSnapshot> {
        let mut state = self.state.write().await;
        let previous = state.goal;
        state.set_goal(goal_ml)?;
        if let Err(e) = self
            .persister
            .commit(Write::set(StorageKey::WaterGoal, goal_ml.to_string()))
            .await
        {
            state.goal = previous;
            return Err(e.into());
        }
        Ok(snapshot_of(&state))
    }

    pub async fn reset_today(&self) -> WaterSnapshot {
        let mut state = self.state.write().await;
        if state.reset_today() {
            self.persist_day(&state).await;
        }
        snapshot_of(&state)
    }

    /// Snapshot for the current local day
    pub async fn snapshot(&self) -> WaterSnapshot {
        let today = self.clock.local_now().date();
        let mut state = self.state.write().await;
        if state.roll_over(today) {
            self.persist_day(&state).await;
        }
        snapshot_of(&state)
    }

    pub(crate) async fn reset(&self) {
        let today = self.clock.local_now().date();
        *self.state.write().await = WaterState::new(self.default_goal, today);
    }

    async fn persist_day(&self, state: &WaterState) {
        self.persister
            .submit_json(StorageKey::WaterIntake, &state.today)
            .await;
    }
}

fn snapshot_of(state: &WaterState) -> WaterSnapshot {
    WaterSnapshot {
        goal: state.goal,
        today: state.today.clone(),
        percentage: state.percentage(),
        remaining: state.remaining(),
        goal_met: state.goal_met(),
    }
}
