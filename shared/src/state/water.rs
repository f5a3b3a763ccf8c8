//! Daily water intake with day rollover

use crate::errors::{StoreError, StoreResult};
use crate::models::{WaterDay, WaterEntry};
use crate::validation::{validate_water_amount, validate_water_goal};
use chrono::{NaiveDate, NaiveDateTime};

/// Goal plus today's intake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterState {
    pub goal: u32,
    pub today: WaterDay,
}

impl WaterState {
    pub fn new(goal: u32, today: NaiveDate) -> Self {
        Self {
            goal,
            today: WaterDay::new(today),
        }
    }

    /// Rebuild from persisted values.
    ///
    /// A stored day from another date is discarded. A stored amount that
    /// disagrees with its entries is recomputed from the entries.
    pub fn hydrate(goal: u32, persisted: Option<WaterDay>, today: NaiveDate) -> Self {
        let day = match persisted {
            Some(mut day) if day.date == today => {
                day.amount = day.entries_total();
                day
            }
            _ => WaterDay::new(today),
        };
        Self { goal, today: day }
    }

    /// Start a fresh day if `date` is not the tracked one; returns true on rollover
    pub fn roll_over(&mut self, date: NaiveDate) -> bool {
        if self.today.date == date {
            return false;
        }
        self.today = WaterDay::new(date);
        true
    }

    /// Record a drink at local time `at`
    pub fn add_intake(&mut self, amount_ml: u32, at: NaiveDateTime) -> StoreResult<WaterEntry> {
        validate_water_amount(amount_ml).map_err(StoreError::Validation)?;
        self.roll_over(at.date());

        let total = self.today.amount.checked_add(amount_ml).ok_or_else(|| {
            StoreError::Validation("Daily total is too large to record".to_string())
        })?;
        let entry = WaterEntry {
            time: at.format("%H:%M").to_string(),
            amount: amount_ml,
        };
        self.today.amount = total;
        self.today.entries.push(entry.clone());
        Ok(entry)
    }

    /// Pop the most recent entry
    pub fn undo_last(&mut self) -> Option<WaterEntry> {
        let entry = self.today.entries.pop()?;
        self.today.amount = self.today.amount.saturating_sub(entry.amount);
        Some(entry)
    }

    pub fn set_goal(&mut self, goal_ml: u32) -> StoreResult<()> {
        validate_water_goal(goal_ml).map_err(StoreError::Validation)?;
        self.goal = goal_ml;
        Ok(())
    }

    /// Clear today's entries; returns true if anything was removed
    pub fn reset_today(&mut self) -> bool {
        let changed = !self.today.entries.is_empty() || self.today.amount != 0;
        self.today = WaterDay::new(self.today.date);
        changed
    }

    /// Rounded progress percentage, not clamped
    pub fn percentage(&self) -> u32 {
        water_percentage(self.today.amount, self.goal)
    }

    pub fn remaining(&self) -> u32 {
        self.goal.saturating_sub(self.today.amount)
    }

    pub fn goal_met(&self) -> bool {
        self.today.amount >= self.goal
    }
}

/// `round(amount / goal * 100)`; a zero goal reads as 0 %
pub fn water_percentage(amount: u32, goal: u32) -> u32 {
    if goal == 0 {
        return 0;
    }
    (amount as f64 / goal as f64 * 100.0).round() as u32
}
