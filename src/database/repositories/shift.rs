use anyhow::{Result, anyhow};
use chrono::{NaiveDate, Utc, Weekday};

use crate::database::models::{Shift, ShiftInput, ShiftUpdate};
use crate::database::repositories::kv::{KvStore, SHIFTS_KEY};
use crate::services::week;

#[derive(Clone)]
pub struct ShiftRepository {
    store: KvStore,
}

impl ShiftRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// All shifts in stored order (most recently created first).
    pub async fn get_shifts(&self) -> Result<Vec<Shift>> {
        Ok(self
            .store
            .get_json::<Vec<Shift>>(SHIFTS_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Shift>> {
        let shifts = self.get_shifts().await?;
        Ok(shifts.into_iter().find(|s| s.id == id))
    }

    pub async fn save_shift(&self, input: ShiftInput) -> Result<Shift> {
        let mut shifts = self.get_shifts().await?;
        let shift = Shift::from_input(input, Utc::now());

        shifts.insert(0, shift.clone());
        self.store.set_json(SHIFTS_KEY, &shifts).await?;

        log::debug!("Saved shift {} for {}", shift.id, shift.date);
        Ok(shift)
    }

    pub async fn update_shift(&self, id: &str, update: ShiftUpdate) -> Result<Option<Shift>> {
        let mut shifts = self.get_shifts().await?;
        let Some(shift) = shifts.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        shift.apply(update, Utc::now());
        let updated = shift.clone();
        self.store.set_json(SHIFTS_KEY, &shifts).await?;

        Ok(Some(updated))
    }

    /// Returns false when no shift had the given id.
    pub async fn delete_shift(&self, id: &str) -> Result<bool> {
        let mut shifts = self.get_shifts().await?;
        let before = shifts.len();
        shifts.retain(|s| s.id != id);

        if shifts.len() == before {
            return Ok(false);
        }

        self.store.set_json(SHIFTS_KEY, &shifts).await?;
        Ok(true)
    }

    /// Shifts whose date falls within `start..=end`.
    pub async fn get_shifts_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Shift>> {
        if end < start {
            return Err(anyhow!("date range end {} is before start {}", end, start));
        }

        let shifts = self.get_shifts().await?;
        Ok(shifts
            .into_iter()
            .filter(|s| s.date >= start && s.date <= end)
            .collect())
    }

    pub async fn get_shifts_for_week(
        &self,
        reference: NaiveDate,
        week_starts_on: Weekday,
    ) -> Result<Vec<Shift>> {
        let range = week::week_bounds(reference, week_starts_on)
            .ok_or_else(|| anyhow!("no week around {} fits the calendar", reference))?;
        self.get_shifts_by_date_range(range.start, range.end).await
    }
}
