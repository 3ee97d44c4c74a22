//! Proportional tip-out splitting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{Recipient, TemplateInput, TipOutTemplate};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub role: String,
    pub percentage: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    /// Same order as the input recipients.
    pub allocations: Vec<Allocation>,
    pub total_allocated: f64,
    /// What the earner keeps; negative when percentages exceed 100.
    pub remaining: f64,
    pub percentage_given: f64,
    pub over_allocated: bool,
}

pub fn split_tip_out(total_tips: f64, recipients: &[Recipient]) -> SplitResult {
    let allocations: Vec<Allocation> = recipients
        .iter()
        .map(|r| Allocation {
            role: r.role.clone(),
            percentage: r.percentage,
            amount: total_tips * (r.percentage / 100.0),
        })
        .collect();

    let total_allocated: f64 = allocations.iter().map(|a| a.amount).sum();
    let remaining = total_tips - total_allocated;
    let percentage_given = if total_tips == 0.0 {
        0.0
    } else {
        (total_allocated / total_tips) * 100.0
    };

    SplitResult {
        allocations,
        total_allocated,
        remaining,
        percentage_given,
        over_allocated: remaining < 0.0,
    }
}

pub fn calculate_tip_out(total_tips: f64, template: &TipOutTemplate) -> SplitResult {
    split_tip_out(total_tips, &template.recipients)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientLine {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub amount: f64,
}

impl RecipientLine {
    fn new(role: impl Into<String>, percentage: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: role.into(),
            percentage,
            amount: 0.0,
        }
    }
}

/// Live state of the tip-out calculator. Amounts are only current after
/// [`TipOutCalculator::recompute`]; callers recompute whenever an input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipOutCalculator {
    #[serde(default)]
    pub total_tips: f64,
    pub recipients: Vec<RecipientLine>,
}

impl Default for TipOutCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TipOutCalculator {
    pub fn new() -> Self {
        Self {
            total_tips: 0.0,
            recipients: vec![
                RecipientLine::new("Busser", 15.0),
                RecipientLine::new("Bartender", 5.0),
                RecipientLine::new("Host", 3.0),
            ],
        }
    }

    pub fn from_template(template: &TipOutTemplate) -> Self {
        let mut calculator = Self::new();
        calculator.load_template(template);
        calculator
    }

    pub fn add_recipient(&mut self, role: impl Into<String>, percentage: f64) -> &RecipientLine {
        self.recipients.push(RecipientLine::new(role, percentage));
        &self.recipients[self.recipients.len() - 1]
    }

    /// The calculator always keeps at least one recipient.
    pub fn remove_recipient(&mut self, id: &str) -> Result<RecipientLine, AppError> {
        let index = self
            .recipients
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Recipient {} not found", id)))?;

        if self.recipients.len() <= 1 {
            return Err(AppError::BadRequest(
                "You need at least one recipient".to_string(),
            ));
        }

        Ok(self.recipients.remove(index))
    }

    pub fn update_recipient(
        &mut self,
        id: &str,
        role: Option<String>,
        percentage: Option<f64>,
    ) -> Result<(), AppError> {
        let line = self
            .recipients
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Recipient {} not found", id)))?;

        if let Some(role) = role {
            line.role = role;
        }
        if let Some(percentage) = percentage {
            line.percentage = percentage;
        }
        Ok(())
    }

    /// Replaces the recipient list with the template's; amounts reset to zero.
    pub fn load_template(&mut self, template: &TipOutTemplate) {
        self.recipients = template
            .recipients
            .iter()
            .map(|r| RecipientLine::new(r.role.clone(), r.percentage))
            .collect();
    }

    pub fn total_percentage(&self) -> f64 {
        self.recipients.iter().map(|r| r.percentage).sum()
    }

    pub fn recompute(&mut self) -> SplitResult {
        let recipients: Vec<Recipient> = self
            .recipients
            .iter()
            .map(|r| Recipient::new(r.role.clone(), r.percentage))
            .collect();
        let result = split_tip_out(self.total_tips, &recipients);

        for (line, allocation) in self.recipients.iter_mut().zip(&result.allocations) {
            line.amount = allocation.amount;
        }
        result
    }

    pub fn to_template(&self, name: impl Into<String>) -> TemplateInput {
        TemplateInput {
            name: name.into(),
            recipients: self
                .recipients
                .iter()
                .map(|r| Recipient::new(r.role.clone(), r.percentage))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Vec<Recipient> {
        vec![
            Recipient::new("Busser", 15.0),
            Recipient::new("Bartender", 10.0),
            Recipient::new("Host", 5.0),
        ]
    }

    #[test]
    fn splits_by_percentage() {
        let result = split_tip_out(200.0, &standard());

        let amounts: Vec<f64> = result.allocations.iter().map(|a| a.amount).collect();
        assert_eq!(amounts, vec![30.0, 20.0, 10.0]);
        assert_eq!(result.total_allocated, 60.0);
        assert_eq!(result.remaining, 140.0);
        assert_eq!(result.percentage_given, 30.0);
        assert!(!result.over_allocated);
    }

    #[test]
    fn preserves_recipient_order() {
        let recipients = vec![
            Recipient::new("Host", 5.0),
            Recipient::new("Busser", 15.0),
        ];
        let result = split_tip_out(100.0, &recipients);
        assert_eq!(result.allocations[0].role, "Host");
        assert_eq!(result.allocations[1].role, "Busser");
    }

    #[test]
    fn zero_total_gives_zero_percentage() {
        let result = split_tip_out(0.0, &standard());
        assert_eq!(result.percentage_given, 0.0);
        assert_eq!(result.remaining, 0.0);

        let empty = split_tip_out(0.0, &[]);
        assert_eq!(empty.percentage_given, 0.0);
        assert!(empty.allocations.is_empty());
    }

    #[test]
    fn over_allocation_is_reported_not_rejected() {
        let recipients = vec![Recipient::new("Busser", 70.0), Recipient::new("Bar", 50.0)];
        let result = split_tip_out(100.0, &recipients);
        assert_eq!(result.remaining, -20.0);
        assert_eq!(result.percentage_given, 120.0);
        assert!(result.over_allocated);
    }

    #[test]
    fn template_split_matches_direct_split() {
        let preset = &TipOutTemplate::builtin_presets()[0];
        assert_eq!(calculate_tip_out(200.0, preset), split_tip_out(200.0, &standard()));
    }

    #[test]
    fn calculator_keeps_last_recipient() {
        let mut calculator = TipOutCalculator::new();
        let ids: Vec<String> = calculator.recipients.iter().map(|r| r.id.clone()).collect();

        calculator.remove_recipient(&ids[0]).unwrap();
        calculator.remove_recipient(&ids[1]).unwrap();
        let err = calculator.remove_recipient(&ids[2]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(calculator.recipients.len(), 1);
    }

    #[test]
    fn calculator_recomputes_after_edits() {
        let mut calculator = TipOutCalculator::new();
        calculator.total_tips = 100.0;
        let id = calculator.recipients[1].id.clone();
        calculator
            .update_recipient(&id, Some("Barback".to_string()), Some(10.0))
            .unwrap();
        calculator.add_recipient("Runner", 2.0);

        let result = calculator.recompute();
        assert_eq!(calculator.total_percentage(), 30.0);
        assert_eq!(result.total_allocated, 30.0);
        assert_eq!(calculator.recipients[1].role, "Barback");
        assert_eq!(calculator.recipients[1].amount, 10.0);
        assert_eq!(calculator.recipients[3].amount, 2.0);
    }

    #[test]
    fn loading_template_resets_amounts() {
        let mut calculator = TipOutCalculator::new();
        calculator.total_tips = 100.0;
        calculator.recompute();

        let preset = &TipOutTemplate::builtin_presets()[1];
        calculator.load_template(preset);

        assert_eq!(calculator.recipients.len(), 4);
        assert!(calculator.recipients.iter().all(|r| r.amount == 0.0));
        assert_eq!(calculator.recipients[2].role, "Food Runner");
        assert_eq!(calculator.total_percentage(), 50.0);

        let saved = calculator.to_template("Copy");
        assert_eq!(saved.recipients, preset.recipients);
    }
}
