//! Earnings, tax and paycheck arithmetic over shift records.
//!
//! Every function here is a pure transform of its inputs. Divisions whose
//! denominator is zero yield 0 instead of NaN or infinity, so callers never
//! have to handle a failure.

use serde::{Deserialize, Serialize};

use crate::database::models::{Settings, Shift};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftEarnings {
    pub total_tips: f64,
    pub net_tips: f64,
    pub hourly_earnings: f64,
    pub gross_earnings: f64,
    pub effective_hourly_rate: f64,
    pub tip_out_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub federal_tax: f64,
    pub state_tax: f64,
    pub fica_tax: f64,
    pub total_tax: f64,
    pub net_earnings: f64,
    pub effective_tax_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaycheckSummary {
    pub total_shifts: usize,
    pub total_hours: f64,
    pub total_cash_tips: f64,
    pub total_credit_tips: f64,
    pub total_tip_out: f64,
    pub total_tips: f64,
    pub net_tips: f64,
    pub hourly_earnings: f64,
    pub gross_earnings: f64,
}

/// Take-home split between tips kept in hand and what arrives through payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeHomeBreakdown {
    pub cash_take_home: f64,
    pub paycheck_gross: f64,
    pub paycheck_taxes: f64,
    pub paycheck_net: f64,
    pub total_take_home: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAverages {
    pub tips_per_shift: f64,
    pub hours_per_shift: f64,
    pub effective_hourly_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaycheckPreview {
    pub summary: PaycheckSummary,
    pub taxes: TaxBreakdown,
    pub breakdown: TakeHomeBreakdown,
    pub averages: ShiftAverages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBreakdown {
    pub day: String,
    pub shifts: Vec<Shift>,
    /// Sum of each shift's net tips (tip-out already subtracted).
    pub total_tips: f64,
    pub total_hours: f64,
    pub avg_tips: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    #[serde(flatten)]
    pub preview: PaycheckPreview,
    /// Day buckets in the order their first shift was encountered.
    pub by_day: Vec<DayBreakdown>,
    pub best_day: Option<DayBreakdown>,
    pub worst_day: Option<DayBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendChanges {
    pub net_tips: f64,
    pub total_hours: f64,
    pub effective_hourly_rate: f64,
    pub gross_earnings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub current: PaycheckPreview,
    pub previous: PaycheckPreview,
    pub changes: TrendChanges,
}

/// `numerator / denominator`, or 0 when the denominator is zero.
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn calculate_shift_earnings(shift: &Shift, settings: &Settings) -> ShiftEarnings {
    let total_tips = shift.total_tips();
    let net_tips = total_tips - shift.tip_out;
    let hourly_earnings = shift.hours_worked * settings.hourly_wage;
    let gross_earnings = net_tips + hourly_earnings;
    let effective_hourly_rate = if shift.hours_worked > 0.0 {
        gross_earnings / shift.hours_worked
    } else {
        0.0
    };

    ShiftEarnings {
        total_tips,
        net_tips,
        hourly_earnings,
        gross_earnings,
        effective_hourly_rate,
        tip_out_amount: shift.tip_out,
    }
}

/// Flat-rate taxes on `gross_earnings`. Negative input is computed through,
/// producing negative taxes.
pub fn calculate_taxes(gross_earnings: f64, settings: &Settings) -> TaxBreakdown {
    let federal_tax = gross_earnings * (settings.federal_tax_rate / 100.0);
    let state_tax = gross_earnings * (settings.state_tax_rate / 100.0);
    let fica_tax = gross_earnings * (settings.fica_rate / 100.0);
    let total_tax = federal_tax + state_tax + fica_tax;
    let net_earnings = gross_earnings - total_tax;
    let effective_tax_rate = if gross_earnings > 0.0 {
        (total_tax / gross_earnings) * 100.0
    } else {
        0.0
    };

    TaxBreakdown {
        federal_tax,
        state_tax,
        fica_tax,
        total_tax,
        net_earnings,
        effective_tax_rate,
    }
}

pub fn calculate_paycheck_preview(shifts: &[Shift], settings: &Settings) -> PaycheckPreview {
    let mut total_hours = 0.0;
    let mut total_cash_tips = 0.0;
    let mut total_credit_tips = 0.0;
    let mut total_tip_out = 0.0;

    for shift in shifts {
        total_hours += shift.hours_worked;
        total_cash_tips += shift.cash_tips;
        total_credit_tips += shift.credit_tips;
        total_tip_out += shift.tip_out;
    }

    let total_tips = total_cash_tips + total_credit_tips;
    let net_tips = total_tips - total_tip_out;
    let hourly_earnings = total_hours * settings.hourly_wage;
    let gross_earnings = net_tips + hourly_earnings;

    let taxes = calculate_taxes(gross_earnings, settings);

    // Tip-out is charged against each channel in proportion to its share of tips
    let cash_weight = ratio_or_zero(total_cash_tips, total_tips);
    let credit_weight = ratio_or_zero(total_credit_tips, total_tips);

    let cash_take_home = total_cash_tips - total_tip_out * cash_weight;
    let paycheck_gross = total_credit_tips - total_tip_out * credit_weight + hourly_earnings;
    let paycheck_taxes = calculate_taxes(paycheck_gross, settings).total_tax;
    let paycheck_net = paycheck_gross - paycheck_taxes;

    let shift_count = shifts.len() as f64;

    PaycheckPreview {
        summary: PaycheckSummary {
            total_shifts: shifts.len(),
            total_hours,
            total_cash_tips,
            total_credit_tips,
            total_tip_out,
            total_tips,
            net_tips,
            hourly_earnings,
            gross_earnings,
        },
        taxes,
        breakdown: TakeHomeBreakdown {
            cash_take_home,
            paycheck_gross,
            paycheck_taxes,
            paycheck_net,
            total_take_home: cash_take_home + paycheck_net,
        },
        averages: ShiftAverages {
            tips_per_shift: ratio_or_zero(net_tips, shift_count),
            hours_per_shift: ratio_or_zero(total_hours, shift_count),
            effective_hourly_rate: ratio_or_zero(gross_earnings, total_hours),
        },
    }
}

pub fn day_name(shift: &Shift) -> &'static str {
    use chrono::Datelike;
    DAY_NAMES[shift.date.weekday().num_days_from_sunday() as usize]
}

/// Paycheck preview plus a per-weekday breakdown.
///
/// Days are ranked by average net tips with a stable descending sort over
/// first-encountered order: `best_day` is the earliest-encountered day among
/// the highest averages, `worst_day` the latest-encountered among the lowest.
pub fn calculate_weekly_summary(shifts: &[Shift], settings: &Settings) -> WeeklySummary {
    let preview = calculate_paycheck_preview(shifts, settings);

    let mut by_day: Vec<DayBreakdown> = Vec::new();
    for shift in shifts {
        let day = day_name(shift);
        let net_tips = calculate_shift_earnings(shift, settings).net_tips;

        let index = match by_day.iter().position(|d| d.day == day) {
            Some(index) => index,
            None => {
                by_day.push(DayBreakdown {
                    day: day.to_string(),
                    shifts: Vec::new(),
                    total_tips: 0.0,
                    total_hours: 0.0,
                    avg_tips: 0.0,
                });
                by_day.len() - 1
            }
        };

        let bucket = &mut by_day[index];
        bucket.shifts.push(shift.clone());
        bucket.total_tips += net_tips;
        bucket.total_hours += shift.hours_worked;
    }

    for bucket in &mut by_day {
        bucket.avg_tips = ratio_or_zero(bucket.total_tips, bucket.shifts.len() as f64);
    }

    let mut ranked: Vec<&DayBreakdown> = by_day.iter().collect();
    ranked.sort_by(|a, b| b.avg_tips.total_cmp(&a.avg_tips));

    let best_day = ranked.first().map(|d| (*d).clone());
    let worst_day = ranked.last().map(|d| (*d).clone());

    WeeklySummary {
        preview,
        by_day,
        best_day,
        worst_day,
    }
}

/// Percentage change from `previous` to `current`. A zero baseline reports
/// 100 when something appeared and 0 otherwise.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 { 100.0 } else { 0.0 }
    } else {
        ((current - previous) / previous) * 100.0
    }
}

pub fn calculate_trends(
    current_shifts: &[Shift],
    previous_shifts: &[Shift],
    settings: &Settings,
) -> Trends {
    let current = calculate_paycheck_preview(current_shifts, settings);
    let previous = calculate_paycheck_preview(previous_shifts, settings);

    let changes = TrendChanges {
        net_tips: percentage_change(current.summary.net_tips, previous.summary.net_tips),
        total_hours: percentage_change(current.summary.total_hours, previous.summary.total_hours),
        effective_hourly_rate: percentage_change(
            current.averages.effective_hourly_rate,
            previous.averages.effective_hourly_rate,
        ),
        gross_earnings: percentage_change(
            current.summary.gross_earnings,
            previous.summary.gross_earnings,
        ),
    };

    Trends {
        current,
        previous,
        changes,
    }
}
