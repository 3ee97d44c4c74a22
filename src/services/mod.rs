pub mod calculation;
pub mod format;
pub mod tip_out;
pub mod week;

pub use calculation::{
    calculate_paycheck_preview, calculate_shift_earnings, calculate_taxes, calculate_trends,
    calculate_weekly_summary,
};
pub use tip_out::{TipOutCalculator, calculate_tip_out, split_tip_out};
