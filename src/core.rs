mod arrangement;
mod engine;
mod month;
mod window;

pub use self::{
    arrangement::{Arrangement, ArrangementTotals, MonthlyOptimum, evaluate_all, monthly_optima},
    engine::{Engine, OptimalTilt, SiteConfig},
    month::Month,
    window::{WindowOptimum, analyze_sliding_window},
};
