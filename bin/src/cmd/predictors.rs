//! Predictor listing command implementation.

use tactical_signals::available_predictors;

use super::print_banner;

/// List the registered baseline predictors.
pub(crate) fn list_predictors() {
    print_banner("Available Predictors");

    println!("{:<18} {:<8} {:<8} Description", "Name", "Lagged", "Train");
    println!("{}", "-".repeat(80));
    for info in available_predictors() {
        println!(
            "{:<18} {:<8} {:<8} {}",
            info.name,
            if info.uses_lagged_returns { "yes" } else { "no" },
            if info.uses_training_data { "yes" } else { "no" },
            info.description
        );
    }
    println!();
    println!("Weights are clipped to [0, 2]: 0 is all cash, 1 tracks the market, 2 is fully levered.\n");
}
