pub mod provider;
pub mod savings;

pub use provider::{calculate_provider_costs, FxCosts, ProviderCosts};
pub use savings::{aggregate, CategorySavings, CostComparison, IncentiveComparison, SavingsResult};
