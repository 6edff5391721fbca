pub mod fee_detector;
pub mod finding_builder;
pub mod known_set;
pub mod monitor;
pub mod registry;
pub mod risk_evaluator;
pub mod state_fetcher;

#[cfg(test)]
pub(crate) mod test_support;
