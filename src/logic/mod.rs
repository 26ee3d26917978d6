pub mod climate;
pub mod coefficients;
pub mod cost_estimator;
pub mod crops;
pub mod fertilizer;
pub mod price;
pub mod yield_estimator;

pub use coefficients::{CoefficientStore, SimulationCoefficientSet};
pub use price::PriceOracle;
pub use yield_estimator::YieldEstimator;
