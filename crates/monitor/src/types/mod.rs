pub mod alert;
pub mod finding;
pub mod strategy;
pub mod trace;
pub mod wad;

pub use alert::AlertEvent;
pub use finding::{Finding, FindingSeverity, FindingType};
pub use strategy::{CollateralType, KnownStrategy, StrategyState};
pub use trace::CallTrace;
pub use wad::Wad;
