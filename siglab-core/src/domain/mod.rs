//! Domain types shared across the engine.

pub mod bar;
pub mod equity;
pub mod portfolio;
pub mod trade;

pub use bar::{Bar, Signal};
pub use equity::EquityPoint;
pub use portfolio::{EntryLot, ExitFill, PortfolioState};
pub use trade::Trade;
