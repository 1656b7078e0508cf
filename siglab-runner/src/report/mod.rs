//! Visualization builder and artifact export.

pub mod artifacts;
pub mod charts;

pub use artifacts::{ArtifactManager, ArtifactPaths};
pub use charts::{build_charts, ChartData, EquityOverlayPoint, MarkerSide, PnlPoint, TradeMarker};
