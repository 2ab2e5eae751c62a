pub mod download;
pub mod plan_ranges;

pub use download::download;
pub use plan_ranges::plan_ranges;
