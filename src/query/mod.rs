pub mod executor;
pub mod join;
pub mod matcher;
pub mod pattern;
pub mod planner;
pub mod scan;

pub use executor::{BitGrep, BitMatch, GrepOptions};
pub use pattern::BitPattern;
pub use scan::suffix_scan;
// Re-exports for public API
#[allow(unused_imports)]
pub use join::IndexArray;
#[allow(unused_imports)]
pub use matcher::{BitPatternMatcher, MatchResult};
#[allow(unused_imports)]
pub use planner::AlignmentPlan;
