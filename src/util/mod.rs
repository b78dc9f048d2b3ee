pub mod parallel;
pub mod weak_dashmap;
