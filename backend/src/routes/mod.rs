pub mod chart;
pub mod controls;
pub mod occupancy;
