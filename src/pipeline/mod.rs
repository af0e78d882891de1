//! Pipeline module - end-to-end rectification run

pub mod rectify;

pub use rectify::{rectify_pileup, run_rectify, Rectified};
