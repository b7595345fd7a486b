// contestlog library
// Contest scoring core plus the file formats and storage around it.

pub mod adif;
pub mod cabrillo;
pub mod config;
pub mod contact;
pub mod contest;
pub mod db;
pub mod dupe;
pub mod engine;
pub mod error;
pub mod output;
pub mod recalc;
pub mod reference;
pub mod session;
pub mod store;
pub mod time_utils;
