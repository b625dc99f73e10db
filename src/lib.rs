pub mod graph;
pub mod cust_error;
pub mod sat_vc;
pub mod approx_vc;
pub mod supervisor;
pub mod calc_stats;
pub mod command;
