//! Utility modules
//!
//! - `arrow`: typed column extraction from record batches
//! - `io`: table file reading and survey-year file discovery
//! - `logging`: consistent log lines and progress bars

pub mod arrow;
pub mod io;
pub mod logging;

pub use io::{find_table_files, read_table};
pub use logging::{log_stage_complete, log_stage_start, log_warning, log_year_skipped};
