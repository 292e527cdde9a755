//! Logging utilities for stage output and progress tracking

pub mod log;
pub mod progress;

pub use self::log::{
    log_stage_complete, log_stage_reused, log_stage_start, log_table_read, log_warning,
    log_year_skipped,
};
pub use self::progress::{create_stage_progress_bar, finish_progress_bar};
