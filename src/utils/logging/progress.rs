//! Progress reporting for pipeline stages
//!
//! Uses the indicatif crate. Bars are hidden when disabled or when stderr is not
//! a terminal, so batch runs and tests produce no progress output.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Default style for the stage progress bar
pub const DEFAULT_STAGE_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Create a progress bar over pipeline stages
///
/// # Arguments
/// * `length` - Number of stages that will run
/// * `enabled` - Whether the bar should be drawn at all
///
/// # Returns
/// A configured `ProgressBar`
#[must_use]
pub fn create_stage_progress_bar(length: u64, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::with_draw_target(Some(length), ProgressDrawTarget::hidden());
    }

    let pb = ProgressBar::new(length);
    match ProgressStyle::default_bar().template(DEFAULT_STAGE_TEMPLATE) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => log::debug!("Falling back to default progress style: {e}"),
    }
    pb
}

/// Finish a progress bar with a completion message
///
/// # Arguments
/// * `pb` - The `ProgressBar` to finish
/// * `message` - Optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
