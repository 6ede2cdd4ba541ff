//! CSV export of training statistics
//!
//! Plotting and analysis happen outside this crate; the CSV layout here is
//! the handoff format. One row per episode, indexed from zero.

use std::path::Path;

use crate::{Result, stats::EpisodeStats};

/// Writes per-episode statistics as `episode,length,reward` rows.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_episode_stats_csv<P: AsRef<Path>>(stats: &EpisodeStats, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["episode", "length", "reward"])?;
    for (episode, (length, reward)) in stats.lengths.iter().zip(&stats.rewards).enumerate() {
        writer.write_record([
            episode.to_string(),
            length.to_string(),
            reward.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
