//! Two-column `path,size` text input.

use bundleburst_core::RawRecord;
use tracing::trace;

/// Parse `path,size` lines into records.
///
/// Lines split at the last comma so paths may contain commas. Blank lines are
/// skipped. A line without a comma becomes a record with an empty size, which
/// the tree builder reports as invalid. Header rows are passed through the
/// same way.
pub fn parse_rows(input: &str) -> Vec<RawRecord> {
    input
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.rsplit_once(',') {
            Some((path, size)) => RawRecord::new(path.trim(), size.trim()),
            None => {
                trace!(line, "row without size column");
                RawRecord::new(line.trim(), "")
            }
        })
        .collect()
}
