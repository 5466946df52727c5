//! Splitting raw puzzle text into sections and lines.

use itertools::Itertools;

use crate::error::MalformedInput;

/// Split a raw text block into its blank-line separated sections, each a list of trimmed, non-empty lines.
pub fn sections(raw: &str) -> Vec<Vec<&str>> {
    let chunks = raw.lines()
        .map(str::trim)
        .chunk_by(|line| line.is_empty());

    let sections = chunks.into_iter()
        .filter_map(|(blank, group)| (!blank).then(|| group.collect_vec()))
        .collect_vec();
    sections
}

/// The lines of `raw`, which must consist of exactly `expected` sections.
pub fn expect_sections(raw: &str, expected: usize) -> Result<Vec<Vec<&str>>, MalformedInput> {
    let found = sections(raw);
    if found.len() != expected {
        return Err(MalformedInput::SectionCount { expected, found: found.len() });
    }

    Ok(found)
}

/// The trimmed, non-empty lines of `raw`, which must be a single section.
pub fn lines(raw: &str) -> Result<Vec<&str>, MalformedInput> {
    Ok(expect_sections(raw, 1)?.into_iter().flatten().collect_vec())
}
