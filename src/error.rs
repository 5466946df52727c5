use thiserror::Error;

/// Reasons raw input could not be turned into a grid or graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    /// No rows were supplied to a grid builder. An empty row is reported as [`Self::EmptyRow`] instead.
    #[error("grid has no rows")]
    NoRows,
    /// A row pushed to a grid builder has no cells at all.
    #[error("row {row} is empty")]
    EmptyRow {
        /// Index of the empty row.
        row: usize,
    },
    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of this row.
        found: usize,
    },
    /// A grid cell is not a single decimal digit.
    #[error("cell at row {row}, column {col} is {found:?}, not a digit")]
    NotADigit {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
        /// The character found there.
        found: char,
    },
    /// An edge line is not of the form `name1-name2`.
    #[error("edge {line:?} is not of the form name1-name2")]
    BadEdge {
        /// The line as given.
        line: String,
    },
    /// The raw text block splits into the wrong number of blank-line separated sections.
    #[error("expected {expected} section(s) of input, found {found}")]
    SectionCount {
        /// Sections the caller needs.
        expected: usize,
        /// Sections actually present.
        found: usize,
    },
}

/// Everything that can go wrong while building a structure or traversing it.
///
/// An unreachable terminal is not an error: it is reported as zero paths or as no cost.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input could not be parsed.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),
    /// A cave graph lacks its `start` or `end` node.
    #[error("no node named {0:?}")]
    MissingTerminal(&'static str),
    /// The automaton did not synchronize within the tick ceiling.
    #[error("no synchronized tick within {ticks} ticks")]
    NoSynchronization {
        /// The tick ceiling that was reached.
        ticks: usize,
    },
    /// Path enumeration expanded more frames than the enumeration ceiling allows.
    #[error("path enumeration exceeded {limit} expanded frames")]
    IterationLimitExceeded {
        /// The enumeration ceiling that was exceeded.
        limit: usize,
    },
}
