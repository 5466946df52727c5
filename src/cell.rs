use crate::location::Location;

/// One grid element.
///
/// `neighbors` index into the owning [`Grid`](crate::Grid)'s cell array and are fixed at build time.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Cell {
    pub(crate) value: u32,
    pub(crate) neighbors: Vec<Location>,
    // set while a cascade is in progress; always false between ticks
    pub(crate) triggered: bool,
}

