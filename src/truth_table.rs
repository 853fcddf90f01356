//! Reference truth tables and the row highlighter shared by every simulator.

use std::collections::HashMap;
use std::time::Duration;

use crate::component::FlipFlopKind;

pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(1000);

/// One reference row. `key` is the concatenated input bits, e.g. `"01"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthRow {
    pub key: &'static str,
    pub cells: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTable {
    pub headers: &'static [&'static str],
    pub rows: &'static [TruthRow],
}

impl TruthTable {
    pub fn for_kind(kind: FlipFlopKind) -> &'static TruthTable {
        match kind {
            FlipFlopKind::Sr => &SR_TABLE,
            FlipFlopKind::Jk => &JK_TABLE,
            FlipFlopKind::D => &D_TABLE,
            FlipFlopKind::T => &T_TABLE,
        }
    }

    pub fn row_index(&self, key: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }
}

static SR_TABLE: TruthTable = TruthTable {
    headers: &["S", "R", "Q", "~Q", "State"],
    rows: &[
        TruthRow {
            key: "00",
            cells: &["0", "0", "Q", "~Q", "Hold"],
        },
        TruthRow {
            key: "01",
            cells: &["0", "1", "0", "1", "Reset"],
        },
        TruthRow {
            key: "10",
            cells: &["1", "0", "1", "0", "Set"],
        },
        TruthRow {
            key: "11",
            cells: &["1", "1", "0", "0", "Invalid"],
        },
    ],
};

static JK_TABLE: TruthTable = TruthTable {
    headers: &["J", "K", "Q(next)", "Action"],
    rows: &[
        TruthRow {
            key: "00",
            cells: &["0", "0", "Q", "Hold"],
        },
        TruthRow {
            key: "01",
            cells: &["0", "1", "0", "Reset"],
        },
        TruthRow {
            key: "10",
            cells: &["1", "0", "1", "Set"],
        },
        TruthRow {
            key: "11",
            cells: &["1", "1", "~Q", "Toggle"],
        },
    ],
};

static D_TABLE: TruthTable = TruthTable {
    headers: &["D", "Q(next)", "~Q(next)"],
    rows: &[
        TruthRow {
            key: "0",
            cells: &["0", "0", "1"],
        },
        TruthRow {
            key: "1",
            cells: &["1", "1", "0"],
        },
    ],
};

static T_TABLE: TruthTable = TruthTable {
    headers: &["T", "Q(next)", "Action"],
    rows: &[
        TruthRow {
            key: "0",
            cells: &["0", "Q", "Hold"],
        },
        TruthRow {
            key: "1",
            cells: &["1", "~Q", "Toggle"],
        },
    ],
};

/// Tracks which rows of one table are lit.
///
/// A flash keeps its row lit for the configured interval, counted from the
/// most recent flash of that row. Hovering lights a row independently.
#[derive(Debug, Clone)]
pub struct RowHighlighter {
    table: &'static TruthTable,
    interval: Duration,
    flashes: HashMap<usize, Duration>,
    hovered: Option<usize>,
}

impl RowHighlighter {
    pub fn new(kind: FlipFlopKind, interval: Duration) -> Self {
        Self {
            table: TruthTable::for_kind(kind),
            interval,
            flashes: HashMap::new(),
            hovered: None,
        }
    }

    pub fn table(&self) -> &'static TruthTable {
        self.table
    }

    /// Lights the row matching `key`. Returns the row index, if any matched.
    pub fn flash(&mut self, key: &str) -> Option<usize> {
        let index = self.table.row_index(key)?;
        self.flashes.insert(index, self.interval);
        Some(index)
    }

    pub fn hover(&mut self, row: Option<usize>) {
        self.hovered = row.filter(|&index| index < self.table.rows.len());
    }

    pub fn tick(&mut self, dt: Duration) {
        self.flashes.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(dt);
            !remaining.is_zero()
        });
    }

    pub fn is_flashing(&self, row: usize) -> bool {
        self.flashes.contains_key(&row)
    }

    pub fn is_highlighted(&self, row: usize) -> bool {
        self.is_flashing(row) || self.hovered == Some(row)
    }

    pub fn any_flashing(&self) -> bool {
        !self.flashes.is_empty()
    }
}
