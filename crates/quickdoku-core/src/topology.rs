//! Static geometry of the 9×9 grid.
//!
//! Everything here depends only on the fixed board dimensions, never on a
//! particular puzzle, so it is computed once when the solver is constructed
//! and treated as read-only from then on.

/// Number of cells on the board.
pub const CELL_COUNT: usize = 81;

/// Number of constraint groups: 9 rows + 9 columns + 9 boxes.
pub const GROUP_COUNT: usize = 27;

/// Number of cells in each group.
pub const GROUP_SIZE: usize = 9;

/// Number of cells that share a row, column, or box with a given cell:
/// 8 box-mates + 6 remaining column cells + 6 remaining row cells.
pub const CONFLICTS_PER_CELL: usize = 20;

/// Precomputed grid geometry: group membership and per-cell conflict sets.
///
/// Groups are enumerated rows first (0–8), then columns (9–17), then the
/// nine 3×3 boxes in row-major box order (18–26).
#[derive(Debug, Clone)]
pub struct Topology {
    groups: [[usize; GROUP_SIZE]; GROUP_COUNT],
    conflicts: [[usize; CONFLICTS_PER_CELL]; CELL_COUNT],
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    /// Build the group and conflict tables.
    pub fn new() -> Self {
        Self {
            groups: build_groups(),
            conflicts: build_conflict_sets(),
        }
    }

    /// All 27 groups, each a set of 9 cell indices.
    pub fn groups(&self) -> &[[usize; GROUP_SIZE]; GROUP_COUNT] {
        &self.groups
    }

    /// The 20 cells that must hold a different digit than `cell`.
    pub fn conflicts(&self, cell: usize) -> &[usize; CONFLICTS_PER_CELL] {
        &self.conflicts[cell]
    }
}

fn build_groups() -> [[usize; GROUP_SIZE]; GROUP_COUNT] {
    let mut groups = [[0usize; GROUP_SIZE]; GROUP_COUNT];
    let mut group = 0;

    // Rows.
    for row in 0..9 {
        for col in 0..9 {
            groups[group][col] = row * 9 + col;
        }
        group += 1;
    }

    // Columns.
    for col in 0..9 {
        for row in 0..9 {
            groups[group][row] = row * 9 + col;
        }
        group += 1;
    }

    // 3×3 boxes, row-major box order, row-major cells within each box.
    for box_row in 0..3 {
        for box_col in 0..3 {
            let mut idx = 0;
            for row in 3 * box_row..3 * box_row + 3 {
                for col in 3 * box_col..3 * box_col + 3 {
                    groups[group][idx] = row * 9 + col;
                    idx += 1;
                }
            }
            group += 1;
        }
    }

    groups
}

fn build_conflict_sets() -> [[usize; CONFLICTS_PER_CELL]; CELL_COUNT] {
    let mut conflicts = [[0usize; CONFLICTS_PER_CELL]; CELL_COUNT];

    for row in 0..9 {
        for col in 0..9 {
            let cell = row * 9 + col;
            let box_row = 3 * (row / 3);
            let box_col = 3 * (col / 3);
            let mut idx = 0;

            // The other 8 cells of this cell's 3×3 box.
            for r in box_row..box_row + 3 {
                for c in box_col..box_col + 3 {
                    if r != row || c != col {
                        conflicts[cell][idx] = r * 9 + c;
                        idx += 1;
                    }
                }
            }

            // The rest of the column, skipping the rows already covered by
            // the box.
            for r in 0..9 {
                if r < box_row || r >= box_row + 3 {
                    conflicts[cell][idx] = r * 9 + col;
                    idx += 1;
                }
            }

            // The rest of the row, skipping the columns already covered by
            // the box.
            for c in 0..9 {
                if c < box_col || c >= box_col + 3 {
                    conflicts[cell][idx] = row * 9 + c;
                    idx += 1;
                }
            }

            debug_assert_eq!(idx, CONFLICTS_PER_CELL);
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_enumeration_order() {
        let topo = Topology::new();
        let groups = topo.groups();

        // Group 0 is the top row, group 8 the bottom row.
        assert_eq!(groups[0], [0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(groups[8], [72, 73, 74, 75, 76, 77, 78, 79, 80]);

        // Group 9 is the left column.
        assert_eq!(groups[9], [0, 9, 18, 27, 36, 45, 54, 63, 72]);

        // Group 18 is the top-left box, group 26 the bottom-right box.
        assert_eq!(groups[18], [0, 1, 2, 9, 10, 11, 18, 19, 20]);
        assert_eq!(groups[26], [60, 61, 62, 69, 70, 71, 78, 79, 80]);
    }

    #[test]
    fn test_every_cell_in_exactly_three_groups() {
        let topo = Topology::new();
        let mut membership = [0usize; CELL_COUNT];
        for group in topo.groups() {
            for &cell in group {
                membership[cell] += 1;
            }
        }
        assert!(membership.iter().all(|&count| count == 3));
    }

    #[test]
    fn test_conflict_set_ordering_for_corner_cell() {
        let topo = Topology::new();
        // Cell 0 (top-left): box-mates first, then rest of column 0, then
        // rest of row 0.
        assert_eq!(
            topo.conflicts(0),
            &[1, 2, 9, 10, 11, 18, 19, 20, 27, 36, 45, 54, 63, 72, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_conflict_sets_are_exact() {
        let topo = Topology::new();
        for cell in 0..CELL_COUNT {
            let (row, col) = (cell / 9, cell % 9);
            let conflicts = topo.conflicts(cell);

            // No duplicates, never the cell itself.
            let mut seen = [false; CELL_COUNT];
            for &other in conflicts {
                assert_ne!(other, cell);
                assert!(!seen[other], "duplicate conflict for cell {cell}");
                seen[other] = true;

                // Every entry really shares a row, column, or box.
                let (r, c) = (other / 9, other % 9);
                let same_box = r / 3 == row / 3 && c / 3 == col / 3;
                assert!(r == row || c == col || same_box);
            }
        }
    }

    #[test]
    fn test_conflict_sets_are_symmetric() {
        let topo = Topology::new();
        for cell in 0..CELL_COUNT {
            for &other in topo.conflicts(cell) {
                assert!(
                    topo.conflicts(other).contains(&cell),
                    "cell {cell} conflicts with {other} but not vice versa"
                );
            }
        }
    }
}
