// Frame buffer decoder
//
// Cores have shipped two frame buffer layouts: one u64 per row, and one
// integer per cell. Both are tagged explicitly so the decoder never has to
// guess from the shape of the data. Column 0 is always the most significant
// position of a row.

use super::grid::{Grid, GRID_HEIGHT, GRID_WIDTH};
use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// Frame buffer snapshot as produced by a core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "rows", rename_all = "snake_case")]
pub enum FrameBuffer {
    /// One u64 per row, bit `j` is column `63 - j`
    PackedRows(Vec<u64>),
    /// One integer per cell, lit when `cell & 1 != 0`; cell `j` is column `63 - j`
    BitPlanes(Vec<Vec<i64>>),
}

impl FrameBuffer {
    /// All-dark frame buffer in the packed-row encoding
    pub fn blank() -> Self {
        FrameBuffer::PackedRows(vec![0; GRID_HEIGHT])
    }

    /// Parse a tagged JSON snapshot, e.g. `{"encoding":"packed_rows","rows":[...]}`
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        #[derive(Deserialize)]
        struct Tagged {
            encoding: String,
            rows: serde_json::Value,
        }

        let tagged: Tagged =
            serde_json::from_str(json).map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let rows = tagged.rows;
        let result = match tagged.encoding.as_str() {
            "packed_rows" => serde_json::from_value(rows).map(FrameBuffer::PackedRows),
            "bit_planes" => serde_json::from_value(rows).map(FrameBuffer::BitPlanes),
            other => return Err(DecodeError::UnrecognizedEncoding(other.to_string())),
        };

        result.map_err(|e| DecodeError::Malformed(e.to_string()))
    }

    /// Number of rows carried by the buffer
    pub fn row_count(&self) -> usize {
        match self {
            FrameBuffer::PackedRows(rows) => rows.len(),
            FrameBuffer::BitPlanes(rows) => rows.len(),
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::blank()
    }
}

/// Decode a frame buffer into the canonical grid
///
/// Pure: the same buffer always yields the same grid.
///
/// # Errors
/// [`DecodeError::RowCount`] if the buffer does not carry 32 rows,
/// [`DecodeError::RowWidth`] if a bit-plane row does not carry 64 cells.
pub fn decode(buffer: &FrameBuffer) -> Result<Grid, DecodeError> {
    let found = buffer.row_count();
    if found != GRID_HEIGHT {
        return Err(DecodeError::RowCount {
            expected: GRID_HEIGHT,
            found,
        });
    }

    let mut grid = Grid::new();
    match buffer {
        FrameBuffer::PackedRows(rows) => {
            for (row, &value) in rows.iter().enumerate() {
                for col in 0..GRID_WIDTH {
                    let bit = GRID_WIDTH - 1 - col;
                    grid.set(row, col, (value >> bit) & 1 != 0);
                }
            }
        }
        FrameBuffer::BitPlanes(rows) => {
            for (row, cells) in rows.iter().enumerate() {
                if cells.len() != GRID_WIDTH {
                    return Err(DecodeError::RowWidth {
                        row,
                        expected: GRID_WIDTH,
                        found: cells.len(),
                    });
                }
                for col in 0..GRID_WIDTH {
                    grid.set(row, col, cells[GRID_WIDTH - 1 - col] & 1 != 0);
                }
            }
        }
    }

    Ok(grid)
}
