use crate::foundation::color::Rgb8;
use crate::foundation::core::{Point, Size};
use crate::foundation::error::{ReelError, ReelResult};
use crate::raster::buffer::RasterBuffer;

/// Slot arrangement for one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum GridStrategy {
    /// Fixed anchor points, one per slot.
    ///
    /// Slots beyond the batch length get a `block`-sized placeholder when `placeholder` is set.
    FixedQuad {
        /// Top-left corner of each slot, row-major.
        anchors: Vec<Point>,
        /// Size of the placeholder block.
        block: Size,
        /// Placeholder fill color.
        placeholder: Option<Rgb8>,
    },
    /// Rows of `per_row` tiles packed left to right.
    FlowGrid {
        /// Row capacity.
        per_row: usize,
    },
}

impl GridStrategy {
    /// 2×2 anchors starting at `origin`, spaced by `block` plus the gaps.
    pub fn quad(
        origin: Point,
        block: Size,
        gap_x: u32,
        gap_y: u32,
        placeholder: Option<Rgb8>,
    ) -> Self {
        let dx = i64::from(block.width) + i64::from(gap_x);
        let dy = i64::from(block.height) + i64::from(gap_y);
        Self::FixedQuad {
            anchors: vec![
                origin,
                Point::new(origin.x + dx, origin.y),
                Point::new(origin.x, origin.y + dy),
                Point::new(origin.x + dx, origin.y + dy),
            ],
            block,
            placeholder,
        }
    }

    /// Maximum number of tiles one frame can show, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Self::FixedQuad { anchors, .. } => Some(anchors.len()),
            Self::FlowGrid { .. } => None,
        }
    }

    pub(crate) fn validate(&self) -> ReelResult<()> {
        match self {
            Self::FixedQuad { anchors, block, .. } => {
                if anchors.is_empty() {
                    return Err(ReelError::validation("fixed grid needs at least one anchor"));
                }
                if block.is_empty() {
                    return Err(ReelError::validation("fixed grid block size must be non-zero"));
                }
            }
            Self::FlowGrid { per_row } => {
                if *per_row == 0 {
                    return Err(ReelError::validation("flow grid per_row must be > 0"));
                }
            }
        }
        Ok(())
    }
}

/// What occupies a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotContent {
    /// The batch tile at this index.
    Tile(usize),
    /// A blank block of the given color.
    Placeholder(Rgb8),
}

/// Resting position and extent of one slot, before any animation offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Top-left corner on the canvas.
    pub origin: Point,
    /// Slot extent.
    pub size: Size,
    /// Slot content.
    pub content: SlotContent,
}

/// Flow-grid padding and gaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spacing {
    /// Left edge of every row, and right padding when deriving canvas size.
    pub side_padding: u32,
    /// Top of the first row, and bottom padding when deriving canvas size.
    pub top_padding: u32,
    /// Horizontal gap between tiles.
    pub gap_x: u32,
    /// Vertical gap between rows.
    pub gap_y: u32,
}

/// Resting placements for `batch` under `grid`.
pub fn placements(batch: &[RasterBuffer], grid: &GridStrategy, spacing: Spacing) -> Vec<Placement> {
    match grid {
        GridStrategy::FixedQuad {
            anchors,
            block,
            placeholder,
        } => anchors
            .iter()
            .enumerate()
            .filter_map(|(i, &origin)| match (batch.get(i), placeholder) {
                (Some(tile), _) => Some(Placement {
                    origin,
                    size: tile.size(),
                    content: SlotContent::Tile(i),
                }),
                (None, Some(color)) => Some(Placement {
                    origin,
                    size: *block,
                    content: SlotContent::Placeholder(*color),
                }),
                (None, None) => None,
            })
            .collect(),
        GridStrategy::FlowGrid { per_row } => {
            let mut out = Vec::with_capacity(batch.len());
            let mut y = i64::from(spacing.top_padding);
            for (row_i, row) in batch.chunks((*per_row).max(1)).enumerate() {
                let row_height = row.iter().map(RasterBuffer::height).max().unwrap_or(0);
                let mut x = i64::from(spacing.side_padding);
                for (col, tile) in row.iter().enumerate() {
                    out.push(Placement {
                        origin: Point::new(x, y + i64::from((row_height - tile.height()) / 2)),
                        size: tile.size(),
                        content: SlotContent::Tile(row_i * per_row + col),
                    });
                    x += i64::from(tile.width()) + i64::from(spacing.gap_x);
                }
                y += i64::from(row_height) + i64::from(spacing.gap_y);
            }
            out
        }
    }
}

/// Smallest canvas holding the flow layout of `batch` plus padding on all sides.
///
/// Sums are checked; a layout wider or taller than `u32::MAX` is a validation error.
pub fn flow_bounds(batch: &[RasterBuffer], per_row: usize, spacing: Spacing) -> ReelResult<Size> {
    let overflow = || ReelError::validation("flow layout size overflows");
    let mut width = 0u64;
    let mut height = 0u64;
    let mut rows = 0u64;
    for row in batch.chunks(per_row.max(1)) {
        let tiles: u64 = row.iter().map(|t| u64::from(t.width())).sum();
        let gaps = u64::from(spacing.gap_x) * (row.len() as u64 - 1);
        width = width.max(tiles + gaps);
        height += row.iter().map(|t| u64::from(t.height())).max().unwrap_or(0);
        rows += 1;
    }
    let width = width + u64::from(spacing.side_padding) * 2;
    let height =
        height + u64::from(spacing.gap_y) * rows.saturating_sub(1) + u64::from(spacing.top_padding) * 2;
    Ok(Size::new(
        u32::try_from(width).map_err(|_| overflow())?,
        u32::try_from(height).map_err(|_| overflow())?,
    ))
}

/// Single canvas size fitting every batch's flow layout. Never smaller than the padding alone.
pub fn uniform_flow_size(
    batches: &[Vec<RasterBuffer>],
    per_row: usize,
    spacing: Spacing,
) -> ReelResult<Size> {
    batches.iter().try_fold(flow_bounds(&[], per_row, spacing)?, |acc, b| {
        Ok(acc.max(flow_bounds(b, per_row, spacing)?))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
