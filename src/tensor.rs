//! Borrowed views over the detection head's flat output buffers.
//!
//! Each head writes one flat `f32` buffer logically shaped
//! `[channels][grid_height][grid_width]` in row-major order, so channel `c`
//! of grid cell `i` lives at `c * cells + i`. [`ChannelView`] wraps one such
//! buffer together with its channel count and per-channel stride;
//! [`HeadTensors`] bundles the six views a decode pass reads, validated
//! against a [`PostConfig`]. Views borrow the caller's buffers and never
//! copy them.

use crate::config::PostConfig;
use crate::util::{BevPostError, BevPostResult};

/// Channels in the center-offset head (x, y).
pub const OFFSET_CHANNELS: usize = 2;
/// Channels in the elevation head.
pub const ELEVATION_CHANNELS: usize = 1;
/// Channels in the log-dimensions head (width, length, height).
pub const DIMENSION_CHANNELS: usize = 3;
/// Channels in the rotation head (sin, cos of yaw).
pub const ROTATION_CHANNELS: usize = 2;
/// Channels in the velocity head (x, y).
pub const VELOCITY_CHANNELS: usize = 2;

/// Read-only channel-major view over one head's flat output buffer.
#[derive(Debug, Clone, Copy)]
pub struct ChannelView<'a> {
    data: &'a [f32],
    channels: usize,
    stride: usize,
}

impl<'a> ChannelView<'a> {
    /// Creates a view with `channels` planes of `cells` elements each.
    ///
    /// `tensor` names the buffer in error messages. The slice may be longer
    /// than required; the excess is ignored.
    pub fn new(
        tensor: &'static str,
        data: &'a [f32],
        channels: usize,
        cells: usize,
    ) -> BevPostResult<Self> {
        let needed = channels.saturating_mul(cells);
        if data.len() < needed {
            return Err(BevPostError::BufferTooSmall {
                tensor,
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            channels,
            stride: cells,
        })
    }

    /// Returns the number of channel planes.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the stride in elements between channel starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the value at `channel` for linear grid index `cell`.
    ///
    /// Indices must stay within the shape the view was created with.
    #[inline]
    pub fn at(&self, channel: usize, cell: usize) -> f32 {
        self.data[channel * self.stride + cell]
    }
}

/// The six head outputs for one frame, validated against a config.
///
/// All views share the same per-channel stride (`config.grid_cells()`), so a
/// single linear grid index addresses the same BEV cell in every head.
#[derive(Debug, Clone, Copy)]
pub struct HeadTensors<'a> {
    pub(crate) heatmap: ChannelView<'a>,
    pub(crate) offset: ChannelView<'a>,
    pub(crate) elevation: ChannelView<'a>,
    pub(crate) dimensions: ChannelView<'a>,
    pub(crate) rotation: ChannelView<'a>,
    pub(crate) velocity: ChannelView<'a>,
    cells: usize,
    classes: usize,
}

impl<'a> HeadTensors<'a> {
    /// Wraps the six flat buffers, checking each length against the shape
    /// `config` implies. Buffers may be longer than required.
    pub fn new(
        config: &PostConfig,
        heatmap: &'a [f32],
        offset: &'a [f32],
        elevation: &'a [f32],
        dimensions: &'a [f32],
        rotation: &'a [f32],
        velocity: &'a [f32],
    ) -> BevPostResult<Self> {
        let cells = config.grid_cells();
        let classes = config.class_count;
        Ok(Self {
            heatmap: ChannelView::new("heatmap", heatmap, classes, cells)?,
            offset: ChannelView::new("offset", offset, OFFSET_CHANNELS, cells)?,
            elevation: ChannelView::new("elevation", elevation, ELEVATION_CHANNELS, cells)?,
            dimensions: ChannelView::new("dimensions", dimensions, DIMENSION_CHANNELS, cells)?,
            rotation: ChannelView::new("rotation", rotation, ROTATION_CHANNELS, cells)?,
            velocity: ChannelView::new("velocity", velocity, VELOCITY_CHANNELS, cells)?,
            cells,
            classes,
        })
    }

    /// Grid cells each view was validated for.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Heatmap class channels the views were validated for.
    pub fn classes(&self) -> usize {
        self.classes
    }
}
