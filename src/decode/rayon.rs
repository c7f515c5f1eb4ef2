//! Rayon-parallel grid decoding (feature-gated).
//!
//! Splits the grid into [`DECODE_PARTITIONS`] contiguous index ranges and
//! decodes each on the rayon pool. Partitions write disjoint slices of the
//! output vector and the call returns only after every partition finishes,
//! so no synchronization is needed and the result is bit-identical to the
//! sequential path.

use rayon::prelude::*;

use crate::candidate::boxes::Box3D;
use crate::config::PostConfig;
use crate::decode::{decode_cell, DECODE_PARTITIONS};
use crate::tensor::HeadTensors;

/// Decodes every grid cell using partition-parallel workers.
///
/// Output order matches [`decode_grid`](crate::decode::decode_grid) exactly.
pub fn decode_grid_par(tensors: &HeadTensors<'_>, config: &PostConfig) -> Vec<Box3D> {
    let cells = tensors.cells();
    if cells == 0 {
        return Vec::new();
    }

    let chunk = cells.div_ceil(DECODE_PARTITIONS);
    let mut boxes = vec![Box3D::default(); cells];
    boxes
        .par_chunks_mut(chunk)
        .enumerate()
        .for_each(|(partition, out)| {
            let base = partition * chunk;
            for (slot_idx, slot) in out.iter_mut().enumerate() {
                *slot = decode_cell(tensors, config, base + slot_idx);
            }
        });
    boxes
}
