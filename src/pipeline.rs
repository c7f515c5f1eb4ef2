//! The staged post-processing pipeline.
//!
//! [`PostProcessor`] owns a validated [`PostConfig`] and runs the full
//! decode → filter → sort → suppress sequence for each frame. Decode may fan
//! out across the rayon pool; everything after the join runs on the caller's
//! thread. Calls are stateless with respect to each other, so one processor
//! can serve a stream of frames.

use crate::candidate::boxes::{filter_by_score, sort_boxes_desc, Box3D};
use crate::candidate::nms::circle_nms;
use crate::config::PostConfig;
use crate::tensor::HeadTensors;
use crate::trace::{trace_event, trace_span};
use crate::util::{BevPostError, BevPostResult};

/// Turns one frame of detection-head tensors into a final list of boxes.
pub struct PostProcessor {
    config: PostConfig,
}

impl PostProcessor {
    /// Validates `config` and builds a processor around it.
    pub fn new(config: PostConfig) -> BevPostResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the validated configuration.
    pub fn config(&self) -> &PostConfig {
        &self.config
    }

    /// Produces the final detections for one frame.
    ///
    /// Decodes every grid cell (in parallel when the `rayon` feature is
    /// enabled and [`PostConfig::parallel`] is set), keeps candidates scoring
    /// strictly above the threshold, stable-sorts them by descending score,
    /// and drops circle-NMS duplicates. The survivors come back still in
    /// descending-score order.
    ///
    /// Fails with [`BevPostError::ShapeMismatch`] when `tensors` were built
    /// against a different shape than this processor's config, and with
    /// [`BevPostError::NoDetections`] when no candidate clears the score
    /// threshold.
    pub fn generate_boxes(&self, tensors: &HeadTensors<'_>) -> BevPostResult<Vec<Box3D>> {
        let _span = trace_span!(
            "generate_boxes",
            cells = tensors.cells(),
            classes = tensors.classes()
        )
        .entered();

        let cells = self.config.grid_cells();
        let classes = self.config.class_count;
        if tensors.cells() != cells || tensors.classes() != classes {
            return Err(BevPostError::ShapeMismatch {
                cells,
                classes,
                got_cells: tensors.cells(),
                got_classes: tensors.classes(),
            });
        }

        let candidates = self.decode(tensors);

        let mut survivors = filter_by_score(&candidates, self.config.score_threshold);
        trace_event!("score_filter", kept = survivors.len());
        if survivors.is_empty() {
            return Err(BevPostError::NoDetections {
                candidates: candidates.len(),
            });
        }

        sort_boxes_desc(&mut survivors);

        let keep = circle_nms(
            &survivors,
            self.config.circle_nms_dist_threshold,
            self.config.nms_scope,
        );
        let mut detections = Vec::new();
        for (decoded, keep_flag) in survivors.iter().zip(&keep) {
            if *keep_flag {
                detections.push(*decoded);
            }
        }
        trace_event!(
            "suppression",
            kept = detections.len(),
            dropped = survivors.len() - detections.len()
        );

        Ok(detections)
    }

    #[cfg(feature = "rayon")]
    fn decode(&self, tensors: &HeadTensors<'_>) -> Vec<Box3D> {
        if self.config.parallel {
            crate::decode::rayon::decode_grid_par(tensors, &self.config)
        } else {
            crate::decode::decode_grid(tensors, &self.config)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn decode(&self, tensors: &HeadTensors<'_>) -> Vec<Box3D> {
        crate::decode::decode_grid(tensors, &self.config)
    }
}
