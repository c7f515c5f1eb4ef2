//! Candidate box selection and duplicate suppression.
//!
//! Covers score filtering, confidence ordering, and circle NMS.

pub(crate) mod boxes;
pub(crate) mod nms;
