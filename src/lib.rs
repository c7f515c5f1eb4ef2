//! BevPost turns lidar bird's-eye-view detection-head tensors into 3D boxes.
//!
//! This crate post-processes the six flat output tensors of a center-based
//! BEV detection head: it decodes one candidate box per grid cell, filters by
//! confidence, orders survivors by descending score, and removes duplicates
//! with circle NMS. Decoding optionally fans out across a thread pool via the
//! `rayon` feature; the `tracing` feature adds per-stage spans and counters.

mod candidate;
pub mod config;
pub mod decode;
pub mod lowlevel;
mod pipeline;
pub mod tensor;
mod trace;
pub mod util;

pub use candidate::boxes::Box3D;
pub use candidate::nms::circle_nms;
pub use config::{NmsScope, PostConfig};
pub use pipeline::PostProcessor;
pub use tensor::{ChannelView, HeadTensors};
pub use util::{BevPostError, BevPostResult};
