pub mod segment_muxer;

pub use segment_muxer::SegmentMuxer;
