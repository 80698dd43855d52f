/// Project detection adapters
mod marker_detector;

pub use marker_detector::MarkerDetector;
