pub mod running_moments;

pub use running_moments::RunningMoments;
