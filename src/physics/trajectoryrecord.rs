use serde::{
    Deserialize,
    Serialize
};

use crate::graph::piecewisefunction::PiecewiseFunction;
use crate::graph::vectorfunction::VectorFunction;

/// One trajectory component as persisted: the x and y sample values,
/// subsampled at the playback frame interval. Time is implicit in the
/// sample index.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub x: Vec<f64>,
    pub y: Vec<f64>
}

impl ComponentRecord {
    fn sample(function: &VectorFunction, frame_interval: usize) -> ComponentRecord {
        ComponentRecord {
            x: subsample(&function.x(), frame_interval),
            y: subsample(&function.y(), frame_interval)
        }
    }
}

fn subsample(function: &PiecewiseFunction, frame_interval: usize) -> Vec<f64> {
    function.points()
        .iter()
        .step_by(frame_interval)
        .map(|point| point.y())
        .collect()
}

/// The persisted form of a body's trajectory, consumed by the replay
/// and plotting collaborators.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub position: ComponentRecord,
    pub velocity: ComponentRecord,
    pub acceleration: ComponentRecord
}

impl TrajectoryRecord {
    pub(crate) fn sample(position: &VectorFunction,
                         velocity: &VectorFunction,
                         acceleration: &VectorFunction,
                         frame_interval: usize) -> TrajectoryRecord {
        TrajectoryRecord {
            position: ComponentRecord::sample(position, frame_interval),
            velocity: ComponentRecord::sample(velocity, frame_interval),
            acceleration: ComponentRecord::sample(acceleration, frame_interval)
        }
    }
}
