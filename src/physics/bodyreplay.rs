use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::graph::functionerror::FunctionError;
use crate::graph::piecewisefunction::Point2D;
use crate::graph::vectorfunction::VectorFunction;
use crate::physics::physicserror::PhysicsError;
use crate::physics::trajectoryrecord::TrajectoryRecord;

/// A body reconstructed from a saved trajectory, for playback only.
///
/// Mass and forces are intentionally absent: replaying needs nothing
/// but the recorded kinematics. The time axis is the sample index, one
/// unit per recorded frame.
pub struct BodyReplay {
    position: VectorFunction,
    velocity: VectorFunction,
    acceleration: VectorFunction,
    index: usize,
    time: f64
}

fn indexed(values: &[f64]) -> impl Iterator<Item = (f64, f64)> + '_ {
    values.iter().enumerate().map(|(i, value)| (i as f64, *value))
}

impl BodyReplay {
    pub fn load(path: &Path) -> Result<BodyReplay, PhysicsError> {
        let file = File::open(path)?;
        let record: TrajectoryRecord = serde_json::from_reader(BufReader::new(file))?;

        let position = VectorFunction::from_sequence(
            indexed(&record.position.x),
            indexed(&record.position.y)
        )?;
        let velocity = VectorFunction::from_sequence(
            indexed(&record.velocity.x),
            indexed(&record.velocity.y)
        )?;
        let acceleration = VectorFunction::from_sequence(
            indexed(&record.acceleration.x),
            indexed(&record.acceleration.y)
        )?;

        let time = position.x().seek(0)?.x();
        info!(path = %path.display(), frames = position.x().len(), "loaded trajectory");

        Ok(BodyReplay { position, velocity, acceleration, index: 0, time })
    }

    pub fn position(&self) -> &VectorFunction {
        &self.position
    }

    pub fn velocity(&self) -> &VectorFunction {
        &self.velocity
    }

    pub fn acceleration(&self) -> &VectorFunction {
        &self.acceleration
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advances the playback cursor to the next recorded frame.
    /// Returns false once the data is exhausted.
    pub fn step(&mut self) -> bool {
        self.index += 1;

        match self.position.x().seek(self.index as isize) {
            Ok(point) => {
                self.time = point.x();
                true
            }
            Err(_) => {
                self.index -= 1;
                false
            }
        }
    }

    /// The recorded position, velocity and acceleration points at the
    /// current cursor.
    pub fn state(&self) -> Result<((Point2D, Point2D), (Point2D, Point2D), (Point2D, Point2D)), FunctionError> {
        let index = self.index as isize;
        Ok((
            self.position.seek(index)?,
            self.velocity.seek(index)?,
            self.acceleration.seek(index)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    fn write_record(name: &str) -> PathBuf {
        let json = serde_json::json!({
            "position": { "x": [0.0, 0.1, 0.2], "y": [-1.0, -0.9, -0.8] },
            "velocity": { "x": [1.0, 1.0, 1.0], "y": [0.0, 1.0, 2.0] },
            "acceleration": { "x": [0.0, 0.0, 0.0], "y": [10.0, 10.0, 10.0] }
        });
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(json.to_string().as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_indexes_samples_from_zero() {
        let path = write_record("replay_load.json");
        let replay = BodyReplay::load(&path).unwrap();

        assert_eq!(replay.time(), 0.0);
        let (position, velocity, acceleration) = replay.state().unwrap();
        assert_eq!(position.0.y(), 0.0);
        assert_eq!(position.1.y(), -1.0);
        assert_eq!(velocity.1.y(), 0.0);
        assert_eq!(acceleration.1.y(), 10.0);
    }

    #[test]
    fn step_walks_the_cursor_and_stops_at_the_end() {
        let path = write_record("replay_step.json");
        let mut replay = BodyReplay::load(&path).unwrap();

        assert!(replay.step());
        assert_eq!(replay.time(), 1.0);
        let (position, _, _) = replay.state().unwrap();
        assert_eq!(position.1.y(), -0.9);

        assert!(replay.step());
        assert_eq!(replay.time(), 2.0);

        assert!(!replay.step());
        assert_eq!(replay.time(), 2.0);
        let (position, _, _) = replay.state().unwrap();
        assert_eq!(position.1.y(), -0.8);
    }

    #[test]
    fn loading_a_missing_file_reports_io() {
        let path = std::env::temp_dir().join("replay_absent.json");
        let result = BodyReplay::load(&path);
        assert!(matches!(result, Err(PhysicsError::IOError(_))));
    }
}
