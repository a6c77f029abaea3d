use crate::error::ExportError;
use crate::util::Point;

use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Serialize, Deserialize)]
struct Waypoint {
    step: usize,
    x: f64,
    y: f64,
}

/// Writes one `step,x,y` row per waypoint.
pub fn write_path_csv<W: Write>(writer: W, path: &[Point]) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(writer);
    for (step, point) in path.iter().enumerate() {
        writer.serialize(Waypoint {
            step,
            x: point.x,
            y: point.y,
        })?;
    }
    writer.flush()?;

    Ok(())
}

pub fn read_path_csv<R: Read>(reader: R) -> Result<Vec<Point>, ExportError> {
    let mut reader = Reader::from_reader(reader);
    let mut path = Vec::new();
    for row in reader.deserialize::<Waypoint>() {
        let waypoint = row?;
        path.push(Point::new(waypoint.x, waypoint.y));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_path_csv_works() {
        let path = vec![Point::new(0.0, 0.0), Point::new(0.5, 0.5)];
        let mut buffer = Vec::new();
        write_path_csv(&mut buffer, &path).unwrap();
        let output = String::from_utf8(buffer.clone()).unwrap();

        assert_eq!(output, "step,x,y\n0,0.0,0.0\n1,0.5,0.5\n");
        assert_eq!(read_path_csv(buffer.as_slice()).unwrap(), path);
    }
}
