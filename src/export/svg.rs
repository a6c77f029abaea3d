use crate::error::ExportError;
use crate::grid::Grid;
use crate::util::{scale::PointScaler, Point};

use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE: &str = include_str!("../templates/path.svg");

// margin around the search area, in area units
const MARGIN: f64 = 1.0;

#[derive(Serialize)]
struct Line {
    from: Point,
    to: Point,
}

#[derive(Serialize)]
struct Label {
    at: Point,
    text: String,
}

/// Draws a path over the grid of its search area.
pub struct Svg {
    pub width: usize,
    pub height: usize,
    pub padding: usize,
}

impl Default for Svg {
    fn default() -> Self {
        Svg {
            width: 600,
            height: 600,
            padding: 40,
        }
    }
}

impl Svg {
    fn scaled_point(&self, point: &Point, scaler: &PointScaler) -> Point {
        let scaled_point = scaler.scale_point(point);

        // svg y grows downwards
        Point {
            x: (scaled_point.x * self.width as f64) + self.padding as f64,
            y: (scaled_point.y * (self.height as f64 * -1.0)) + (self.padding + self.height) as f64,
        }
    }

    /// Renders `path` with start and goal labelled and its length as title.
    pub fn export_path(
        &self,
        grid: &Grid,
        path: &[Point],
        cost: f64,
        goal: Point,
        name: &str,
    ) -> Result<String, ExportError> {
        let start = *path
            .first()
            .ok_or_else(|| ExportError::EmptyPath(name.to_string()))?;
        let max_x = grid.x_axis().last().copied().unwrap_or(0.0);
        let max_y = grid.y_axis().last().copied().unwrap_or(0.0);
        let scaler = PointScaler::new(-MARGIN, -MARGIN, max_x + MARGIN, max_y + MARGIN);

        let mut grid_lines = Vec::new();
        for &x in grid.x_axis() {
            grid_lines.push(Line {
                from: self.scaled_point(&Point::new(x, 0.0), &scaler),
                to: self.scaled_point(&Point::new(x, max_y), &scaler),
            });
        }
        for &y in grid.y_axis() {
            grid_lines.push(Line {
                from: self.scaled_point(&Point::new(0.0, y), &scaler),
                to: self.scaled_point(&Point::new(max_x, y), &scaler),
            });
        }

        let grid_points: Vec<Point> = grid
            .points()
            .iter()
            .map(|point| self.scaled_point(point, &scaler))
            .collect();
        let path_points: Vec<Point> = path
            .iter()
            .map(|point| self.scaled_point(point, &scaler))
            .collect();
        let svg_path = path_points
            .iter()
            .enumerate()
            .map(|(i, point)| format!("{} {} {}", if i == 0 { "M" } else { "L" }, point.x, point.y))
            .collect::<Vec<String>>()
            .join(" ");
        let labels: Vec<Label> = [start, goal]
            .iter()
            .map(|point| Label {
                at: self.scaled_point(point, &scaler),
                text: point.to_string(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("name", &name);
        context.insert("title", &format!("Path length {:.2}", cost));
        context.insert("width", &self.width);
        context.insert("height", &self.height);
        context.insert("padding", &self.padding);
        context.insert("color", "blue");
        context.insert("grid_lines", &grid_lines);
        context.insert("grid_points", &grid_points);
        context.insert("path", &svg_path);
        context.insert("path_points", &path_points);
        context.insert("labels", &labels);

        Ok(Tera::one_off(TEMPLATE, &context, false)?)
    }
}
