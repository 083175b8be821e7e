use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub width: u8,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sketch {
    pub id: u64,
    pub title: String,
    pub strokes: Vec<Stroke>,
    pub created_at: DateTime<Local>,
}

const DEFAULT_BRUSH_WIDTH: u8 = 3;
const DEFAULT_BRUSH_COLOR: &str = "#000000";

/// A drawing surface held as stroke data rather than pixels. The canvas
/// collects strokes under the current brush until it is cleared or saved
/// into the stored sketch list.
#[derive(Debug, Serialize)]
pub struct SketchPad {
    brush_width: u8,
    brush_color: String,
    canvas: Vec<Stroke>,
    current: Option<Stroke>,
    saved: Vec<Sketch>,
    next_id: u64,
}

impl Default for SketchPad {
    fn default() -> Self {
        Self {
            brush_width: DEFAULT_BRUSH_WIDTH,
            brush_color: DEFAULT_BRUSH_COLOR.to_string(),
            canvas: Vec::new(),
            current: None,
            saved: Vec::new(),
            next_id: 1,
        }
    }
}

impl SketchPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_brush(&mut self, width: u8, color: &str) {
        self.brush_width = width.max(1);
        self.brush_color = color.to_string();
    }

    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        self.current = Some(Stroke {
            points: vec![Point { x, y }],
            width: self.brush_width,
            color: self.brush_color.clone(),
        });
    }

    /// Extends the in-progress stroke. No-op when no stroke was begun,
    /// mirroring a pointer move with the button up.
    pub fn line_to(&mut self, x: f32, y: f32) {
        if let Some(stroke) = &mut self.current {
            stroke.points.push(Point { x, y });
        }
    }

    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.current.take() {
            self.canvas.push(stroke);
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.canvas.clear();
    }

    /// Snapshots the canvas into the stored list as "Sketch N". The canvas
    /// keeps its strokes so drawing can continue.
    pub fn save(&mut self, now: DateTime<Local>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let sketch = Sketch {
            id,
            title: format!("Sketch {}", self.saved.len() + 1),
            strokes: self.canvas.clone(),
            created_at: now,
        };
        self.saved.insert(0, sketch);
        id
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.saved.len();
        self.saved.retain(|s| s.id != id);
        self.saved.len() != before
    }

    pub fn saved(&self) -> impl Iterator<Item = &Sketch> {
        self.saved.iter()
    }

    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    pub fn canvas_stroke_count(&self) -> usize {
        self.canvas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn strokes_carry_the_brush_at_begin_time() {
        let mut pad = SketchPad::new();
        pad.set_brush(5, "#ff0000");
        pad.begin_stroke(0.0, 0.0);
        pad.line_to(10.0, 10.0);
        pad.set_brush(1, "#00ff00");
        pad.line_to(20.0, 5.0);
        pad.end_stroke();

        assert_eq!(pad.canvas_stroke_count(), 1);
        let id = pad.save(noon());
        let sketch = pad.saved().find(|s| s.id == id).unwrap();
        let stroke = &sketch.strokes[0];
        assert_eq!(stroke.width, 5);
        assert_eq!(stroke.color, "#ff0000");
        assert_eq!(stroke.points.len(), 3);
    }

    #[test]
    fn line_to_without_begin_is_a_noop() {
        let mut pad = SketchPad::new();
        pad.line_to(1.0, 1.0);
        pad.end_stroke();
        assert_eq!(pad.canvas_stroke_count(), 0);
    }

    #[test]
    fn clear_drops_the_canvas_but_not_saved_sketches() {
        let mut pad = SketchPad::new();
        pad.begin_stroke(0.0, 0.0);
        pad.end_stroke();
        pad.save(noon());
        pad.clear();

        assert_eq!(pad.canvas_stroke_count(), 0);
        assert_eq!(pad.saved_count(), 1);
    }

    #[test]
    fn saved_sketches_are_numbered_and_deletable() {
        let mut pad = SketchPad::new();
        pad.begin_stroke(0.0, 0.0);
        pad.end_stroke();
        let first = pad.save(noon());
        let second = pad.save(noon());

        let titles: Vec<_> = pad.saved().map(|s| s.title.clone()).collect();
        assert_eq!(titles, vec!["Sketch 2", "Sketch 1"]);

        assert!(pad.delete(first));
        assert!(!pad.delete(first));
        assert_eq!(pad.saved_count(), 1);
        assert!(pad.saved().any(|s| s.id == second));
    }
}
