//! Character-grid surface for terminals
//!
//! Each cell covers `cell_size` x `cell_size` world units. Outlines are
//! stroked with `+ - |` and images are shaded by luminance, which is enough
//! to watch a scene run without a window.

use super::surface::Surface;
use crate::assets::{ImageHandle, ImageStore};
use crate::foundation::math::{Point2, Rect, Transform2D, Vec2};
use std::fmt;

const SHADES: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];
const MISSING_IMAGE: char = '?';

/// Terminal surface rasterizing into a grid of characters
pub struct AsciiSurface {
    columns: usize,
    rows: usize,
    cell_size: f32,
    cells: Vec<char>,
    stack: Vec<Transform2D>,
    images: ImageStore,
}

impl AsciiSurface {
    /// Blank grid of `columns` x `rows` cells
    pub fn new(columns: usize, rows: usize, cell_size: f32) -> Self {
        Self {
            columns,
            rows,
            cell_size: cell_size.abs().max(f32::EPSILON),
            cells: vec![' '; columns * rows],
            stack: Vec::new(),
            images: ImageStore::new(),
        }
    }

    /// Use `images` to resolve sprite handles
    pub fn with_images(mut self, images: ImageStore) -> Self {
        self.images = images;
        self
    }

    /// Image store used to resolve sprite handles
    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Mutable image store
    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    /// Character at a cell, `None` outside the grid
    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Current frame as text, one line per row
    pub fn frame(&self) -> String {
        self.to_string()
    }

    fn current(&self) -> Transform2D {
        self.stack.last().copied().unwrap_or_default()
    }

    fn cell_of(&self, point: Point2) -> Option<(usize, usize)> {
        let column = (point.x / self.cell_size).floor();
        let row = (point.y / self.cell_size).floor();
        if column < 0.0 || row < 0.0 {
            return None;
        }
        let (column, row) = (column as usize, row as usize);
        (column < self.columns && row < self.rows).then_some((column, row))
    }

    fn plot(&mut self, point: Point2, glyph: char) {
        if let Some((column, row)) = self.cell_of(point) {
            self.cells[row * self.columns + column] = glyph;
        }
    }

    fn cell_center(&self, column: usize, row: usize) -> Point2 {
        Point2::new(
            (column as f32 + 0.5) * self.cell_size,
            (row as f32 + 0.5) * self.cell_size,
        )
    }

    fn stroke(&mut self, from: Point2, to: Point2) {
        let delta = to - from;
        let glyph = if delta.x.abs() >= delta.y.abs() { '-' } else { '|' };
        let steps = (delta.norm() / (self.cell_size * 0.5)).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            self.plot(from + delta * t, glyph);
        }
    }

    fn shade(&self, image: ImageHandle, u: f32, v: f32) -> Option<char> {
        let Some(data) = self.images.get(image) else {
            return Some(MISSING_IMAGE);
        };
        let px = (u * data.width as f32).floor().clamp(0.0, data.width.saturating_sub(1) as f32) as u32;
        let py = (v * data.height as f32).floor().clamp(0.0, data.height.saturating_sub(1) as f32) as u32;
        let [r, g, b, a] = data.pixel(px, py)?;
        if a < 128 {
            return None;
        }
        let luminance = (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) / 255.0;
        let index = ((luminance * (SHADES.len() - 1) as f32).round() as usize).min(SHADES.len() - 1);
        Some(SHADES[index])
    }
}

impl Surface for AsciiSurface {
    fn size(&self) -> (f32, f32) {
        (self.columns as f32 * self.cell_size, self.rows as f32 * self.cell_size)
    }

    fn clear(&mut self, region: Rect) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let center = self.cell_center(column, row);
                if center.x >= region.x && center.x < region.right() && center.y >= region.y && center.y < region.bottom() {
                    self.cells[row * self.columns + column] = ' ';
                }
            }
        }
    }

    fn draw_rect_outline(&mut self, rect: Rect) {
        let transform = self.current();
        let corners = [
            Point2::new(rect.x, rect.y),
            Point2::new(rect.right(), rect.y),
            Point2::new(rect.right(), rect.bottom()),
            Point2::new(rect.x, rect.bottom()),
        ]
        .map(|corner| transform.transform_point(corner));

        for i in 0..corners.len() {
            self.stroke(corners[i], corners[(i + 1) % corners.len()]);
        }
        for corner in corners {
            self.plot(corner, '+');
        }
    }

    fn draw_image(&mut self, image: ImageHandle, dest: Rect) {
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let matrix = self.current().to_matrix();
        let Some(inverse) = matrix.try_inverse() else {
            log::warn!("Skipping image draw under a singular transform");
            return;
        };

        let corners = [
            Point2::new(dest.x, dest.y),
            Point2::new(dest.right(), dest.y),
            Point2::new(dest.right(), dest.bottom()),
            Point2::new(dest.x, dest.bottom()),
        ]
        .map(|corner| matrix.transform_point(&corner));
        let min = corners.iter().fold(Vec2::new(f32::MAX, f32::MAX), |acc, p| acc.inf(&p.coords));
        let max = corners.iter().fold(Vec2::new(f32::MIN, f32::MIN), |acc, p| acc.sup(&p.coords));

        let first_column = (min.x / self.cell_size).floor().max(0.0) as usize;
        let first_row = (min.y / self.cell_size).floor().max(0.0) as usize;
        let last_column = ((max.x / self.cell_size).ceil().max(0.0) as usize).min(self.columns);
        let last_row = ((max.y / self.cell_size).ceil().max(0.0) as usize).min(self.rows);

        for row in first_row..last_row {
            for column in first_column..last_column {
                let local = inverse.transform_point(&self.cell_center(column, row));
                let u = (local.x - dest.x) / dest.width;
                let v = (local.y - dest.y) / dest.height;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                if let Some(glyph) = self.shade(image, u, v) {
                    self.cells[row * self.columns + column] = glyph;
                }
            }
        }
    }

    fn push_transform(&mut self, transform: Transform2D) {
        let composed = self.current().combine(&transform);
        self.stack.push(composed);
    }

    fn pop_transform(&mut self) {
        if self.stack.pop().is_none() {
            log::warn!("pop_transform on an empty transform stack");
        }
    }

    fn transform_depth(&self) -> usize {
        self.stack.len()
    }
}

impl fmt::Display for AsciiSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.chunks(self.columns.max(1)).enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().collect();
            f.write_str(line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageData;

    #[test]
    fn test_outline_strokes_edges_and_corners() {
        let mut surface = AsciiSurface::new(6, 4, 1.0);
        surface.draw_rect_outline(Rect::new(0.5, 0.5, 4.0, 2.0));

        // Fourth row stays blank.
        assert_eq!(surface.frame(), "+---+\n|   |\n+---+\n");
    }

    #[test]
    fn test_clear_blanks_region_only() {
        let mut surface = AsciiSurface::new(6, 4, 1.0);
        surface.draw_rect_outline(Rect::new(0.5, 0.5, 4.0, 2.0));
        surface.clear(Rect::new(0.0, 0.0, 6.0, 1.0));
        assert_eq!(surface.cell(0, 0), Some(' '));
        assert_eq!(surface.cell(0, 2), Some('+'));

        let full = surface.bounds();
        surface.clear(full);
        assert!(surface.frame().trim().is_empty());
    }

    #[test]
    fn test_image_is_shaded_by_luminance() {
        let mut surface = AsciiSurface::new(4, 4, 1.0);
        let white = surface.images_mut().insert("white", ImageData::solid_color(2, 2, [255, 255, 255, 255]));
        surface.draw_image(white, Rect::new(1.0, 1.0, 2.0, 2.0));

        assert_eq!(surface.cell(1, 1), Some('@'));
        assert_eq!(surface.cell(2, 2), Some('@'));
        assert_eq!(surface.cell(0, 0), Some(' '));
        assert_eq!(surface.cell(3, 3), Some(' '));
    }

    #[test]
    fn test_transparent_pixels_are_skipped() {
        let mut surface = AsciiSurface::new(2, 2, 1.0);
        let clear = surface.images_mut().insert("clear", ImageData::solid_color(1, 1, [255, 255, 255, 0]));
        surface.draw_image(clear, Rect::new(0.0, 0.0, 2.0, 2.0));
        assert!(surface.frame().trim().is_empty());
    }

    #[test]
    fn test_unknown_image_is_marked() {
        let mut other = ImageStore::new();
        let stray = other.insert("stray", ImageData::solid_color(1, 1, [0; 4]));
        let mut surface = AsciiSurface::new(2, 2, 1.0);
        surface.draw_image(stray, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(surface.cell(0, 0), Some(MISSING_IMAGE));
    }

    #[test]
    fn test_translated_image_lands_offset() {
        let mut surface = AsciiSurface::new(4, 4, 1.0);
        let white = surface.images_mut().insert("white", ImageData::solid_color(1, 1, [255; 4]));
        surface.push_transform(Transform2D::from_translation(Vec2::new(2.0, 2.0)));
        surface.draw_image(white, Rect::new(0.0, 0.0, 1.0, 1.0));
        surface.pop_transform();
        assert_eq!(surface.cell(2, 2), Some('@'));
        assert_eq!(surface.cell(0, 0), Some(' '));
    }
}
