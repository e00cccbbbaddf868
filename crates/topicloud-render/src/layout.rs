//! Word placement.
//!
//! [`WordCloudLayout`] is the seam between the topic cloud and the routine that actually places
//! and paints words. [`SpiralLayout`] follows the usual word-cloud approach: an occupancy grid
//! over the canvas and an Archimedean spiral walked outward from the center, taking the first
//! position where the word's cells are all free.

use crate::element::Canvas2d;
use crate::svg::fmt;
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;

/// Occupancy grid cells per canvas side. Larger canvases get coarser cells.
const MAX_GRID_SIDE: f64 = 4096.0;

/// Everything a layout needs to draw one cloud.
pub struct WordCloudRequest<'a> {
    /// `(label, weight)` pairs in drawing priority order. The weight is an opaque key handed
    /// back to `size`.
    pub list: Vec<(String, usize)>,
    pub color: &'a dyn Fn(&str) -> String,
    pub size: &'a dyn Fn(usize) -> f64,
    pub font_family: &'a str,
    pub shuffle: bool,
    /// Probability in `[0, 1]` that a word is turned a quarter turn.
    pub rotate_ratio: f64,
    pub draw_out_of_bound: bool,
    pub seed: u64,
}

/// Where a word ended up. Coordinates are canvas pixels; `x`/`y` is the text center and
/// `width`/`height` the axis-aligned box after rotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub label: String,
    pub weight: usize,
    pub font_size: f64,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotated: bool,
}

impl PlacedWord {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        x >= self.x - half_w && x <= self.x + half_w && y >= self.y - half_h && y <= self.y + half_h
    }
}

pub trait WordCloudLayout {
    /// Places and paints `request.list` on `canvas`; returns the words that were drawn.
    fn draw(&self, canvas: &mut dyn Canvas2d, request: &WordCloudRequest<'_>) -> Vec<PlacedWord>;
}

#[derive(Clone)]
pub struct SpiralLayout {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    /// Occupancy grid cell size in pixels.
    pub grid_size: f64,
    /// Words at or below this font size are skipped.
    pub min_size: f64,
    /// Vertical squash of the spiral; canvases are usually wider than tall.
    pub ellipticity: f64,
}

impl Default for SpiralLayout {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            grid_size: 8.0,
            min_size: 0.0,
            ellipticity: 0.65,
        }
    }
}

struct Grid {
    cols: i64,
    rows: i64,
    cells: Vec<bool>,
}

impl Grid {
    fn new(cols: i64, rows: i64) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols.max(0).saturating_mul(rows.max(0)) as usize],
        }
    }

    fn in_bounds(&self, gx: i64, gy: i64) -> bool {
        gx >= 0 && gy >= 0 && gx < self.cols && gy < self.rows
    }

    fn index(&self, gx: i64, gy: i64) -> usize {
        (gy * self.cols + gx) as usize
    }

    fn fits(&self, gx: i64, gy: i64, gw: i64, gh: i64, out_of_bound: bool) -> bool {
        for y in gy..gy + gh {
            for x in gx..gx + gw {
                if !self.in_bounds(x, y) {
                    if out_of_bound {
                        continue;
                    }
                    return false;
                }
                if self.cells[self.index(x, y)] {
                    return false;
                }
            }
        }
        true
    }

    fn fill(&mut self, gx: i64, gy: i64, gw: i64, gh: i64) {
        for y in gy..gy + gh {
            for x in gx..gx + gw {
                if self.in_bounds(x, y) {
                    let i = self.index(x, y);
                    self.cells[i] = true;
                }
            }
        }
    }
}

impl SpiralLayout {
    /// Spiral positions (grid units, relative to the center) at ring `r`.
    fn ring(&self, r: i64) -> Vec<(f64, f64)> {
        if r == 0 {
            return vec![(0.0, 0.0)];
        }
        let steps = r * 8;
        let r = r as f64;
        (0..steps)
            .map(|i| {
                let theta = (i as f64) * std::f64::consts::TAU / steps as f64;
                (r * theta.cos(), -r * theta.sin() * self.ellipticity)
            })
            .collect()
    }

    fn place(
        &self,
        grid: &mut Grid,
        gw: i64,
        gh: i64,
        out_of_bound: bool,
    ) -> Option<(i64, i64)> {
        let center_x = grid.cols as f64 / 2.0;
        let center_y = grid.rows as f64 / 2.0;
        let max_radius = (grid.cols as f64).hypot(grid.rows as f64).ceil() as i64;
        for r in 0..=max_radius {
            for (dx, dy) in self.ring(r) {
                let gx = (center_x + dx - gw as f64 / 2.0).round() as i64;
                let gy = (center_y + dy - gh as f64 / 2.0).round() as i64;
                if grid.fits(gx, gy, gw, gh, out_of_bound) {
                    grid.fill(gx, gy, gw, gh);
                    return Some((gx, gy));
                }
            }
        }
        None
    }
}

impl WordCloudLayout for SpiralLayout {
    fn draw(&self, canvas: &mut dyn Canvas2d, request: &WordCloudRequest<'_>) -> Vec<PlacedWord> {
        let g = if self.grid_size.is_finite() && self.grid_size >= 1.0 {
            self.grid_size
        } else {
            8.0
        };
        let (width, height) = (canvas.width(), canvas.height());
        let g = [width, height]
            .into_iter()
            .filter(|side| side.is_finite())
            .fold(g, |g, side| g.max(side / MAX_GRID_SIDE));
        // Whole cells only, so an in-bounds word never spills past the canvas edge.
        let cols = (width / g).floor().clamp(0.0, MAX_GRID_SIDE) as i64;
        let rows = (height / g).floor().clamp(0.0, MAX_GRID_SIDE) as i64;
        let mut grid = Grid::new(cols, rows);

        let mut rng = StdRng::seed_from_u64(request.seed);
        let mut list = request.list.clone();
        if request.shuffle {
            list.shuffle(&mut rng);
        }

        let mut placed = Vec::with_capacity(list.len());
        for (label, weight) in list {
            let font_size = (request.size)(weight);
            if !font_size.is_finite() || font_size <= self.min_size {
                tracing::debug!(label = %label, font_size, "skipping word below minimum size");
                continue;
            }

            let rotated = request.rotate_ratio > 0.0 && rng.gen_bool(request.rotate_ratio.min(1.0));
            let metrics = self.text_measurer.measure(
                &label,
                &TextStyle {
                    font_family: Some(request.font_family.to_string()),
                    font_size,
                },
            );
            let (w, h) = if rotated {
                (metrics.height, metrics.width)
            } else {
                (metrics.width, metrics.height)
            };
            let gw = (w / g).ceil().max(1.0) as i64;
            let gh = (h / g).ceil().max(1.0) as i64;

            let Some((gx, gy)) = self.place(&mut grid, gw, gh, request.draw_out_of_bound) else {
                tracing::warn!(label = %label, font_size, "word does not fit on the canvas");
                continue;
            };

            let x = (gx as f64 + gw as f64 / 2.0) * g;
            let y = (gy as f64 + gh as f64 / 2.0) * g;
            let color = (request.color)(&label);
            canvas.set_fill_style(&color);
            canvas.set_font(&format!(
                "normal {}px {}",
                fmt(font_size),
                request.font_family
            ));
            let rotation = if rotated {
                -std::f64::consts::FRAC_PI_2
            } else {
                0.0
            };
            canvas.fill_text(&label, x, y, rotation);

            placed.push(PlacedWord {
                label,
                weight,
                font_size,
                color,
                x,
                y,
                width: w,
                height: h,
                rotated,
            });
        }

        tracing::debug!(
            requested = request.list.len(),
            drawn = placed.len(),
            "word cloud layout finished"
        );
        placed
    }
}
