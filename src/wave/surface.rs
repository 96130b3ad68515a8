use rand::Rng;

use crate::config::WaveSettings;

const HEAVY_STROKE: f32 = 0.78;
const GLOW_STROKE: f32 = 0.18;

/// Persistence drawing surface: a w*h grid of intensities in [0, 1].
///
/// Each frame fades everything toward black instead of clearing, so prior
/// strokes linger as a ghost trail. Strokes are additive, which stacks the
/// heavy pass and the glow pass into a layered line.
pub struct Surface {
    w: usize,
    h: usize,
    cells: Vec<f32>,
    fade: f32,
    span: f32,
    glitch_chance: f32,
}

impl Surface {
    pub fn new(settings: &WaveSettings) -> Self {
        Self {
            w: 0,
            h: 0,
            cells: Vec::new(),
            fade: settings.ghost_fade,
            span: settings.span,
            glitch_chance: settings.glitch_chance,
        }
    }

    /// Match the surface to the render area, clearing it when the size
    /// changed.
    pub fn resize(&mut self, w: usize, h: usize) {
        if w != self.w || h != self.h {
            self.w = w;
            self.h = h;
            self.cells = vec![0.0; w * h];
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn cell(&self, x: usize, y: usize) -> f32 {
        self.cells[y * self.w + x]
    }

    /// One pass of the render loop: fade, then (if the scope produced a
    /// snapshot) an occasional glitch and the two stroke passes. Without a
    /// snapshot only the fading background advances.
    pub fn frame<R: Rng>(&mut self, snapshot: Option<&[u8]>, rng: &mut R) {
        self.fade_pass();

        let Some(bytes) = snapshot else { return };
        if self.w < 2 || self.h == 0 || bytes.len() < 2 {
            return;
        }

        if rng.random::<f32>() < self.glitch_chance {
            self.glitch(rng);
        }

        let ys = self.trace(bytes);
        self.stroke(&ys, HEAVY_STROKE, true);
        self.stroke(&ys, GLOW_STROKE, false);
    }

    fn fade_pass(&mut self) {
        let keep = 1.0 - self.fade;
        for c in &mut self.cells {
            *c *= keep;
            if *c < 0.01 {
                *c = 0.0;
            }
        }
    }

    /// Map the byte-domain snapshot to one row index per column: center
    /// offset by `(v/255 - 0.5) * span * h`.
    fn trace(&self, bytes: &[u8]) -> Vec<usize> {
        let mid = self.h as f32 / 2.0;
        (0..self.w)
            .map(|x| {
                let i = x * (bytes.len() - 1) / (self.w - 1);
                let v = bytes[i] as f32 / 255.0;
                let y = mid + (v - 0.5) * (self.h as f32 * self.span);
                (y.max(0.0) as usize).min(self.h - 1)
            })
            .collect()
    }

    /// Stroke a connected polyline through one row index per column.
    /// `thick` also stamps the rows above/below at reduced gain.
    fn stroke(&mut self, ys: &[usize], gain: f32, thick: bool) {
        for x in 0..self.w {
            let y = ys[x];
            // Connect to the previous column so the line has no gaps.
            if x > 0 {
                let (lo, hi) = if ys[x - 1] <= y { (ys[x - 1], y) } else { (y, ys[x - 1]) };
                for yy in lo..=hi {
                    self.add(x, yy, gain);
                }
            } else {
                self.add(x, y, gain);
            }
            if thick {
                if y > 0 {
                    self.add(x, y - 1, gain * 0.4);
                }
                if y + 1 < self.h {
                    self.add(x, y + 1, gain * 0.4);
                }
            }
        }
    }

    fn add(&mut self, x: usize, y: usize, gain: f32) {
        let c = &mut self.cells[y * self.w + x];
        *c = (*c + gain).min(1.0);
    }

    /// Cosmetic glitch: re-paste a thin horizontal band of the surface
    /// shifted sideways by a small random offset. Rows outside the band are
    /// untouched.
    fn glitch<R: Rng>(&mut self, rng: &mut R) {
        let y0 = rng.random_range(0..self.h);
        let band = 1 + rng.random_range(0..2);
        let dx = rng.random_range(-3i64..=3);

        for y in y0..(y0 + band).min(self.h) {
            let row: Vec<f32> = self.cells[y * self.w..(y + 1) * self.w].to_vec();
            for x in 0..self.w {
                let src = x as i64 - dx;
                if (0..self.w as i64).contains(&src) {
                    self.cells[y * self.w + x] = row[src as usize];
                }
            }
        }
    }
}
