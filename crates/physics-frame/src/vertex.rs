//! GPU-ready vertex records
//!
//! Scenes compute in `f64`; the renderer consumes these `f32` records
//! directly via `bytemuck::cast_slice`.

use crate::body_scene::Trail;
use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use physics_core::{
    Charge, GridSpec, HeightField, InterferencePattern, TracedLine, WavefunctionSample,
};

/// Vertex of a line list (two vertices per segment)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    /// Fade factor in [0, 1]
    pub intensity: f32,
    pub color: [f32; 4],
}

/// Vertex of a triangulated surface
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub intensity: f32,
}

fn rgba(color: &catppuccin::Color) -> [f32; 4] {
    let rgb = &color.rgb;
    [
        f32::from(rgb.r) / 255.0,
        f32::from(rgb.g) / 255.0,
        f32::from(rgb.b) / 255.0,
        1.0,
    ]
}

/// Line color for a charge of sign `q`
pub fn charge_color(q: f64) -> [f32; 4] {
    let colors = &catppuccin::PALETTE.mocha.colors;
    if q >= 0.0 {
        rgba(&colors.red)
    } else {
        rgba(&colors.blue)
    }
}

fn line_vertex(position: DVec3, intensity: f32, color: [f32; 4]) -> LineVertex {
    LineVertex {
        position: position.as_vec3().to_array(),
        intensity,
        color,
    }
}

/// Append one segment per consecutive pair; intensity follows `fade(i)`
fn push_segments(
    out: &mut Vec<LineVertex>,
    points: &[DVec3],
    color: [f32; 4],
    fade: impl Fn(usize) -> f32,
) {
    for (i, pair) in points.windows(2).enumerate() {
        out.push(line_vertex(pair[0], fade(i), color));
        out.push(line_vertex(pair[1], fade(i + 1), color));
    }
}

/// Field lines colored by the sign of their source charge, fading away from it
pub fn field_line_vertices(lines: &[TracedLine], charges: &[Charge]) -> Vec<LineVertex> {
    let mut out = Vec::new();
    for line in lines {
        let q = charges.get(line.source).map_or(0.0, |c| c.q);
        let len = line.points.len().max(1) as f32;
        push_segments(&mut out, &line.points, charge_color(q), |i| {
            1.0 - i as f32 / len
        });
    }
    out
}

/// Trail segments, oldest faded out and newest fully opaque
pub fn trail_vertices(trail: &Trail, color: [f32; 4]) -> Vec<LineVertex> {
    let points: Vec<DVec3> = trail.iter().copied().collect();
    let len = points.len().max(1) as f32;
    let mut out = Vec::with_capacity(points.len().saturating_sub(1) * 2);
    push_segments(&mut out, &points, color, |i| (i + 1) as f32 / len);
    out
}

/// Wavefunction polyline in the (x, ψ) plane, colored by region
pub fn wavefunction_vertices(samples: &[WavefunctionSample]) -> Vec<LineVertex> {
    samples
        .windows(2)
        .flat_map(|pair| {
            let color = pair[0].region.color();
            pair.iter()
                .map(move |s| line_vertex(DVec3::new(s.x, s.psi, 0.0), 1.0, color))
        })
        .collect()
}

/// Grid point (i, j) lifted to `height` on the y axis
fn surface_vertex(
    grid: &GridSpec,
    i: usize,
    j: usize,
    height: f64,
    intensity: f64,
) -> SurfaceVertex {
    let p = grid.point(i, j);
    SurfaceVertex {
        position: [p.x as f32, height as f32, p.y as f32],
        intensity: intensity as f32,
    }
}

/// Intensity surface scaled so the peak sits at `peak_height`
pub fn interference_vertices(
    pattern: &InterferencePattern,
    peak_height: f64,
) -> Vec<SurfaceVertex> {
    let grid = &pattern.grid;
    let scale = if pattern.max_intensity > 0.0 {
        1.0 / pattern.max_intensity
    } else {
        0.0
    };

    let n = grid.resolution;
    let mut out = Vec::with_capacity(grid.len());
    for j in 0..n {
        for i in 0..n {
            let normalized = pattern.intensity(i, j) * scale;
            out.push(surface_vertex(grid, i, j, normalized * peak_height, normalized));
        }
    }
    out
}

/// Traveling wave surface; intensity carries the raw height for shading
pub fn height_field_vertices(field: &HeightField) -> Vec<SurfaceVertex> {
    let grid = field.grid();
    let n = grid.resolution;
    let mut out = Vec::with_capacity(grid.len());
    for j in 0..n {
        for i in 0..n {
            let h = field.height(i, j);
            out.push(surface_vertex(&grid, i, j, h, h));
        }
    }
    out
}

/// Triangle-list indices for a row-major grid surface.
///
/// Empty when the grid has fewer than two points per axis or more points
/// than a `u32` index can address.
pub fn surface_indices(grid: &GridSpec) -> Vec<u32> {
    let n = grid.resolution;
    if n < 2 {
        return Vec::new();
    }
    let Some(count) = n.checked_mul(n) else {
        log::warn!("Grid resolution {n} overflows the point count");
        return Vec::new();
    };
    if u32::try_from(count).is_err() {
        log::warn!("Grid of {count} points exceeds the u32 index range");
        return Vec::new();
    }

    // Every index is below `count`, which fits in u32
    let n = n as u32;
    let mut indices = Vec::with_capacity((grid.resolution - 1).pow(2) * 6);
    for j in 0..n - 1 {
        for i in 0..n - 1 {
            let a = j * n + i;
            let b = a + 1;
            let c = a + n;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    indices
}
