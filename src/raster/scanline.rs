//! Scanline triangle filling.
//!
//! Triangles are decomposed into flat-bottom and flat-top halves and filled
//! one horizontal row at a time:
//!
//! 1. **Sort vertices** ascending by integer screen Y.
//! 2. **Classify**: if the lower two vertices share a row the triangle is
//!    already flat-bottom; if the upper two share a row it is flat-top;
//!    otherwise a fourth vertex is interpolated on the long edge at the
//!    middle vertex's row and both halves are filled.
//!
//! ```text
//!      v0                 v0
//!      /\                 /\
//!     /  \               /  \
//!    /    \      =>   v1/____\ split   <- middle row, shared edge
//!   /   ___\            \    |
//!  /___/    \            \   |
//! v1         v2           \__|
//!                            v2
//! ```
//!
//! # Edge stepping
//!
//! All coordinates are taken as truncated integers before any slope math, so
//! a vertex at x = 3.7 steps from column 3. Each non-horizontal edge carries
//! a reciprocal slope (Δx per row); two running X positions advance by those
//! slopes per row. The right-hand position starts half a pixel in from the
//! shared apex, which keeps one-column rows at exactly one pixel. Pixels are
//! painted from `ceil(left)` up to but excluding the right position.
//!
//! Interpolated quantities (Gouraud colors, texture terms) advance along both
//! edges by per-row deltas and are blended across each row by the horizontal
//! fraction `t = (x - left) / (right - left)`.
//!
//! # Perspective-correct texturing
//!
//! U and V are not affine in screen space, but U/Z, V/Z and 1/Z are, using
//! the Z each vertex had before the perspective divide. The textured fill
//! interpolates those three terms and recovers `u = (u/z) / (1/z)` per pixel
//! before sampling, so textures do not swim on slanted faces.
//!
//! When a triangle is split, the shared row belongs to the flat-bottom half;
//! the flat-top fill starts one row below its flat edge. A triangle whose
//! three vertices land on one row paints nothing.

use std::mem;

use crate::color::{self, Rgb};
use crate::texture::Texture;
use crate::vertex::Vertex;

use super::PixelSink;

/// Fills a triangle with a single solid color.
///
/// # Arguments
///
/// * `vertices` - Screen-space corners, in any order
/// * `color` - Fill color for every covered pixel
/// * `sink` - Surface to paint into
pub fn fill_triangle_flat<S: PixelSink>(vertices: &[Vertex; 3], color: Rgb, sink: &mut S) {
    let mut v = *vertices;
    sort_by_screen_y(&mut v);

    if v[1].screen_y() == v[2].screen_y() {
        fill_flat_bottom_solid(&v[0], &v[1], &v[2], color, sink);
    } else if v[0].screen_y() == v[1].screen_y() {
        fill_flat_top_solid(&v[0], &v[1], &v[2], color, sink);
    } else {
        let t = split_fraction(&v);
        let split = split_position(&v, t);

        fill_flat_bottom_solid(&v[0], &v[1], &split, color, sink);
        fill_flat_top_solid(&v[1], &split, &v[2], color, sink);
    }
}

/// Fills a triangle by interpolating the three vertex colors.
///
/// Colors advance along the left and right edges per row and blend across
/// each row, which matches barycentric interpolation decomposed into two 1D
/// steps.
///
/// # Arguments
///
/// * `vertices` - Screen-space corners carrying lit vertex colors
/// * `sink` - Surface to paint into
pub fn fill_triangle_gouraud<S: PixelSink>(vertices: &[Vertex; 3], sink: &mut S) {
    let mut v = *vertices;
    sort_by_screen_y(&mut v);

    if v[1].screen_y() == v[2].screen_y() {
        fill_flat_bottom_gouraud(&v[0], &v[1], &v[2], sink);
    } else if v[0].screen_y() == v[1].screen_y() {
        fill_flat_top_gouraud(&v[0], &v[1], &v[2], sink);
    } else {
        let t = split_fraction(&v);
        let mut split = split_position(&v, t);
        let (r, g, b) = color::lerp_channels(v[0].color.channels(), v[2].color.channels(), t);
        split.color = Rgb::from_channels(r, g, b);

        fill_flat_bottom_gouraud(&v[0], &v[1], &split, sink);
        fill_flat_top_gouraud(&v[1], &split, &v[2], sink);
    }
}

/// Fills a triangle by sampling a texture with perspective correction.
///
/// Callers must have primed `u_over_z`, `v_over_z` and `z_reciprocal` on all
/// three vertices from their pre-projection depth. The split vertex re-derives
/// its terms from interpolated raw U, V and depth rather than interpolating
/// the ratios themselves.
///
/// # Arguments
///
/// * `vertices` - Screen-space corners with perspective terms primed
/// * `texture` - Indexed-color image to sample
/// * `sink` - Surface to paint into
pub fn fill_triangle_textured<S: PixelSink>(
    vertices: &[Vertex; 3],
    texture: &Texture,
    sink: &mut S,
) {
    let mut v = *vertices;
    sort_by_screen_y(&mut v);

    if v[1].screen_y() == v[2].screen_y() {
        fill_flat_bottom_textured(&v[0], &v[1], &v[2], texture, sink);
    } else if v[0].screen_y() == v[1].screen_y() {
        fill_flat_top_textured(&v[0], &v[1], &v[2], texture, sink);
    } else {
        let t = split_fraction(&v);
        let mut split = split_position(&v, t);

        let u = v[0].uv.int_u() as f32 + t * (v[2].uv.int_u() - v[0].uv.int_u()) as f32;
        let w = v[0].uv.int_v() as f32 + t * (v[2].uv.int_v() - v[0].uv.int_v()) as f32;
        let depth =
            v[0].pre_projection_z + t * (v[2].pre_projection_z - v[0].pre_projection_z);
        split.pre_projection_z = depth;
        split.u_over_z = u / depth;
        split.v_over_z = w / depth;
        split.z_reciprocal = 1.0 / depth;

        fill_flat_bottom_textured(&v[0], &v[1], &split, texture, sink);
        fill_flat_top_textured(&v[1], &split, &v[2], texture, sink);
    }
}

/// Sorts three vertices ascending by integer screen Y, keeping the incoming
/// order for ties. Three compare-and-swaps suffice.
fn sort_by_screen_y(v: &mut [Vertex; 3]) {
    if v[1].screen_y() < v[0].screen_y() {
        v.swap(0, 1);
    }
    if v[2].screen_y() < v[1].screen_y() {
        v.swap(1, 2);
    }
    if v[1].screen_y() < v[0].screen_y() {
        v.swap(0, 1);
    }
}

/// How far down the long edge (v0 to v2) the middle vertex's row sits.
fn split_fraction(v: &[Vertex; 3]) -> f32 {
    (v[1].screen_y() - v[0].screen_y()) as f32 / (v[2].screen_y() - v[0].screen_y()) as f32
}

/// The interpolated fourth vertex on the long edge at the middle row.
fn split_position(v: &[Vertex; 3], t: f32) -> Vertex {
    Vertex::new(
        v[0].screen_x() as f32 + t * (v[2].screen_x() - v[0].screen_x()) as f32,
        v[1].screen_y() as f32,
        1.0,
        1.0,
    )
}

/// Per-row color deltas along an edge spanning `dy` rows.
fn channel_slopes(from: Rgb, to: Rgb, dy: f32) -> (f32, f32, f32) {
    let (from_r, from_g, from_b) = from.channels();
    let (to_r, to_g, to_b) = to.channels();
    ((to_r - from_r) / dy, (to_g - from_g) / dy, (to_b - from_b) / dy)
}

/// Per-row deltas of the perspective terms (U/Z, V/Z, 1/Z) along an edge.
fn texel_slopes(from: &Vertex, to: &Vertex, dy: f32) -> (f32, f32, f32) {
    (
        (to.u_over_z - from.u_over_z) / dy,
        (to.v_over_z - from.v_over_z) / dy,
        (to.z_reciprocal - from.z_reciprocal) / dy,
    )
}

fn advance(values: &mut (f32, f32, f32), slope: (f32, f32, f32)) {
    values.0 += slope.0;
    values.1 += slope.1;
    values.2 += slope.2;
}

fn retreat(values: &mut (f32, f32, f32), slope: (f32, f32, f32)) {
    values.0 -= slope.0;
    values.1 -= slope.1;
    values.2 -= slope.2;
}

/// Fills a flat-bottom triangle: `v0` on top, `v1` and `v2` sharing the base
/// row. Rows run from the apex down to and including the base.
///
/// ```text
///      v0
///      /\
///     /  \
///    /____\
///  v1      v2
/// ```
fn fill_flat_bottom_solid<S: PixelSink>(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    color: Rgb,
    sink: &mut S,
) {
    if v0.screen_y() == v1.screen_y() {
        return;
    }

    let mut inv_slope_1 =
        (v1.screen_x() - v0.screen_x()) as f32 / (v1.screen_y() - v0.screen_y()) as f32;
    let mut inv_slope_2 =
        (v2.screen_x() - v0.screen_x()) as f32 / (v2.screen_y() - v0.screen_y()) as f32;

    // Edge 1 is the left boundary from here on.
    if inv_slope_2 < inv_slope_1 {
        mem::swap(&mut inv_slope_1, &mut inv_slope_2);
    }

    let mut x1 = v0.screen_x() as f32;
    let mut x2 = v0.screen_x() as f32 + 0.5;

    for y in v0.screen_y()..=v1.screen_y() {
        for x in (x1.ceil() as i32)..(x2.ceil() as i32) {
            sink.set_pixel(x, y, color);
        }

        x1 += inv_slope_1;
        x2 += inv_slope_2;
    }
}

/// Fills a flat-top triangle: `v0` and `v1` sharing the top row, `v2` below.
/// Rows run from the bottom apex up to but excluding the flat row, which the
/// flat-bottom half paints when a triangle was split.
///
/// ```text
///  v0 ______ v1
///     \    /
///      \  /
///       \/
///       v2
/// ```
fn fill_flat_top_solid<S: PixelSink>(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    color: Rgb,
    sink: &mut S,
) {
    if v0.screen_y() == v2.screen_y() {
        return;
    }

    let mut inv_slope_1 =
        (v2.screen_x() - v0.screen_x()) as f32 / (v2.screen_y() - v0.screen_y()) as f32;
    let mut inv_slope_2 =
        (v2.screen_x() - v1.screen_x()) as f32 / (v2.screen_y() - v1.screen_y()) as f32;

    // Walking upward, the left boundary needs the larger reciprocal slope.
    if inv_slope_1 < inv_slope_2 {
        mem::swap(&mut inv_slope_1, &mut inv_slope_2);
    }

    let mut x1 = v2.screen_x() as f32;
    let mut x2 = v2.screen_x() as f32 + 0.5;

    for y in ((v0.screen_y() + 1)..=v2.screen_y()).rev() {
        for x in (x1.ceil() as i32)..(x2.ceil() as i32) {
            sink.set_pixel(x, y, color);
        }

        x1 -= inv_slope_1;
        x2 -= inv_slope_2;
    }
}

/// Flat-bottom fill with per-vertex colors advanced along both edges.
fn fill_flat_bottom_gouraud<S: PixelSink>(v0: &Vertex, v1: &Vertex, v2: &Vertex, sink: &mut S) {
    if v0.screen_y() == v1.screen_y() {
        return;
    }

    let height_1 = (v1.screen_y() - v0.screen_y()) as f32;
    let height_2 = (v2.screen_y() - v0.screen_y()) as f32;

    let mut inv_slope_1 = (v1.screen_x() - v0.screen_x()) as f32 / height_1;
    let mut inv_slope_2 = (v2.screen_x() - v0.screen_x()) as f32 / height_2;
    let mut color_slope_1 = channel_slopes(v0.color, v1.color, height_1);
    let mut color_slope_2 = channel_slopes(v0.color, v2.color, height_2);

    if inv_slope_2 < inv_slope_1 {
        mem::swap(&mut inv_slope_1, &mut inv_slope_2);
        mem::swap(&mut color_slope_1, &mut color_slope_2);
    }

    let mut x1 = v0.screen_x() as f32;
    let mut x2 = v0.screen_x() as f32 + 0.5;
    let mut channels_1 = v0.color.channels();
    let mut channels_2 = v0.color.channels();

    for y in v0.screen_y()..=v1.screen_y() {
        for x in (x1.ceil() as i32)..(x2.ceil() as i32) {
            let t = (x as f32 - x1) / (x2 - x1);
            let (r, g, b) = color::lerp_channels(channels_1, channels_2, t);
            sink.set_pixel(x, y, Rgb::from_channels(r, g, b));
        }

        x1 += inv_slope_1;
        x2 += inv_slope_2;
        advance(&mut channels_1, color_slope_1);
        advance(&mut channels_2, color_slope_2);
    }
}

/// Flat-top fill with per-vertex colors, walking upward from the apex.
fn fill_flat_top_gouraud<S: PixelSink>(v0: &Vertex, v1: &Vertex, v2: &Vertex, sink: &mut S) {
    if v0.screen_y() == v2.screen_y() {
        return;
    }

    let height_1 = (v2.screen_y() - v0.screen_y()) as f32;
    let height_2 = (v2.screen_y() - v1.screen_y()) as f32;

    let mut inv_slope_1 = (v2.screen_x() - v0.screen_x()) as f32 / height_1;
    let mut inv_slope_2 = (v2.screen_x() - v1.screen_x()) as f32 / height_2;
    let mut color_slope_1 = channel_slopes(v0.color, v2.color, height_1);
    let mut color_slope_2 = channel_slopes(v1.color, v2.color, height_2);

    if inv_slope_1 < inv_slope_2 {
        mem::swap(&mut inv_slope_1, &mut inv_slope_2);
        mem::swap(&mut color_slope_1, &mut color_slope_2);
    }

    let mut x1 = v2.screen_x() as f32;
    let mut x2 = v2.screen_x() as f32 + 0.5;
    let mut channels_1 = v2.color.channels();
    let mut channels_2 = v2.color.channels();

    for y in ((v0.screen_y() + 1)..=v2.screen_y()).rev() {
        for x in (x1.ceil() as i32)..(x2.ceil() as i32) {
            let t = (x as f32 - x1) / (x2 - x1);
            let (r, g, b) = color::lerp_channels(channels_1, channels_2, t);
            sink.set_pixel(x, y, Rgb::from_channels(r, g, b));
        }

        x1 -= inv_slope_1;
        x2 -= inv_slope_2;
        retreat(&mut channels_1, color_slope_1);
        retreat(&mut channels_2, color_slope_2);
    }
}

/// Flat-bottom fill sampling a texture through interpolated U/Z, V/Z, 1/Z.
fn fill_flat_bottom_textured<S: PixelSink>(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    texture: &Texture,
    sink: &mut S,
) {
    if v0.screen_y() == v1.screen_y() {
        return;
    }

    let height_1 = (v1.screen_y() - v0.screen_y()) as f32;
    let height_2 = (v2.screen_y() - v0.screen_y()) as f32;

    let mut inv_slope_1 = (v1.screen_x() - v0.screen_x()) as f32 / height_1;
    let mut inv_slope_2 = (v2.screen_x() - v0.screen_x()) as f32 / height_2;
    let mut term_slope_1 = texel_slopes(v0, v1, height_1);
    let mut term_slope_2 = texel_slopes(v0, v2, height_2);

    if inv_slope_2 < inv_slope_1 {
        mem::swap(&mut inv_slope_1, &mut inv_slope_2);
        mem::swap(&mut term_slope_1, &mut term_slope_2);
    }

    let mut x1 = v0.screen_x() as f32;
    let mut x2 = v0.screen_x() as f32 + 0.5;
    let mut terms_1 = (v0.u_over_z, v0.v_over_z, v0.z_reciprocal);
    let mut terms_2 = (v0.u_over_z, v0.v_over_z, v0.z_reciprocal);

    for y in v0.screen_y()..=v1.screen_y() {
        for x in (x1.ceil() as i32)..(x2.ceil() as i32) {
            let t = (x as f32 - x1) / (x2 - x1);

            let u_over_z = terms_1.0 + (terms_2.0 - terms_1.0) * t;
            let v_over_z = terms_1.1 + (terms_2.1 - terms_1.1) * t;
            let z_recip = terms_1.2 + (terms_2.2 - terms_1.2) * t;

            let u = (u_over_z / z_recip) as i32;
            let v = (v_over_z / z_recip) as i32;
            sink.set_pixel(x, y, texture.sample(u, v));
        }

        x1 += inv_slope_1;
        x2 += inv_slope_2;
        advance(&mut terms_1, term_slope_1);
        advance(&mut terms_2, term_slope_2);
    }
}

/// Flat-top fill sampling a texture, walking upward from the apex.
fn fill_flat_top_textured<S: PixelSink>(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    texture: &Texture,
    sink: &mut S,
) {
    if v0.screen_y() == v2.screen_y() {
        return;
    }

    let height_1 = (v2.screen_y() - v0.screen_y()) as f32;
    let height_2 = (v2.screen_y() - v1.screen_y()) as f32;

    let mut inv_slope_1 = (v2.screen_x() - v0.screen_x()) as f32 / height_1;
    let mut inv_slope_2 = (v2.screen_x() - v1.screen_x()) as f32 / height_2;
    let mut term_slope_1 = texel_slopes(v0, v2, height_1);
    let mut term_slope_2 = texel_slopes(v1, v2, height_2);

    if inv_slope_1 < inv_slope_2 {
        mem::swap(&mut inv_slope_1, &mut inv_slope_2);
        mem::swap(&mut term_slope_1, &mut term_slope_2);
    }

    let mut x1 = v2.screen_x() as f32;
    let mut x2 = v2.screen_x() as f32 + 0.5;
    let mut terms_1 = (v2.u_over_z, v2.v_over_z, v2.z_reciprocal);
    let mut terms_2 = (v2.u_over_z, v2.v_over_z, v2.z_reciprocal);

    for y in ((v0.screen_y() + 1)..=v2.screen_y()).rev() {
        for x in (x1.ceil() as i32)..(x2.ceil() as i32) {
            let t = (x as f32 - x1) / (x2 - x1);

            let u_over_z = terms_1.0 + (terms_2.0 - terms_1.0) * t;
            let v_over_z = terms_1.1 + (terms_2.1 - terms_1.1) * t;
            let z_recip = terms_1.2 + (terms_2.2 - terms_1.2) * t;

            let u = (u_over_z / z_recip) as i32;
            let v = (v_over_z / z_recip) as i32;
            sink.set_pixel(x, y, texture.sample(u, v));
        }

        x1 -= inv_slope_1;
        x2 -= inv_slope_2;
        retreat(&mut terms_1, term_slope_1);
        retreat(&mut terms_2, term_slope_2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::UvCoord;
    use std::collections::HashSet;

    struct Recorder {
        pixels: Vec<(i32, i32, Rgb)>,
    }

    impl Recorder {
        fn new() -> Self {
            Self { pixels: Vec::new() }
        }

        fn row(&self, y: i32) -> Vec<i32> {
            let mut xs: Vec<i32> = self
                .pixels
                .iter()
                .filter(|p| p.1 == y)
                .map(|p| p.0)
                .collect();
            xs.sort_unstable();
            xs
        }
    }

    impl PixelSink for Recorder {
        fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
            self.pixels.push((x, y, color));
        }
    }

    fn screen_vertex(x: f32, y: f32) -> Vertex {
        Vertex::point(x, y, 0.0)
    }

    #[test]
    fn right_triangle_fills_expected_spans() {
        let vertices = [
            screen_vertex(0.0, 0.0),
            screen_vertex(0.0, 4.0),
            screen_vertex(4.0, 4.0),
        ];
        let mut sink = Recorder::new();

        fill_triangle_flat(&vertices, Rgb::CYAN, &mut sink);

        assert_eq!(sink.row(0), vec![0]);
        assert_eq!(sink.row(1), vec![0, 1]);
        assert_eq!(sink.row(2), vec![0, 1, 2]);
        assert_eq!(sink.row(3), vec![0, 1, 2, 3]);
        assert_eq!(sink.row(4), vec![0, 1, 2, 3, 4]);
        assert_eq!(sink.pixels.len(), 15);
        assert!(sink.pixels.iter().all(|p| p.2 == Rgb::CYAN));
    }

    #[test]
    fn general_triangle_splits_without_painting_any_pixel_twice() {
        let vertices = [
            screen_vertex(1.0, 1.0),
            screen_vertex(6.0, 3.0),
            screen_vertex(3.0, 6.0),
        ];
        let mut sink = Recorder::new();

        fill_triangle_flat(&vertices, Rgb::WHITE, &mut sink);

        assert_eq!(sink.row(1), vec![1]);
        assert_eq!(sink.row(2), vec![1, 2, 3]);
        assert_eq!(sink.row(3), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(sink.row(4), vec![2, 3, 4, 5]);
        assert_eq!(sink.row(5), vec![3, 4]);
        assert_eq!(sink.row(6), vec![3]);

        let distinct: HashSet<(i32, i32)> =
            sink.pixels.iter().map(|p| (p.0, p.1)).collect();
        assert_eq!(distinct.len(), sink.pixels.len());
        assert_eq!(sink.pixels.len(), 17);
    }

    #[test]
    fn zero_height_triangle_paints_nothing() {
        let vertices = [
            screen_vertex(0.0, 0.0),
            screen_vertex(10.0, 0.0),
            screen_vertex(5.0, 0.0),
        ];
        let mut sink = Recorder::new();

        fill_triangle_flat(&vertices, Rgb::WHITE, &mut sink);
        fill_triangle_gouraud(&vertices, &mut sink);

        assert!(sink.pixels.is_empty());
    }

    #[test]
    fn flat_top_triangle_leaves_its_top_row_unpainted() {
        let vertices = [
            screen_vertex(0.0, 0.0),
            screen_vertex(6.0, 0.0),
            screen_vertex(3.0, 3.0),
        ];
        let mut sink = Recorder::new();

        fill_triangle_flat(&vertices, Rgb::WHITE, &mut sink);

        assert_eq!(sink.row(0), Vec::<i32>::new());
        assert_eq!(sink.row(1), vec![1, 2, 3, 4, 5]);
        assert_eq!(sink.row(2), vec![2, 3, 4]);
        assert_eq!(sink.row(3), vec![3]);
    }

    #[test]
    fn gouraud_interpolates_down_the_edges() {
        let mut top = screen_vertex(0.0, 0.0);
        top.color = Rgb::new(0, 0, 0);
        let mut base_left = screen_vertex(0.0, 10.0);
        base_left.color = Rgb::new(200, 0, 0);
        let mut base_right = screen_vertex(10.0, 10.0);
        base_right.color = Rgb::new(200, 0, 0);

        let mut sink = Recorder::new();
        fill_triangle_gouraud(&[top, base_left, base_right], &mut sink);

        // Both edges carry the same gradient, 20 red per row.
        let pixel = |x, y| {
            sink.pixels
                .iter()
                .find(|p| p.0 == x && p.1 == y)
                .map(|p| p.2)
        };
        assert_eq!(pixel(0, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(pixel(2, 5), Some(Rgb::new(100, 0, 0)));
        assert_eq!(pixel(5, 10), Some(Rgb::new(200, 0, 0)));
    }

    #[test]
    fn gouraud_interpolates_across_a_row() {
        let mut top = screen_vertex(0.0, 0.0);
        top.color = Rgb::new(0, 0, 0);
        let mut base_left = screen_vertex(0.0, 8.0);
        base_left.color = Rgb::new(0, 0, 0);
        let mut base_right = screen_vertex(8.0, 8.0);
        base_right.color = Rgb::new(88, 0, 0);

        let mut sink = Recorder::new();
        fill_triangle_gouraud(&[top, base_left, base_right], &mut sink);

        // Base row spans x = 0..8 with red rising from 0 toward 88; the
        // right tracker sits at 8.5 so the last pixel lands at 88 * (8/8.5).
        let pixel = |x, y| {
            sink.pixels
                .iter()
                .find(|p| p.0 == x && p.1 == y)
                .map(|p| p.2)
        };
        assert_eq!(pixel(0, 8), Some(Rgb::new(0, 0, 0)));
        assert_eq!(pixel(4, 8), Some(Rgb::new(41, 0, 0)));
        assert_eq!(pixel(8, 8), Some(Rgb::new(82, 0, 0)));

        let base_row: Vec<Rgb> = {
            let mut row: Vec<(i32, Rgb)> = sink
                .pixels
                .iter()
                .filter(|p| p.1 == 8)
                .map(|p| (p.0, p.2))
                .collect();
            row.sort_unstable_by_key(|p| p.0);
            row.into_iter().map(|p| p.1).collect()
        };
        assert!(base_row.windows(2).all(|pair| pair[0].r <= pair[1].r));
    }

    /// Signed perpendicular distance (in pixels) from (px, py) to the edge
    /// from `a` to `b`; positive on the left of the edge.
    fn edge_distance(a: (f32, f32), b: (f32, f32), px: f32, py: f32) -> f32 {
        let area = (b.0 - a.0) * (py - a.1) - (b.1 - a.1) * (px - a.0);
        area / ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
    }

    /// Whether the pixel center is inside the triangle shrunk (positive
    /// `margin`) or grown (negative) by that many pixels, winding-agnostic.
    fn inside(corners: &[(f32, f32); 3], px: i32, py: i32, margin: f32) -> bool {
        let (x, y) = (px as f32, py as f32);
        let e0 = edge_distance(corners[0], corners[1], x, y);
        let e1 = edge_distance(corners[1], corners[2], x, y);
        let e2 = edge_distance(corners[2], corners[0], x, y);
        let all_left = e0 >= margin && e1 >= margin && e2 >= margin;
        let all_right = e0 <= -margin && e1 <= -margin && e2 <= -margin;
        all_left || all_right
    }

    #[test]
    fn split_fill_agrees_with_point_in_triangle_reference() {
        // Triangles that exercise both split orders, shallow and steep
        // edges, and an already-flat case.
        let triangles = [
            [(3.0, 2.0), (17.0, 9.0), (8.0, 19.0)],
            [(15.0, 1.0), (2.0, 12.0), (18.0, 18.0)],
            [(1.0, 5.0), (19.0, 5.0), (10.0, 17.0)],
            [(9.0, 1.0), (3.0, 14.0), (16.0, 8.0)],
        ];

        for corners in triangles {
            let vertices = [
                screen_vertex(corners[0].0, corners[0].1),
                screen_vertex(corners[1].0, corners[1].1),
                screen_vertex(corners[2].0, corners[2].1),
            ];
            let mut sink = Recorder::new();
            fill_triangle_flat(&vertices, Rgb::WHITE, &mut sink);

            let painted: HashSet<(i32, i32)> =
                sink.pixels.iter().map(|p| (p.0, p.1)).collect();
            let min_y = corners.iter().map(|c| c.1 as i32).min().unwrap();
            let max_y = corners.iter().map(|c| c.1 as i32).max().unwrap();

            // Compare rows strictly between the triangle's extremes; edge
            // pixels stay out of the comparison via the margin.
            for y in (min_y + 1)..max_y {
                for x in 0..24 {
                    if inside(&corners, x, y, 1.0) {
                        assert!(
                            painted.contains(&(x, y)),
                            "interior pixel ({x}, {y}) missing in {corners:?}"
                        );
                    }
                    if painted.contains(&(x, y)) {
                        assert!(
                            inside(&corners, x, y, -1.0),
                            "painted pixel ({x}, {y}) outside {corners:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn textured_fill_clamps_out_of_range_coordinates() {
        let texel = Rgb::new(9, 131, 247);
        let texture = Texture::new(1, 1, vec![texel], vec![0]).unwrap();

        // Far out-of-range UVs and differing depths: every recovered (u, v)
        // clamps onto the single texel.
        let mut vertices = [
            screen_vertex(1.0, 1.0),
            screen_vertex(6.0, 3.0),
            screen_vertex(3.0, 6.0),
        ];
        for (vertex, depth) in vertices.iter_mut().zip([1.0f32, 2.0, 4.0]) {
            vertex.uv = UvCoord::new(1000.0, 1000.0);
            vertex.pre_projection_z = depth;
            vertex.u_over_z = 1000.0 / depth;
            vertex.v_over_z = 1000.0 / depth;
            vertex.z_reciprocal = 1.0 / depth;
        }

        let mut sink = Recorder::new();
        fill_triangle_textured(&vertices, &texture, &mut sink);

        assert_eq!(sink.pixels.len(), 17);
        assert!(sink.pixels.iter().all(|p| p.2 == texel));
    }
}
