//! Raster pen strokes painted straight into an RGBA buffer.
//!
//! A segment is drawn by stamping filled discs along it, one per pixel step.
//! Overlapping discs give round caps and round joins for free.

use eframe::egui::{Color32, Pos2};
use image::RgbaImage;

fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Color32) {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 0 {
        return;
    }
    if a == 255 {
        img.put_pixel(x, y, image::Rgba([r, g, b, 255]));
        return;
    }
    let dst = img.get_pixel(x, y).0;
    let src_a = a as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let blend = |src: u8, dst: u8| {
        let src_f = src as f32 / 255.0;
        let dst_f = dst as f32 / 255.0;
        ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    img.put_pixel(
        x,
        y,
        image::Rgba([
            blend(r, dst[0]),
            blend(g, dst[1]),
            blend(b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]),
    );
}

/// Fill every pixel whose index lies within `radius` of `center`.
fn draw_disc(img: &mut RgbaImage, center: Pos2, radius: f32, color: Color32) {
    if radius <= 0.0 || img.width() == 0 || img.height() == 0 {
        return;
    }
    let radius_sq = radius * radius;
    let max_x = img.width() as i64 - 1;
    let max_y = img.height() as i64 - 1;
    let min_x = ((center.x - radius).floor() as i64).max(0);
    let min_y = ((center.y - radius).floor() as i64).max(0);
    let hi_x = ((center.x + radius).ceil() as i64).min(max_x);
    let hi_y = ((center.y + radius).ceil() as i64).min(max_y);
    for y in min_y..=hi_y {
        for x in min_x..=hi_x {
            let dx = x as f32 - center.x;
            let dy = y as f32 - center.y;
            if dx * dx + dy * dy <= radius_sq {
                blend_pixel(img, x as u32, y as u32, color);
            }
        }
    }
}

/// Paint a solid line of `width` pixels from `start` to `end`.
pub fn draw_segment(img: &mut RgbaImage, start: Pos2, end: Pos2, color: Color32, width: u32) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
    let radius = (width as f32 / 2.0).max(0.5);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let point = Pos2::new(start.x + dx * t, start.y + dy * t);
        draw_disc(img, point, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn single_pixel_width_hits_the_pixel_under_the_point() {
        let mut img = white(10, 10);
        draw_segment(&mut img, Pos2::new(4.0, 4.0), Pos2::new(4.0, 4.0), Color32::RED, 1);
        assert_eq!(img.get_pixel(4, 4).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(5, 4).0, [255, 255, 255, 255]);
    }

    #[test]
    fn horizontal_segment_covers_both_ends_with_round_caps() {
        let mut img = white(30, 20);
        draw_segment(&mut img, Pos2::new(5.0, 10.0), Pos2::new(20.0, 10.0), Color32::BLUE, 5);
        for x in 5..=20 {
            assert_eq!(img.get_pixel(x, 10).0, [0, 0, 255, 255], "x = {x}");
        }
        // cap extends past the end point by the radius
        assert_eq!(img.get_pixel(22, 10).0, [0, 0, 255, 255]);
        // but the corner of the bounding box stays untouched
        assert_eq!(img.get_pixel(22, 8).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(12, 14).0, [255, 255, 255, 255]);
    }

    #[test]
    fn segments_outside_the_buffer_are_clipped() {
        let mut img = white(8, 8);
        draw_segment(&mut img, Pos2::new(-50.0, -50.0), Pos2::new(-10.0, 200.0), Color32::RED, 3);
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
        draw_segment(&mut img, Pos2::new(-5.0, 3.0), Pos2::new(50.0, 3.0), Color32::RED, 1);
        assert!((0..8).all(|x| img.get_pixel(x, 3).0 == [255, 0, 0, 255]));
    }

    #[test]
    fn translucent_color_blends() {
        let mut img = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
        let half_white = Color32::from_rgba_unmultiplied(255, 255, 255, 128);
        draw_segment(&mut img, Pos2::new(1.0, 1.0), Pos2::new(1.0, 1.0), half_white, 1);
        let p = img.get_pixel(1, 1).0;
        assert_eq!(p[3], 255);
        assert!(p[0] > 100 && p[0] < 160);
    }
}
