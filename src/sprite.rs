//! Procedural point-sprite bitmap.

pub const SPRITE_SIZE: u32 = 64;

/// White RGBA bitmap whose alpha falls off as `1 - d²` with the normalized distance `d`
/// from the center, reaching zero at the inscribed circle.
pub fn soft_circle(size: u32) -> Vec<u8> {
    let half = size as f32 / 2.;
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .flat_map(|(x, y)| {
            let dx = (x as f32 - half) / half;
            let dy = (y as f32 - half) / half;
            let dist = (dx * dx + dy * dy).sqrt().min(1.);
            let alpha = (255. * (1. - dist * dist)) as u8;
            [255, 255, 255, alpha]
        })
        .collect()
}
