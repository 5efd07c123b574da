//! Tray icon generation.

use tray_icon::Icon;

/// Builds an amber dot icon in memory, so no .ico file ships with the
/// binary.
pub fn create_tray_icon() -> Result<Icon, Box<dyn std::error::Error>> {
    let size = 32u32;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);

    let center = size as f32 / 2.0;
    let radius = center - 2.0;
    let rim = radius - 4.0;

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let distance = (dx * dx + dy * dy).sqrt();

            if distance > radius {
                // Outside - transparent
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            } else if distance > rim {
                // Dark rim
                rgba.extend_from_slice(&[60, 45, 20, 255]);
            } else {
                // Amber fill, darkening toward the rim
                let t = distance / rim;
                let r = (250.0 - t * 40.0) as u8;
                let g = (170.0 - t * 40.0) as u8;
                rgba.extend_from_slice(&[r, g, 30, 255]);
            }
        }
    }

    Ok(Icon::from_rgba(rgba, size, size)?)
}
