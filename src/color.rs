use smart_leds::RGB8;

pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
pub const ORANGE: RGB8 = RGB8 {
    r: 255,
    g: 165,
    b: 0,
};
pub const ORANGE_RED: RGB8 = RGB8 { r: 255, g: 69, b: 0 };
pub const YELLOW: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 0,
};
pub const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

/// Flame colours, red through yellow-orange.
pub const FLAME: [RGB8; 6] = [
    RED,
    ORANGE_RED,
    RGB8 {
        r: 255,
        g: 140,
        b: 0,
    },
    ORANGE,
    RGB8 {
        r: 255,
        g: 200,
        b: 0,
    },
    RGB8 {
        r: 255,
        g: 220,
        b: 50,
    },
];

/// Clamp a wide intermediate value into a colour channel.
pub fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Multiply every channel by `factor`, truncating. Factors outside 0..=1 are clamped.
pub fn dim(c: RGB8, factor: f32) -> RGB8 {
    let f = factor.clamp(0.0, 1.0);
    RGB8::new(
        (c.r as f32 * f) as u8,
        (c.g as f32 * f) as u8,
        (c.b as f32 * f) as u8,
    )
}

/// Scale every channel by `level / 255`.
pub fn scale(c: RGB8, level: u8) -> RGB8 {
    let l = level as u16;
    RGB8::new(
        (c.r as u16 * l / 255) as u8,
        (c.g as u16 * l / 255) as u8,
        (c.b as u16 * l / 255) as u8,
    )
}

/// Linear interpolation between two colours, `progress` in 0.0..=1.0.
pub fn lerp(start: RGB8, end: RGB8, progress: f32) -> RGB8 {
    let p = progress.clamp(0.0, 1.0);
    let ch = |a: u8, b: u8| clamp_channel((a as f32 + (b as f32 - a as f32) * p) as i32);
    RGB8::new(ch(start.r, end.r), ch(start.g, end.g), ch(start.b, end.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_channel_saturates() {
        assert_eq!(clamp_channel(-40), 0);
        assert_eq!(clamp_channel(128), 128);
        assert_eq!(clamp_channel(300), 255);
    }

    #[test]
    fn dim_halves_palette_entry() {
        assert_eq!(dim(ORANGE, 0.5), RGB8::new(127, 82, 0));
        assert_eq!(dim(RED, 0.3), RGB8::new(76, 0, 0));
        assert_eq!(dim(WHITE, 2.0), WHITE);
    }

    #[test]
    fn scale_by_level() {
        assert_eq!(scale(WHITE, 255), WHITE);
        assert_eq!(scale(WHITE, 0), BLACK);
        assert_eq!(scale(RGB8::new(200, 100, 50), 128), RGB8::new(100, 50, 25));
    }

    #[test]
    fn lerp_endpoints_and_middle() {
        assert_eq!(lerp(BLACK, WHITE, 0.0), BLACK);
        assert_eq!(lerp(BLACK, WHITE, 1.0), WHITE);
        assert_eq!(lerp(RED, YELLOW, 0.5), RGB8::new(255, 127, 0));
        assert_eq!(lerp(YELLOW, RED, 0.5), RGB8::new(255, 127, 0));
    }
}
