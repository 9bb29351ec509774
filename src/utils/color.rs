/// A RGBA `Color`. Each color component is a floating point value
/// with a range from 0 to 1.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    /// Clip to [0.0, 1.0] range.
    pub fn clip(&self) -> Color {
        Color(
            clamp(self.0, 0.0, 1.0),
            clamp(self.1, 0.0, 1.0),
            clamp(self.2, 0.0, 1.0),
            clamp(self.3, 0.0, 1.0),
        )
    }

    pub fn black() -> Self {
        Color(0.0, 0.0, 0.0, 1.0)
    }

    pub fn white() -> Self {
        Color(1.0, 1.0, 1.0, 1.0)
    }
}

fn clamp(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clip() {
        let color = Color(-1.0, 0.5, 2.0, 1.0).clip();
        assert_eq!(color, Color(0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn black_is_opaque() {
        assert_eq!(Color::black(), Color(0.0, 0.0, 0.0, 1.0));
    }
}
