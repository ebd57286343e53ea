// Simple color struct. The hue comes from an unsigned 32 representing RRGGBBAA,
// alpha is kept as a float so particles can carry any opacity in [0, 1]

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = (num & 0xff) as f64 / 255.0;

        Color { r, g, b, a }
    }

    // Same hue, different opacity. Used for the per-particle alpha and
    // for connection lines that fade with distance
    pub fn with_alpha(self, alpha: f64) -> Color {
        Color {
            a: alpha.max(0.0).min(1.0),
            ..self
        }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
