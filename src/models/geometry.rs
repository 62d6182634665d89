use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: i64,
    pub height: i64,
}

impl Dimensions {
    /// Per-axis maximum of two footprints.
    pub fn max(self, other: Dimensions) -> Dimensions {
        Dimensions {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// Position of a child relative to its parent's origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i64,
    pub dy: i64,
}

impl Offset {
    pub fn translate(self, by: Offset) -> Offset {
        Offset {
            dx: self.dx + by.dx,
            dy: self.dy + by.dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_is_per_axis() {
        let a = Dimensions { width: 10, height: 50 };
        let b = Dimensions { width: 30, height: 20 };
        assert_eq!(a.max(b), Dimensions { width: 30, height: 50 });
    }

    #[test]
    fn translate_adds_components() {
        let o = Offset { dx: 5, dy: 7 }.translate(Offset { dx: -2, dy: 3 });
        assert_eq!(o, Offset { dx: 3, dy: 10 });
    }
}
