//! L4 Atomic Layer: ordered 2D transforms
//!
//! A `Transform` is an ordered list of operations, read left to right like a
//! CSS transform list. The composed matrix is `op[0] · op[1] · … · op[n]`, so
//! the last operation is applied to a point first. Reordering the list
//! changes the result.

use std::fmt;

/// A single transform operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate { x: f64, y: f64 },
    Scale(f64),
    /// Horizontal shear in degrees
    SkewX(f64),
}

impl TransformOp {
    /// Matrix of this single operation
    pub fn matrix(&self) -> Affine {
        match *self {
            TransformOp::Translate { x, y } => Affine::new(1.0, 0.0, 0.0, 1.0, x, y),
            TransformOp::Scale(s) => Affine::new(s, 0.0, 0.0, s, 0.0, 0.0),
            TransformOp::SkewX(deg) => Affine::new(1.0, 0.0, deg.to_radians().tan(), 1.0, 0.0, 0.0),
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOp::Translate { x, y } => write!(f, "translate({:.2}px, {:.2}px)", x, y),
            TransformOp::Scale(s) => write!(f, "scale({:.4})", s),
            TransformOp::SkewX(deg) => write!(f, "skewX({:.3}deg)", deg),
        }
    }
}

/// 2D affine matrix in CSS `matrix(a, b, c, d, e, f)` layout
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// `self · other`
    pub fn then_apply(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Map a point through the matrix
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }
}

/// Ordered transform list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transform {
    ops: Vec<TransformOp>,
}

impl Transform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            ops: vec![TransformOp::Translate { x, y }],
        }
    }

    /// Scroll container transform: translate, then scale, then skew
    pub fn container(scroll_x: f64, zoom: f64, skew_deg: f64) -> Self {
        Self {
            ops: vec![
                TransformOp::Translate { x: -scroll_x, y: 0.0 },
                TransformOp::Scale(zoom),
                TransformOp::SkewX(skew_deg),
            ],
        }
    }

    /// Append an operation at the end of the list
    pub fn then(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Horizontal translation of the first translate op, if any
    pub fn translate_x(&self) -> Option<f64> {
        self.ops.iter().find_map(|op| match op {
            TransformOp::Translate { x, .. } => Some(*x),
            _ => None,
        })
    }

    /// Composed matrix of the whole list
    pub fn matrix(&self) -> Affine {
        self.ops
            .iter()
            .fold(Affine::IDENTITY, |acc, op| acc.then_apply(&op.matrix()))
    }

    /// CSS-style transform string
    pub fn to_css(&self) -> String {
        if self.ops.is_empty() {
            return "none".to_string();
        }
        self.ops
            .iter()
            .map(|op| op.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_container_order_and_css() {
        let t = Transform::container(120.0, 1.25, 0.5);
        assert_eq!(
            t.ops(),
            &[
                TransformOp::Translate { x: -120.0, y: 0.0 },
                TransformOp::Scale(1.25),
                TransformOp::SkewX(0.5),
            ]
        );
        assert_eq!(
            t.to_css(),
            "translate(-120.00px, 0.00px) scale(1.2500) skewX(0.500deg)"
        );
    }

    #[test]
    fn test_translate_then_scale_differs_from_scale_then_translate() {
        let ts = Transform::translate(-100.0, 0.0).then(TransformOp::Scale(1.5));
        let st = Transform::identity()
            .then(TransformOp::Scale(1.5))
            .then(TransformOp::Translate { x: -100.0, y: 0.0 });

        assert!(close(ts.matrix().map_point(10.0, 0.0), (-85.0, 0.0)));
        assert!(close(st.matrix().map_point(10.0, 0.0), (-135.0, 0.0)));
    }

    #[test]
    fn test_skew_is_applied_before_scale_and_translate() {
        let t = Transform::container(100.0, 1.5, 45.0);
        // skew shifts x by y·tan(45°) = 10, scale → 15, translate → -85
        assert!(close(t.matrix().map_point(0.0, 10.0), (-85.0, 15.0)));
    }

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert!(t.is_identity());
        assert_eq!(t.to_css(), "none");
        assert_eq!(t.matrix(), Affine::IDENTITY);
        assert_eq!(t.translate_x(), None);
    }

    #[test]
    fn test_translate_x() {
        assert_eq!(Transform::container(40.0, 1.0, 0.0).translate_x(), Some(-40.0));
    }
}
