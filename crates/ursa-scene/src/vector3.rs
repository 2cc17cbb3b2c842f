use core::f64::consts::TAU;

/// Mutable 3D point/vector.
///
/// All operations mutate in place and return `&mut Self` so calls chain:
///
/// ```
/// use ursa_scene::Vector3;
///
/// let mut v = Vector3::new(1.0, 0.0, 0.0);
/// v.multiply(Vector3::new(2.0, 1.0, 1.0)).add(Vector3::new(0.0, 1.0, 0.0));
/// assert_eq!(v, Vector3::new(2.0, 1.0, 0.0));
/// ```
///
/// Arguments accept either a `Vector3` or `None`. A missing argument makes
/// `add`, `multiply` and `rotate` no-ops; `set(None)` resets to the origin.
/// NaN axes are sanitized to `0` on `set`, `add` and `multiply`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    #[inline]
    pub const fn yz(y: f64, z: f64) -> Self {
        Self::new(0.0, y, z)
    }

    #[inline]
    pub const fn xz(x: f64, z: f64) -> Self {
        Self::new(x, 0.0, z)
    }

    /// Returns a copy with every NaN axis replaced by `0`.
    #[inline]
    pub fn sanitized(self) -> Self {
        Self::new(zero_nan(self.x), zero_nan(self.y), zero_nan(self.z))
    }

    pub fn set(&mut self, point: impl Into<Option<Vector3>>) -> &mut Self {
        *self = point.into().unwrap_or_default().sanitized();
        self
    }

    /// Applies Z, then Y, then X rotation. The order is part of the contract.
    pub fn rotate(&mut self, rotation: impl Into<Option<Vector3>>) -> &mut Self {
        let Some(r) = rotation.into() else { return self };
        self.rotate_z(r.z).rotate_y(r.y).rotate_x(r.x)
    }

    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        if let Some((y, z)) = rotate_pair(self.y, self.z, angle) {
            self.y = y;
            self.z = z;
        }
        self
    }

    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        if let Some((x, z)) = rotate_pair(self.x, self.z, angle) {
            self.x = x;
            self.z = z;
        }
        self
    }

    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        if let Some((x, y)) = rotate_pair(self.x, self.y, angle) {
            self.x = x;
            self.y = y;
        }
        self
    }

    pub fn add(&mut self, v: impl Into<Option<Vector3>>) -> &mut Self {
        let Some(v) = v.into() else { return self };
        let v = v.sanitized();
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
        self
    }

    /// Component-wise scale.
    pub fn multiply(&mut self, v: impl Into<Option<Vector3>>) -> &mut Self {
        let Some(v) = v.into() else { return self };
        let v = v.sanitized();
        self.x *= v.x;
        self.y *= v.y;
        self.z *= v.z;
        self
    }

    /// Moves toward `target` by `t`. `t` is not clamped.
    pub fn lerp(&mut self, target: impl Into<Option<Vector3>>, t: f64) -> &mut Self {
        let Some(target) = target.into() else { return self };
        self.x = lerp(self.x, target.x, t);
        self.y = lerp(self.y, target.y, t);
        self.z = lerp(self.z, target.z, t);
        self
    }
}

/// Scalar linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a) * t + a
}

/// Euclidean-style modulo: non-negative for a positive `div`.
#[inline]
pub fn modulo(num: f64, div: f64) -> f64 {
    ((num % div) + div) % div
}

#[inline]
fn zero_nan(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}

/// Rotates `(a, b)` by `angle`; `None` when the angle is a whole number of turns.
#[inline]
fn rotate_pair(a: f64, b: f64, angle: f64) -> Option<(f64, f64)> {
    if angle % TAU == 0.0 {
        return None;
    }
    let (sin, cos) = angle.sin_cos();
    Some((a * cos - b * sin, b * cos + a * sin))
}
