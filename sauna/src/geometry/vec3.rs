use super::Vector3;

/// A point or vector in the plugin's 3D space.
///
/// The coordinate system is right-handed, with the positive x-axis pointing right, the positive
/// y-axis pointing forward, and the positive z-axis pointing up.
/// Use [`Self::to_steam`] and [`Vec3::from`] to move between this convention and the one expected
/// by the spatialization backend.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// Right.
    pub x: f32,

    /// Forward.
    pub y: f32,

    /// Up.
    pub z: f32,
}

impl Vec3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 0.0, 1.0);
    pub const DOWN: Self = Self::new(0.0, 0.0, -1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point on the unit circle of the horizontal plane at angle `theta` (radians).
    pub fn rotation_2d(theta: f32) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(cos, sin, 0.0)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns a unit vector with the same direction.
    ///
    /// The zero vector has no direction and is returned unchanged.
    pub fn normalized(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            self
        } else {
            self / magnitude
        }
    }

    /// Whether this is exactly the zero vector.
    pub fn is_origin(self) -> bool {
        self == Self::ORIGIN
    }

    /// Rotates around the z-axis by `angle` radians, counter-clockwise seen from above.
    pub fn rotate_z(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    /// Rotates around the unit vector `axis` by `angle` radians (Rodrigues' rotation formula).
    pub fn axis_angle_rotate(self, axis: Self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let k_cross_v = axis.cross(self);
        self + k_cross_v * sin + axis.cross(k_cross_v) * (1.0 - cos)
    }

    /// Converts to the backend's convention (x right, y up, z backward).
    pub const fn to_steam(self) -> Vector3 {
        Vector3::new(self.x, self.z, -self.y)
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Vector3> for Vec3 {
    fn from(vector: Vector3) -> Self {
        Self::new(vector.x, -vector.z, vector.y)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(vector: [f32; 3]) -> Self {
        Self::new(vector[0], vector[1], vector[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(vector: Vec3) -> Self {
        vector.to_array()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, scalar: f32) {
        *self = *self * scalar;
    }
}

impl std::ops::Div<f32> for Vec3 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::DivAssign<f32> for Vec3 {
    fn div_assign(&mut self, scalar: f32) {
        *self = *self / scalar;
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
