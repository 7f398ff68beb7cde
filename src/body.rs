use nalgebra::Vector3;

/// Color every generated body is given (light gray).
pub const BODY_COLOR: [u8; 3] = [200, 200, 200];

/// Key under which the body with the given ordinal index is stored.
pub fn body_key(index: usize) -> String {
    format!("body{index}")
}

/// A single body of a system description.
///
/// Bodies have no identity besides their position in the system,
/// see [`body_key()`].
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub name: String,
    pub mass: f64,
    pub density: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub color: [u8; 3],
}

impl Body {
    /// Create a body with the default name `Body {index}` and [`BODY_COLOR`].
    pub fn new(
        index: usize,
        mass: f64,
        density: f64,
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    ) -> Self {
        Self {
            name: format!("Body {index}"),
            mass,
            density,
            position,
            velocity,
            color: BODY_COLOR,
        }
    }
}

/// Sampled attributes of a collection of bodies.
///
/// Struct-of-arrays layout, so that the positions, velocities and masses
/// can be handed to histograms and statistics directly.
#[derive(Clone, Debug, Default)]
pub struct BodySamples {
    pub positions: Vec<Vector3<f64>>,
    pub velocities: Vec<Vector3<f64>>,
    pub masses: Vec<f64>,
}

impl BodySamples {
    #[must_use]
    pub fn new(
        positions: Vec<Vector3<f64>>,
        velocities: Vec<Vector3<f64>>,
        masses: Vec<f64>,
    ) -> Self {
        let len = masses.len();
        assert_eq!(len, positions.len());
        assert_eq!(len, velocities.len());

        Self {
            positions,
            velocities,
            masses,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// All position components, pooled across the three axes.
    pub fn position_components(&self) -> impl Iterator<Item = f64> + '_ {
        self.positions.iter().flat_map(|p| p.iter().copied())
    }

    /// All velocity components, pooled across the three axes.
    pub fn velocity_components(&self) -> impl Iterator<Item = f64> + '_ {
        self.velocities.iter().flat_map(|v| v.iter().copied())
    }

    /// Turn the samples into bodies sharing one density, in ordinal order.
    pub fn into_bodies(self, density: f64) -> Vec<Body> {
        self.masses
            .into_iter()
            .zip(self.positions)
            .zip(self.velocities)
            .enumerate()
            .map(|(i, ((m, p), v))| Body::new(i, m, density, p, v))
            .collect()
    }
}
