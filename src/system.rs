use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::body::{body_key, Body};

/// Gravitational constant written into generated systems (unrealistic units).
pub const GRAVITY: f64 = 10.0;

/// Simulation time step written into generated systems (seconds).
pub const TIME_STEP: f64 = 0.004;

/// Initial state and global constants of one simulated system.
///
/// The [`Display`] implementation renders the `.properties` layout the
/// simulator reads: global keys first, then one section per body keyed
/// `body{i}` in ordinal order.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemDescription {
    pub name: String,
    pub gravity: f64,
    pub time_step: f64,
    pub bodies: Vec<Body>,
}

impl SystemDescription {
    /// A system with the fixed simulation constants [`GRAVITY`] and [`TIME_STEP`].
    pub fn new(name: impl Into<String>, bodies: Vec<Body>) -> Self {
        Self {
            name: name.into(),
            gravity: GRAVITY,
            time_step: TIME_STEP,
            bodies,
        }
    }

    pub fn body_keys(&self) -> Vec<String> {
        (0..self.bodies.len()).map(body_key).collect()
    }

    pub fn write_properties(&self, mut writer: impl Write) -> Result<(), io::Error> {
        write!(writer, "{self}")?;
        writer.flush()
    }

    /// Write the system to `path`, replacing the file if it exists.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), io::Error> {
        let path = path.as_ref();
        debug!(
            "writing {} bodies to {}",
            self.bodies.len(),
            path.display()
        );

        self.write_properties(BufWriter::new(File::create(path)?))
    }
}

impl Display for SystemDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Physics system setup")?;
        writeln!(f)?;
        writeln!(f, "# System name:")?;
        writeln!(f, "name={}", self.name)?;
        writeln!(f, "# Gravitational constant (unrealistic units)")?;
        writeln!(f, "gravity={:?}", self.gravity)?;
        writeln!(f, "# Simulation time step (seconds)")?;
        writeln!(f, "timeStep={:?}", self.time_step)?;
        writeln!(f, "# Keys for defined bodies")?;
        write!(f, "bodies={}", self.body_keys().join(" "))?;

        for (i, body) in self.bodies.iter().enumerate() {
            let key = body_key(i);
            let (p, v, c) = (&body.position, &body.velocity, &body.color);

            write!(f, "\n\n# Body {i}:")?;
            write!(f, "\n{key}.name={}", body.name)?;
            write!(f, "\n{key}.mass={:.1}", body.mass)?;
            write!(f, "\n{key}.density={:?}", body.density)?;
            write!(f, "\n{key}.position={:.1},{:.1},{:.1}", p.x, p.y, p.z)?;
            write!(f, "\n{key}.velocity={:.1},{:.1},{:.1}", v.x, v.y, v.z)?;
            write!(f, "\n{key}.color={},{},{}", c[0], c[1], c[2])?;
        }

        writeln!(f)
    }
}
