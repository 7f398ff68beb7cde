//! Reading `.properties` documents back into a [`SystemDescription`].
//!
//! The parser covers the subset of the format the simulator relies on:
//! `#` and `!` comment lines, blank lines, and `key=value` or `key:value`
//! entries. Later entries override earlier ones with the same key.

use std::{collections::HashMap, fs, path::Path, str::FromStr};

use nalgebra::Vector3;

use crate::{
    body::{body_key, Body},
    error::{AutogenError, Result},
    system::SystemDescription,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .map(|line| match line.find(['=', ':']) {
                Some(idx) => (line[..idx].trim_end(), line[idx + 1..].trim_start()),
                None => (line, ""),
            })
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self { entries }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the value of `key`, or `default` if the key is missing.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T> {
        match self.get(key) {
            Some(value) => value.parse().map_err(|_| malformed(key, value)),
            None => Ok(default),
        }
    }

    fn vector_or(&self, key: &str, default: &str) -> Result<Vector3<f64>> {
        let [x, y, z] = parse_triple(key, self.get_or(key, default))?;
        Ok(Vector3::new(x, y, z))
    }

    fn color_or(&self, key: &str, default: &str) -> Result<[u8; 3]> {
        parse_triple(key, self.get_or(key, default))
    }
}

fn malformed(key: &str, value: &str) -> AutogenError {
    AutogenError::Properties {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Parse exactly three comma separated values.
pub fn parse_triple<T: FromStr + Default + Copy>(key: &str, value: &str) -> Result<[T; 3]> {
    let mut out = [T::default(); 3];
    let mut parts = value.split(',');

    for slot in &mut out {
        let part = parts.next().ok_or_else(|| malformed(key, value))?;
        *slot = part.trim().parse().map_err(|_| malformed(key, value))?;
    }
    if parts.next().is_some() {
        return Err(malformed(key, value));
    }

    Ok(out)
}

impl SystemDescription {
    /// Read a system from its properties.
    ///
    /// Body sections are looked up through the whitespace separated `bodies`
    /// key list, so an empty list yields no bodies. Missing fields fall back
    /// to the simulator's defaults. Unlike the simulator, a value that is
    /// present but malformed is an error rather than replaced by its default.
    pub fn from_properties(props: &Properties) -> Result<Self> {
        let keys: Vec<&str> = props.get_or("bodies", "").split_whitespace().collect();

        let bodies = keys
            .iter()
            .enumerate()
            .map(|(i, key)| -> Result<Body> {
                let field = |name: &str| format!("{key}.{name}");

                Ok(Body {
                    name: props
                        .get(&field("name"))
                        .map_or_else(|| format!("Body {i}"), str::to_string),
                    mass: props.parse_or(&field("mass"), 1.)?,
                    density: props.parse_or(&field("density"), 1.)?,
                    position: props.vector_or(&field("position"), "0,0,0")?,
                    velocity: props.vector_or(&field("velocity"), "0,0,0")?,
                    color: props.color_or(&field("color"), "255,255,255")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: props.get_or("name", "").to_string(),
            gravity: props.parse_or("gravity", 1.)?,
            time_step: props.parse_or("timeStep", 0.004)?,
            bodies,
        })
    }

    /// Whether the `bodies` list names exactly the keys `body0..body{n-1}`.
    pub fn has_ordinal_keys(props: &Properties) -> bool {
        props
            .get_or("bodies", "")
            .split_whitespace()
            .enumerate()
            .all(|(i, key)| key == body_key(i))
    }
}
