use blue_engine::{
    primitive_shapes::{square, uv_sphere},
    Engine, ObjectSettings, WindowDescriptor,
};
use color_eyre::eyre::{eyre, Result};
use log::info;

use super::{DistributionCharts, Histogram, Scatter3D};

/// Half of a panel's edge length in world units.
const PANEL_HALF: f32 = 0.4;

/// Panel centers of the 2x2 grid, in reading order.
const PANELS: [(f32, f32); 4] = [(-0.5, 0.5), (0.5, 0.5), (-0.5, -0.5), (0.5, -0.5)];

const PANEL_NAMES: [&str; 4] = ["top left", "top right", "bottom left", "bottom right"];

/// Half edge length of the unscaled `square` primitive.
const SQUARE_HALF: f32 = 1.;

type Rgba = (f32, f32, f32, f32);

const BAR_COLOR: Rgba = (0.12, 0.47, 0.71, 0.7);
const AXIS_COLOR: Rgba = (0.8, 0.8, 0.8, 1.);
const POINT_COLOR: Rgba = (0.12, 0.47, 0.71, 0.6);

const AXIS_THICKNESS: f32 = 0.005;
const MAX_POINT_RADIUS: f32 = 0.03;
const MIN_POINT_RADIUS: f32 = 0.004;

/// An axis aligned rectangle in world units.
#[derive(Clone, Debug, PartialEq)]
struct Rect {
    center: (f32, f32),
    size: (f32, f32),
    color: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
struct Sphere {
    center: (f32, f32, f32),
    radius: f32,
}

/// Axis line plus one bar per non-empty bin, scaled to fill the panel.
fn histogram_rects(hist: &Histogram, (cx, cy): (f32, f32)) -> Vec<Rect> {
    let mut rects = vec![Rect {
        center: (cx, cy - PANEL_HALF),
        size: (2. * PANEL_HALF, AXIS_THICKNESS),
        color: AXIS_COLOR,
    }];

    let heights = hist.bar_heights();
    let max_height = heights.iter().copied().fold(0., f64::max);
    if max_height <= 0. {
        return rects;
    }

    let bar_width = 2. * PANEL_HALF / hist.bins() as f32;
    for (i, &h) in heights.iter().enumerate() {
        if h <= 0. {
            continue;
        }

        let bar_height = 2. * PANEL_HALF * (h / max_height) as f32;
        rects.push(Rect {
            center: (
                cx - PANEL_HALF + bar_width * (i as f32 + 0.5),
                cy - PANEL_HALF + bar_height / 2.,
            ),
            size: (bar_width * 0.95, bar_height),
            color: BAR_COLOR,
        });
    }

    rects
}

/// Points fitted into the panel's cube, radius proportional to point size.
fn scatter_spheres(scatter: &Scatter3D, (cx, cy): (f32, f32)) -> Vec<Sphere> {
    let extent = scatter.extent();
    if extent <= 0. {
        return Vec::new();
    }
    let max_size = scatter.points.iter().map(|p| p.size).fold(0., f64::max);

    scatter
        .points
        .iter()
        .map(|point| {
            let pos = point.position / extent * f64::from(PANEL_HALF);
            Sphere {
                center: (cx + pos.x as f32, cy + pos.y as f32, pos.z as f32),
                radius: (MAX_POINT_RADIUS * (point.size / max_size) as f32).max(MIN_POINT_RADIUS),
            }
        })
        .collect()
}

/// Window showing the four distribution charts in a 2x2 grid.
pub struct ChartWindow {
    engine: Engine,
}

impl ChartWindow {
    /// Create a new chart window.
    ///
    /// The engine has no text rendering, so panel titles and axis labels
    /// are written to the log as a legend of the grid.
    ///
    /// # Arguments
    /// - `charts`: The panels to draw.
    /// - `width`: Width of the window.
    /// - `height`: Height of the window.
    pub fn new(charts: &DistributionCharts, width: u32, height: u32) -> Result<Self> {
        let engine = Engine::new_config(WindowDescriptor {
            width,
            height,
            title: "Body distributions",
            ..Default::default()
        })?;

        for (place, legend) in PANEL_NAMES.iter().zip(charts.panel_legends()) {
            info!("{place}: {legend}");
        }

        let mut window = Self { engine };
        window.add_rects("position", &histogram_rects(&charts.position, PANELS[0]))?;
        window.add_rects("velocity", &histogram_rects(&charts.velocity, PANELS[1]))?;
        window.add_rects("mass", &histogram_rects(&charts.mass, PANELS[2]))?;
        window.add_spheres("scatter", &scatter_spheres(&charts.scatter, PANELS[3]))?;

        Ok(window)
    }

    /// Display the window until it is closed.
    pub fn show(mut self) -> Result<()> {
        self.engine.update_loop(move |_, _, _, _, _, _| {})?;
        Ok(())
    }

    fn add_rects(&mut self, prefix: &str, rects: &[Rect]) -> Result<()> {
        for (i, rect) in rects.iter().enumerate() {
            let name = format!("{prefix}_rect{i}");
            square(
                name.clone(),
                ObjectSettings::default(),
                &mut self.engine.renderer,
                &mut self.engine.objects,
            );

            let (r, g, b, a) = rect.color;
            self.engine
                .objects
                .get_mut(&name)
                .ok_or_else(|| eyre!("object {name} was not created"))?
                .set_scale((
                    rect.size.0 / (2. * SQUARE_HALF),
                    rect.size.1 / (2. * SQUARE_HALF),
                    1.,
                ))
                .set_position((rect.center.0, rect.center.1, 0.))
                .set_color(r, g, b, a);
        }

        Ok(())
    }

    fn add_spheres(&mut self, prefix: &str, spheres: &[Sphere]) -> Result<()> {
        let (r, g, b, a) = POINT_COLOR;

        for (i, sphere) in spheres.iter().enumerate() {
            let name = format!("{prefix}_point{i}");
            uv_sphere(
                name.clone(),
                (8, 20, sphere.radius),
                &mut self.engine.renderer,
                &mut self.engine.objects,
            );

            self.engine
                .objects
                .get_mut(&name)
                .ok_or_else(|| eyre!("object {name} was not created"))?
                .set_position(sphere.center)
                .set_color(r, g, b, a);
        }

        Ok(())
    }
}
