//! Geometry for the decorative layers: the drifting veil painted on the
//! background canvas and the progressive blur stacked against one edge.

use std::f64::consts::TAU;

pub const VEIL_LAYER_COUNT: usize = 4;

const VEIL_BASE_HUE: f64 = 232.0;
const VEIL_HUE_STEP: f64 = 18.0;
const VEIL_ANCHORS: [(f64, f64); VEIL_LAYER_COUNT] =
    [(0.2, 0.3), (0.78, 0.22), (0.55, 0.78), (0.12, 0.88)];
const VEIL_MAX_WARP: f64 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VeilSettings {
    pub hue_shift: f64,
    pub warp_amount: f64,
    pub speed: f64,
}

/// One radial glow of the veil, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VeilLayer {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub hue: f64,
    pub alpha: f64,
}

impl VeilLayer {
    pub fn color(&self, alpha_scale: f64) -> String {
        format!(
            "hsla({:.1}, 78%, 46%, {:.3})",
            self.hue,
            (self.alpha * alpha_scale).clamp(0.0, 1.0)
        )
    }
}

pub fn veil_amplitude(warp_amount: f64) -> f64 {
    (warp_amount.max(0.0) * 0.03).min(VEIL_MAX_WARP)
}

pub fn veil_layers(
    elapsed_secs: f64,
    width: f64,
    height: f64,
    settings: VeilSettings,
) -> [VeilLayer; VEIL_LAYER_COUNT] {
    let amplitude = veil_amplitude(settings.warp_amount);
    let clock = elapsed_secs * settings.speed.max(0.0) * 0.15;
    let extent = width.max(height);

    std::array::from_fn(|index| {
        let k = index as f64;
        let (anchor_x, anchor_y) = VEIL_ANCHORS[index];
        let phase = clock + k * TAU / VEIL_LAYER_COUNT as f64;

        VeilLayer {
            x: width * (anchor_x + amplitude * (phase * (1.0 + 0.13 * k)).sin()),
            y: height * (anchor_y + amplitude * (phase * 0.8 + k).cos()),
            radius: extent * (0.45 + 0.1 * (phase * 0.5).sin()),
            hue: (VEIL_BASE_HUE + k * VEIL_HUE_STEP + settings.hue_shift).rem_euclid(360.0),
            alpha: 0.35 + 0.1 * (phase + k).sin(),
        }
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurTarget {
    Page,
    Parent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    fn gradient_direction(self) -> &'static str {
        match self {
            Self::Top => "to top",
            Self::Bottom => "to bottom",
            Self::Left => "to left",
            Self::Right => "to right",
        }
    }
}

/// Inline style of the overlay container.
pub fn blur_container_style(target: BlurTarget, edge: Edge, extent: &str) -> String {
    let position = match target {
        BlurTarget::Page => "fixed",
        BlurTarget::Parent => "absolute",
    };
    let anchor = match edge {
        Edge::Top => format!("top: 0; left: 0; right: 0; height: {extent};"),
        Edge::Bottom => format!("bottom: 0; left: 0; right: 0; height: {extent};"),
        Edge::Left => format!("left: 0; top: 0; bottom: 0; width: {extent};"),
        Edge::Right => format!("right: 0; top: 0; bottom: 0; width: {extent};"),
    };

    format!("position: {position}; {anchor} pointer-events: none; z-index: 1000;")
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlurLayer {
    pub blur_rem: f64,
    pub stops: [f64; 4],
}

impl BlurLayer {
    pub fn style(&self, edge: Edge) -> String {
        let [start, full, hold, end] = self.stops;
        let mask = format!(
            "linear-gradient({}, transparent {start:.1}%, black {full:.1}%, black {hold:.1}%, transparent {end:.1}%)",
            edge.gradient_direction()
        );

        format!(
            "position: absolute; inset: 0; backdrop-filter: blur({blur:.3}rem); -webkit-backdrop-filter: blur({blur:.3}rem); mask-image: {mask}; -webkit-mask-image: {mask};",
            blur = self.blur_rem
        )
    }
}

/// Stacked slices whose blur grows towards the edge. Each slice is masked to a
/// band that overlaps its neighbours so the steps blend.
pub fn blur_layers(divisions: u32, strength: f64) -> Vec<BlurLayer> {
    let divisions = divisions.max(1);
    let step = 100.0 / f64::from(divisions);

    (1..=divisions)
        .map(|index| {
            let i = f64::from(index);
            let progress = i / f64::from(divisions);

            BlurLayer {
                blur_rem: 0.0625 * (progress * f64::from(divisions) + 1.0) * strength.max(0.0),
                stops: [
                    (step * (i - 1.0)).max(0.0),
                    (step * i).min(100.0),
                    (step * (i + 1.0)).min(100.0),
                    (step * (i + 2.0)).min(100.0),
                ],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: VeilSettings = VeilSettings {
        hue_shift: 23.0,
        warp_amount: 5.0,
        speed: 1.7,
    };

    #[test]
    fn veil_layers_stay_near_the_canvas() {
        let amplitude = veil_amplitude(SETTINGS.warp_amount);

        for step in 0..200 {
            let layers = veil_layers(step as f64 * 0.37, 1280.0, 720.0, SETTINGS);
            for layer in layers {
                assert!(layer.x >= -amplitude * 1280.0 && layer.x <= (1.0 + amplitude) * 1280.0);
                assert!(layer.y >= -amplitude * 720.0 && layer.y <= (1.0 + amplitude) * 720.0);
                assert!(layer.radius > 0.0);
                assert!((0.0..360.0).contains(&layer.hue));
                assert!(layer.alpha > 0.0 && layer.alpha < 1.0);
            }
        }
    }

    #[test]
    fn hue_shift_wraps() {
        let layers = veil_layers(0.0, 100.0, 100.0, VeilSettings { hue_shift: 500.0, ..SETTINGS });
        assert!((layers[0].hue - 12.0).abs() < 1e-9);
    }

    #[test]
    fn zero_speed_freezes_the_veil() {
        let frozen = VeilSettings { speed: 0.0, ..SETTINGS };
        assert_eq!(veil_layers(0.0, 800.0, 600.0, frozen), veil_layers(90.0, 800.0, 600.0, frozen));
    }

    #[test]
    fn warp_is_capped() {
        assert!((veil_amplitude(5.0) - 0.15).abs() < 1e-12);
        assert_eq!(veil_amplitude(100.0), VEIL_MAX_WARP);
        assert_eq!(veil_amplitude(-3.0), 0.0);
    }

    #[test]
    fn blur_grows_towards_the_edge() {
        let layers = blur_layers(5, 2.0);

        assert_eq!(layers.len(), 5);
        assert!(layers.windows(2).all(|pair| pair[0].blur_rem < pair[1].blur_rem));
        assert_eq!(layers[0].stops, [0.0, 20.0, 40.0, 60.0]);
        assert_eq!(layers[4].stops, [80.0, 100.0, 100.0, 100.0]);
    }

    #[test]
    fn zero_divisions_still_renders_one_layer() {
        assert_eq!(blur_layers(0, 1.0).len(), 1);
    }

    #[test]
    fn container_anchors_to_the_requested_edge() {
        let style = blur_container_style(BlurTarget::Page, Edge::Bottom, "6rem");
        assert!(style.starts_with("position: fixed; bottom: 0;"));
        assert!(style.contains("height: 6rem;"));

        let style = blur_container_style(BlurTarget::Parent, Edge::Left, "40px");
        assert!(style.starts_with("position: absolute; left: 0;"));
        assert!(style.contains("width: 40px;"));
    }

    #[test]
    fn layer_style_masks_in_the_edge_direction() {
        let layer = &blur_layers(4, 1.0)[0];
        let style = layer.style(Edge::Bottom);

        assert!(style.contains("linear-gradient(to bottom, transparent 0.0%, black 25.0%"));
        assert!(style.contains("blur(0.125rem)"));
    }
}
