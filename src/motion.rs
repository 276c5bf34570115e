//! Geometry and bookkeeping behind the page's scroll, particle and carousel
//! behaviour. Nothing here touches the DOM, so it builds and tests natively.

use crate::config::{
    CAROUSEL_SPEED_PX_PER_SECOND, HEADER_HEIGHT, HEADER_SCROLL_THRESHOLD, PARTICLES_PER_BURST,
    PARTICLE_MIN_RADIUS, PARTICLE_RADIUS_SPREAD,
};
use crate::content::Section;
use std::collections::BTreeMap;
use std::f64::consts::TAU;

pub fn header_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD
}

/// Where a section sits right now, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionGeometry {
    pub scroll_y: f64,
    pub rect_top: f64,
    pub rect_height: f64,
    pub viewport_height: f64,
}

/// Scroll offset that centres the section in the viewport, nudged down by half
/// the fixed header.
pub fn centered_scroll_top(geometry: SectionGeometry) -> f64 {
    let absolute_y = geometry.scroll_y + geometry.rect_top;
    absolute_y - geometry.viewport_height / 2.0 + geometry.rect_height / 2.0 + HEADER_HEIGHT / 2.0
}

/// What one section-observer batch does to the active nav marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandChange {
    /// Nothing in the batch entered the band.
    Unchanged,
    /// A section with no nav link (the hero) took the band.
    Cleared,
    Active(Section),
}

/// Resolves one intersection-observer batch. The last intersecting entry wins,
/// whether or not it has a nav link.
pub fn active_band_from_batch<'a, I>(entries: I) -> BandChange
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    match entries.into_iter().filter(|(_, intersecting)| *intersecting).last() {
        None => BandChange::Unchanged,
        Some((id, _)) => Section::from_id(id).map_or(BandChange::Cleared, BandChange::Active),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub origin: Point,
    pub hue: f64,
    pub angle: f64,
    pub radius: f64,
}

impl Particle {
    pub fn offset(&self) -> (f64, f64) {
        (self.angle.cos() * self.radius, self.angle.sin() * self.radius)
    }

    pub fn initial_style(&self) -> String {
        format!(
            "left: {:.2}px; top: {:.2}px; background: hsl({:.1}, 80%, 60%);",
            self.origin.x, self.origin.y, self.hue
        )
    }

    pub fn displaced_transform(&self) -> String {
        let (dx, dy) = self.offset();
        format!("translate({dx:.2}px, {dy:.2}px) scale(0.5)")
    }
}

/// Lays out one radial burst. `random` yields values in `[0, 1)`, two per particle.
pub fn burst_layout(origin: Point, mut random: impl FnMut() -> f64) -> Vec<Particle> {
    (0..PARTICLES_PER_BURST)
        .map(|index| {
            let angle = TAU * index as f64 / PARTICLES_PER_BURST as f64;
            let radius = PARTICLE_MIN_RADIUS + random() * PARTICLE_RADIUS_SPREAD;
            let hue = random() * 360.0;

            Particle {
                origin,
                hue,
                angle,
                radius,
            }
        })
        .collect()
}

/// Live bursts keyed by spawn order.
///
/// The removal timer of each burst calls [`BurstRegistry::remove`]; teardown
/// calls [`BurstRegistry::drain`]. With a cap set, inserting past it hands back
/// the oldest bursts for immediate removal.
pub struct BurstRegistry<T> {
    next_id: u64,
    cap: Option<usize>,
    live: BTreeMap<u64, T>,
}

impl<T> BurstRegistry<T> {
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            next_id: 0,
            cap: cap.map(|cap| cap.max(1)),
            live: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, burst: T) -> (u64, Vec<T>) {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, burst);

        let mut evicted = Vec::new();
        if let Some(cap) = self.cap {
            while self.live.len() > cap {
                let Some((_, oldest)) = self.live.pop_first() else {
                    break;
                };
                evicted.push(oldest);
            }
        }

        (id, evicted)
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        self.live.remove(&id)
    }

    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.live).into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }
}

/// Wrap distance and timing of the carousel loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselMetrics {
    pub set_width: f64,
    pub duration_secs: f64,
}

impl CarouselMetrics {
    /// `card_widths` covers exactly one copy of the project list. Every card is
    /// followed by one gap, so translating by the result lands the second copy
    /// where the first started.
    pub fn measure(card_widths: &[f64], gap: f64) -> Option<Self> {
        if card_widths.is_empty() {
            return None;
        }

        let set_width = card_widths.iter().sum::<f64>() + gap * card_widths.len() as f64;
        if !set_width.is_finite() || set_width <= 0.0 {
            return None;
        }

        Some(Self {
            set_width,
            duration_secs: set_width / CAROUSEL_SPEED_PX_PER_SECOND,
        })
    }

    pub fn style(&self) -> String {
        format!(
            "--carousel-shift: -{:.2}px; --carousel-duration: {:.2}s;",
            self.set_width, self.duration_secs
        )
    }
}

/// Parses a computed CSS length such as `"32px"`. `normal` and other keywords
/// yield `None`.
pub fn parse_css_px(value: &str) -> Option<f64> {
    let number = value.trim().strip_suffix("px")?.trim();
    number.parse::<f64>().ok().filter(|value| value.is_finite() && *value >= 0.0)
}

/// Items repeated `copies` times end to end, tagged with their copy index.
pub fn repeated<'a, T>(
    items: &'a [T],
    copies: usize,
) -> impl Iterator<Item = (usize, &'a T)> + 'a {
    (0..copies).flat_map(move |copy| items.iter().map(move |item| (copy, item)))
}
