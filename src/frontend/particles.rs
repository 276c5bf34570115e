use super::dom::{self, DomListener};
use crate::config::{PARTICLE_FADE_DELAY_MS, PARTICLE_LIFETIME_MS, PARTICLE_MAX_LIVE_BURSTS};
use crate::motion::{burst_layout, BurstRegistry, Point};
use gloo_timers::callback::Timeout;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

type Registry = Rc<RefCell<BurstRegistry<Vec<Element>>>>;

/// Bursts particles out of every link and button the pointer enters.
#[hook]
pub fn use_particle_bursts() {
    use_effect_with((), move |_| {
        let bursts = ParticleBursts::attach();
        move || drop(bursts)
    });
}

struct ParticleBursts {
    registry: Registry,
    _listeners: Vec<DomListener>,
}

impl ParticleBursts {
    fn attach() -> Option<Self> {
        if dom::prefers_reduced_motion() {
            return None;
        }

        let registry: Registry =
            Rc::new(RefCell::new(BurstRegistry::new(PARTICLE_MAX_LIVE_BURSTS)));
        let listeners = dom::query_all("a, button")
            .into_iter()
            .filter_map(|element| {
                let registry = registry.clone();
                let anchor = element.clone();
                DomListener::attach(element.as_ref(), "mouseenter", move |_| {
                    let rect = anchor.get_bounding_client_rect();
                    let origin = Point {
                        x: rect.left() + rect.width() / 2.0,
                        y: rect.top() + rect.height() / 2.0,
                    };
                    spawn_burst(&registry, origin);
                })
            })
            .collect();

        Some(Self {
            registry,
            _listeners: listeners,
        })
    }
}

impl Drop for ParticleBursts {
    fn drop(&mut self) {
        let mut registry = self.registry.borrow_mut();
        log::debug!("clearing {} live particle bursts", registry.len());
        for nodes in registry.drain() {
            remove_all(&nodes);
        }
    }
}

fn remove_all(nodes: &[Element]) {
    for node in nodes {
        node.remove();
    }
}

fn spawn_burst(registry: &Registry, origin: Point) {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };

    let mut nodes = Vec::new();
    let mut transitions = Vec::new();

    for particle in burst_layout(origin, js_sys::Math::random) {
        let Ok(node) = document.create_element("div") else {
            continue;
        };
        node.set_class_name("particle");
        let _ = node.set_attribute("style", &particle.initial_style());
        if body.append_child(&node).is_err() {
            continue;
        }

        transitions.push((node.clone(), particle.displaced_transform()));
        nodes.push(node);
    }

    let (id, evicted) = registry.borrow_mut().insert(nodes);
    for nodes in evicted {
        remove_all(&nodes);
    }

    // The transition needs the initial style to land in a frame first.
    Timeout::new(PARTICLE_FADE_DELAY_MS, move || {
        for (node, transform) in transitions {
            if let Some(node) = node.dyn_ref::<HtmlElement>() {
                let style = node.style();
                let _ = style.set_property("transform", &transform);
                let _ = style.set_property("opacity", "0");
            }
        }
    })
    .forget();

    let registry = Rc::downgrade(registry);
    Timeout::new(PARTICLE_LIFETIME_MS, move || {
        let Some(registry) = registry.upgrade() else {
            return;
        };
        let expired = registry.borrow_mut().remove(id);
        if let Some(nodes) = expired {
            remove_all(&nodes);
        }
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PARTICLES_PER_BURST;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn registry(cap: Option<usize>) -> Registry {
        Rc::new(RefCell::new(BurstRegistry::new(cap)))
    }

    fn live_particles() -> usize {
        dom::query_all(".particle").len()
    }

    const ORIGIN: Point = Point { x: 64.0, y: 64.0 };

    #[wasm_bindgen_test]
    async fn burst_adds_particles_and_removes_them_after_lifetime() {
        let registry = registry(None);
        let before = live_particles();

        spawn_burst(&registry, ORIGIN);
        assert_eq!(live_particles(), before + PARTICLES_PER_BURST);

        TimeoutFuture::new(PARTICLE_FADE_DELAY_MS + 20).await;
        assert_eq!(live_particles(), before + PARTICLES_PER_BURST);

        TimeoutFuture::new(PARTICLE_LIFETIME_MS + 50).await;
        assert_eq!(live_particles(), before);
        assert_eq!(registry.borrow().len(), 0);
    }

    #[wasm_bindgen_test]
    fn capped_registry_evicts_the_oldest_burst() {
        let registry = registry(Some(1));
        let before = live_particles();

        spawn_burst(&registry, ORIGIN);
        spawn_burst(&registry, ORIGIN);

        assert_eq!(live_particles(), before + PARTICLES_PER_BURST);
        assert_eq!(registry.borrow().len(), 1);

        for nodes in registry.borrow_mut().drain() {
            remove_all(&nodes);
        }
    }

    #[wasm_bindgen_test]
    async fn teardown_removes_live_particles_at_once() {
        let bursts = ParticleBursts {
            registry: registry(None),
            _listeners: Vec::new(),
        };
        let before = live_particles();

        spawn_burst(&bursts.registry, ORIGIN);
        spawn_burst(&bursts.registry, ORIGIN);
        assert_eq!(live_particles(), before + 2 * PARTICLES_PER_BURST);

        drop(bursts);
        assert_eq!(live_particles(), before);

        // Pending removal timers find the registry gone and do nothing.
        TimeoutFuture::new(PARTICLE_LIFETIME_MS + 50).await;
        assert_eq!(live_particles(), before);
    }
}
