use super::dom::{self, DomListener, Observer};
use crate::config::{FADE_IN_THRESHOLD, SECTION_ROOT_MARGIN};
use crate::content::Section;
use crate::motion::{
    active_band_from_batch, centered_scroll_top, header_is_scrolled, BandChange, SectionGeometry,
};
use web_sys::{window, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub scrolled: bool,
    pub active: Option<Section>,
}

/// Header `scrolled` flag, first-appearance reveal of `.fade-in` blocks, and the
/// section currently inside the active band.
#[hook]
pub fn use_scroll_state() -> ScrollState {
    let scrolled = use_state_eq(|| false);
    let active = use_state_eq(|| None::<Section>);

    {
        let scrolled = scrolled.clone();
        let active = active.clone();
        use_effect_with((), move |_| {
            let guards = ScrollGuards::attach(scrolled, active);
            move || drop(guards)
        });
    }

    ScrollState {
        scrolled: *scrolled,
        active: *active,
    }
}

struct ScrollGuards {
    _scroll: Option<DomListener>,
    _reveal: Option<Observer>,
    _sections: Option<Observer>,
}

impl ScrollGuards {
    fn attach(scrolled: UseStateHandle<bool>, active: UseStateHandle<Option<Section>>) -> Self {
        Self {
            _scroll: attach_header_listener(scrolled),
            _reveal: observe_fade_ins(),
            _sections: observe_sections(active),
        }
    }
}

fn current_scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

fn attach_header_listener(scrolled: UseStateHandle<bool>) -> Option<DomListener> {
    let win = window()?;
    scrolled.set(header_is_scrolled(current_scroll_y()));

    DomListener::attach(win.as_ref(), "scroll", move |_| {
        scrolled.set(header_is_scrolled(current_scroll_y()));
    })
}

fn observe_fade_ins() -> Option<Observer> {
    let targets = dom::query_all(".fade-in");
    if targets.is_empty() {
        return None;
    }

    let observer = Observer::threshold(FADE_IN_THRESHOLD, |entries, observer| {
        for entry in entries.into_iter().filter(|entry| entry.is_intersecting()) {
            let target = entry.target();
            let _ = target.class_list().add_1("is-visible");
            observer.unobserve(&target);
        }
    })?;
    observer.observe_all(&targets);
    Some(observer)
}

fn observe_sections(active: UseStateHandle<Option<Section>>) -> Option<Observer> {
    let sections = dom::query_all("section[id]");
    if sections.is_empty() {
        return None;
    }

    let observer = Observer::root_margin(SECTION_ROOT_MARGIN, move |entries, _| {
        let batch: Vec<(String, bool)> = entries
            .iter()
            .map(|entry| (entry.target().id(), entry.is_intersecting()))
            .collect();

        match active_band_from_batch(batch.iter().map(|(id, hit)| (id.as_str(), *hit))) {
            BandChange::Active(section) => active.set(Some(section)),
            BandChange::Cleared => active.set(None),
            BandChange::Unchanged => {}
        }
    })?;
    observer.observe_all(&sections);
    Some(observer)
}

/// Smoothly scrolls so the element with `id` sits centred under the header.
/// Unknown ids are ignored.
pub fn scroll_to_section(id: &str) {
    let Some(win) = window() else {
        return;
    };
    let Some(target) = win.document().and_then(|d| d.get_element_by_id(id)) else {
        log::debug!("no section with id {id}; ignoring navigation");
        return;
    };

    let rect = target.get_bounding_client_rect();
    let (_, viewport_height) = dom::viewport_size();
    let top = centered_scroll_top(SectionGeometry {
        scroll_y: current_scroll_y(),
        rect_top: rect.top(),
        rect_height: rect.height(),
        viewport_height,
    });

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn unknown_section_leaves_scroll_position_alone() {
        let before = current_scroll_y();
        scroll_to_section("no-such-section");
        assert_eq!(current_scroll_y(), before);
    }

    #[wasm_bindgen_test]
    async fn revealed_blocks_keep_is_visible() {
        let document = dom::document().expect("document");
        let body = document.body().expect("body");
        let block = document.create_element("div").expect("block");
        block.set_class_name("fade-in");
        block.set_attribute("style", "height: 40px").expect("style");
        body.prepend_with_node_1(&block).expect("block attached");

        let observer = observe_fade_ins().expect("observer attached");
        TimeoutFuture::new(200).await;
        assert!(block.class_list().contains("is-visible"));

        // Pushed out of the viewport, the block stays revealed.
        block
            .set_attribute("style", "height: 40px; margin-top: 10000px")
            .expect("style");
        TimeoutFuture::new(200).await;
        assert!(block.class_list().contains("is-visible"));

        drop(observer);
        block.remove();
    }
}
