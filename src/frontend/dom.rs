use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

pub fn document() -> Option<Document> {
    window()?.document()
}

/// Every element matching `selector`; an invalid selector or missing document
/// yields nothing.
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
/// Assumed viewport when the window reports no size (detached or headless).
const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

pub fn prefers_reduced_motion() -> bool {
    let query = window().and_then(|win| win.match_media(REDUCED_MOTION_QUERY).ok().flatten());
    query.is_some_and(|list| list.matches())
}

pub fn viewport_size() -> (f64, f64) {
    let (fallback_width, fallback_height) = FALLBACK_VIEWPORT;
    let Some(win) = window() else {
        return FALLBACK_VIEWPORT;
    };
    let dimension = |value: Result<JsValue, JsValue>, fallback: f64| {
        value.ok().and_then(|value| value.as_f64()).unwrap_or(fallback)
    };

    (
        dimension(win.inner_width(), fallback_width),
        dimension(win.inner_height(), fallback_height),
    )
}

/// An event listener that unregisters itself when dropped.
pub struct DomListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// An intersection observer that disconnects when dropped.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    pub fn threshold(
        threshold: f64,
        handler: impl FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
    ) -> Option<Self> {
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        Self::with_init(&init, handler)
    }

    pub fn root_margin(
        margin: &str,
        handler: impl FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
    ) -> Option<Self> {
        let init = IntersectionObserverInit::new();
        init.set_root_margin(margin);
        Self::with_init(&init, handler)
    }

    fn with_init(
        init: &IntersectionObserverInit,
        mut handler: impl FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
    ) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .collect();
                handler(entries, &observer);
            },
        );
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init).ok()?;

        Some(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe_all(&self, elements: &[Element]) {
        for element in elements {
            self.observer.observe(element);
        }
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
