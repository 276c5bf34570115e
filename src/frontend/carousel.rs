use super::dom::DomListener;
use crate::config::{CAROUSEL_COPIES, CAROUSEL_FALLBACK_GAP_PX};
use crate::content::Project;
use crate::motion::{parse_css_px, repeated, CarouselMetrics};
use web_sys::{window, Element};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProjectCarouselProps {
    pub projects: &'static [Project],
    pub asset_base: AttrValue,
}

/// Auto-scrolling strip of project cards. The list is rendered several times
/// end to end and the track's keyframes shift it by exactly one copy, so the
/// restart lands on an identical frame.
#[function_component(ProjectCarousel)]
pub fn project_carousel(props: &ProjectCarouselProps) -> Html {
    let track_ref = use_node_ref();
    let paused = use_state_eq(|| false);
    let metrics = use_state_eq(|| None::<CarouselMetrics>);

    {
        let track_ref = track_ref.clone();
        let metrics = metrics.clone();
        let cards_per_copy = props.projects.len();
        use_effect_with((), move |_| {
            if let Some(measured) = remeasure(&track_ref, cards_per_copy, &metrics) {
                log::debug!("carousel wraps every {:.1}px", measured.set_width);
            }

            // Card width and gap change across the stylesheet's breakpoints.
            let resize = window().and_then(|win| {
                DomListener::attach(win.as_ref(), "resize", move |_| {
                    remeasure(&track_ref, cards_per_copy, &metrics);
                })
            });
            move || drop(resize)
        });
    }

    let onmouseenter = {
        let paused = paused.clone();
        Callback::from(move |_: MouseEvent| paused.set(true))
    };

    let onmouseleave = {
        let paused = paused.clone();
        Callback::from(move |_: MouseEvent| paused.set(false))
    };

    let track_class = classes!(
        "carousel-track",
        metrics.is_some().then_some("is-measured"),
        (*paused).then_some("is-paused"),
    );
    let track_style = (*metrics).map(|measured| measured.style());

    html! {
        <div class="projects-carousel" onmouseenter={onmouseenter} onmouseleave={onmouseleave}>
            <div class={track_class} style={track_style} ref={track_ref}>
                { for repeated(props.projects, CAROUSEL_COPIES).map(|(copy, project)| {
                    html! {
                        <ProjectCard
                            key={format!("{}-{copy}", project.name)}
                            project={*project}
                            asset_base={props.asset_base.clone()}
                            duplicate={copy > 0}
                        />
                    }
                }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
    asset_base: AttrValue,
    duplicate: bool,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = props.project;
    let image = format!("{}/{}", props.asset_base, project.image);
    // Repeated copies are visual filler; keep them out of the tab order.
    let tabindex = props.duplicate.then_some("-1");

    html! {
        <div class="project-card" aria-hidden={props.duplicate.then_some("true")}>
            <img src={image} alt={project.name} class="project-img" loading="lazy" />
            <div class="project-content">
                <h3>{project.name}</h3>
                <p>{project.description}</p>
                <a
                    href={project.link}
                    target="_blank"
                    rel="noopener noreferrer"
                    class="project-link"
                    tabindex={tabindex}
                >
                    {"View on GitHub"}
                </a>
            </div>
        </div>
    }
}

fn remeasure(
    track_ref: &NodeRef,
    cards_per_copy: usize,
    metrics: &UseStateHandle<Option<CarouselMetrics>>,
) -> Option<CarouselMetrics> {
    let measured = track_ref
        .cast::<Element>()
        .and_then(|track| measure_track(&track, cards_per_copy))?;
    metrics.set(Some(measured));
    Some(measured)
}

fn measure_track(track: &Element, cards_per_copy: usize) -> Option<CarouselMetrics> {
    let cards = track.children();
    let widths: Vec<f64> = (0..cards_per_copy as u32)
        .filter_map(|index| cards.item(index))
        .map(|card| card.get_bounding_client_rect().width())
        .collect();

    if widths.len() != cards_per_copy {
        return None;
    }

    let gap = window()
        .and_then(|w| w.get_computed_style(track).ok().flatten())
        .and_then(|style| style.get_property_value("column-gap").ok())
        .and_then(|value| parse_css_px(&value))
        .unwrap_or(CAROUSEL_FALLBACK_GAP_PX);

    CarouselMetrics::measure(&widths, gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PROJECTS;
    use crate::frontend::dom;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::wasm_bindgen_test;
    use web_sys::Event;

    fn select(root: &Element, selector: &str) -> Element {
        root.query_selector(selector)
            .ok()
            .flatten()
            .unwrap_or_else(|| panic!("{selector} rendered"))
    }

    fn fire(target: &Element, kind: &str) {
        let event = Event::new(kind).expect("event");
        target.dispatch_event(&event).expect("dispatched");
    }

    #[wasm_bindgen_test]
    async fn hover_pauses_the_track_until_the_pointer_leaves() {
        let document = dom::document().expect("document");
        let host = document.create_element("div").expect("host");
        document
            .body()
            .expect("body")
            .append_child(&host)
            .expect("host attached");

        let app = yew::Renderer::<ProjectCarousel>::with_root_and_props(
            host.clone(),
            ProjectCarouselProps {
                projects: PROJECTS,
                asset_base: AttrValue::from("/assets"),
            },
        )
        .render();
        TimeoutFuture::new(50).await;

        let carousel = select(&host, ".projects-carousel");
        let track = select(&host, ".carousel-track");
        assert_eq!(
            track.child_element_count() as usize,
            PROJECTS.len() * CAROUSEL_COPIES
        );
        assert!(track.class_list().contains("is-measured"));
        assert!(!track.class_list().contains("is-paused"));

        fire(&carousel, "mouseenter");
        TimeoutFuture::new(50).await;
        assert!(track.class_list().contains("is-paused"));

        fire(&carousel, "mouseleave");
        TimeoutFuture::new(50).await;
        assert!(!track.class_list().contains("is-paused"));

        app.destroy();
        host.remove();
    }
}
