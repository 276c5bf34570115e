use super::dom::{self, DomListener};
use crate::visuals::{
    blur_container_style, blur_layers, veil_layers, BlurTarget, Edge, VeilSettings,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, Window};
use yew::prelude::*;

const MAX_PIXEL_RATIO: f64 = 2.0;

#[derive(Properties, PartialEq)]
pub struct VeilBackgroundProps {
    pub hue_shift: f64,
    pub warp_amount: f64,
    pub speed: f64,
}

/// Full-viewport canvas painted with slowly drifting glows.
#[function_component(VeilBackground)]
pub fn veil_background(props: &VeilBackgroundProps) -> Html {
    let canvas_ref = use_node_ref();
    let settings = VeilSettings {
        hue_shift: props.hue_shift,
        warp_amount: props.warp_amount,
        speed: props.speed,
    };

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(settings, move |settings| {
            let painter = canvas_ref
                .cast::<HtmlCanvasElement>()
                .and_then(|canvas| VeilPainter::start(canvas, *settings));
            move || drop(painter)
        });
    }

    html! {
        <canvas ref={canvas_ref} class="darkveil-canvas" aria-hidden="true" />
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

struct VeilPainter {
    window: Window,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<i32>>>,
    _resize: Option<DomListener>,
}

impl VeilPainter {
    fn start(canvas: HtmlCanvasElement, settings: VeilSettings) -> Option<Self> {
        let win = window()?;
        let Some(context) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::warn!("background canvas has no 2d context; leaving it blank");
            return None;
        };

        fit_canvas(&canvas);
        let animate = !dom::prefers_reduced_motion();

        let resize = {
            let canvas = canvas.clone();
            let context = context.clone();
            DomListener::attach(win.as_ref(), "resize", move |_| {
                fit_canvas(&canvas);
                if !animate {
                    paint(&canvas, &context, 0.0, settings);
                }
            })
        };

        let painter = Self {
            window: win.clone(),
            frame: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
            _resize: resize,
        };

        if !animate {
            paint(&canvas, &context, 0.0, settings);
            return Some(painter);
        }

        let frame = painter.frame.clone();
        let pending = painter.pending.clone();
        let mut started_at = None;
        *painter.frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            let origin = *started_at.get_or_insert(timestamp);
            paint(&canvas, &context, (timestamp - origin) / 1_000.0, settings);

            if let Some(callback) = frame.borrow().as_ref() {
                pending.set(win.request_animation_frame(callback.as_ref().unchecked_ref()).ok());
            }
        }));

        if let Some(callback) = painter.frame.borrow().as_ref() {
            painter
                .pending
                .set(painter.window.request_animation_frame(callback.as_ref().unchecked_ref()).ok());
        }

        Some(painter)
    }
}

impl Drop for VeilPainter {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        // Releases the frame closure and with it the closure's handle on `frame`.
        self.frame.borrow_mut().take();
    }
}

fn fit_canvas(canvas: &HtmlCanvasElement) {
    let ratio = window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .clamp(1.0, MAX_PIXEL_RATIO);
    let (width, height) = dom::viewport_size();

    canvas.set_width((width * ratio).round() as u32);
    canvas.set_height((height * ratio).round() as u32);
}

fn paint(
    canvas: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
    elapsed_secs: f64,
    settings: VeilSettings,
) {
    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());

    let _ = context.set_global_composite_operation("source-over");
    context.set_fill_style_str("#000");
    context.fill_rect(0.0, 0.0, width, height);

    let _ = context.set_global_composite_operation("lighter");
    for layer in veil_layers(elapsed_secs, width, height, settings) {
        let Ok(gradient) =
            context.create_radial_gradient(layer.x, layer.y, 0.0, layer.x, layer.y, layer.radius)
        else {
            continue;
        };
        let _ = gradient.add_color_stop(0.0, &layer.color(1.0));
        let _ = gradient.add_color_stop(0.55, &layer.color(0.35));
        let _ = gradient.add_color_stop(1.0, &layer.color(0.0));

        context.set_fill_style_canvas_gradient(&gradient);
        context.fill_rect(0.0, 0.0, width, height);
    }
    let _ = context.set_global_composite_operation("source-over");
}

#[derive(Properties, PartialEq)]
pub struct EdgeBlurProps {
    pub target: BlurTarget,
    pub edge: Edge,
    pub height: AttrValue,
    #[prop_or(2.0)]
    pub strength: f64,
    #[prop_or(5)]
    pub divisions: u32,
}

/// Progressive blur pinned to one edge of the page or of its parent.
#[function_component(EdgeBlur)]
pub fn edge_blur(props: &EdgeBlurProps) -> Html {
    let layers = use_memo((props.divisions, props.strength.to_bits()), |(divisions, strength)| {
        blur_layers(*divisions, f64::from_bits(*strength))
    });
    let container_style = blur_container_style(props.target, props.edge, &props.height);

    html! {
        <div class="edge-blur" style={container_style} aria-hidden="true">
            { for layers.iter().map(|layer| html! {
                <div class="edge-blur-layer" style={layer.style(props.edge)} />
            }) }
        </div>
    }
}
