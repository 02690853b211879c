use gloo_timers::future::TimeoutFuture;
use log::warn;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, KeyboardEvent};
use yew::prelude::*;

use super::brand::{Brand, DEFAULT_LOGO};
use super::controller::{body_max_height, PopupController};
use super::PopupPlan;
use crate::utils::dom::WindowScroll;

#[derive(Properties, PartialEq, Clone)]
pub struct CallPopupProps {
    pub plan: PopupPlan,
}

fn element_height(node: &NodeRef) -> f64 {
    node.cast::<Element>()
        .map(|el| el.get_bounding_client_rect().height())
        .unwrap_or(0.0)
}

fn render_brand(brand: &Brand) -> Html {
    // a broken logo just disappears
    let hide_on_error = Callback::from(|e: Event| {
        if let Some(img) = e.target_dyn_into::<HtmlElement>() {
            let _ = img.style().set_property("display", "none");
        }
    });
    match brand {
        Brand::Logo(src) => html! {
            <img src={src.clone()} alt="Logo" class="logo" onerror={hide_on_error} />
        },
        Brand::Label(label) => html! {
            <div class="popup-brand">{ label.clone() }</div>
        },
        Brand::Default => html! {
            <img src={DEFAULT_LOGO} alt="Logo" class="logo" onerror={hide_on_error} />
        },
    }
}

#[function_component(CallPopup)]
pub fn call_popup(props: &CallPopupProps) -> Html {
    let controller = use_mut_ref(|| PopupController::new(WindowScroll));
    let visible = use_state_eq(|| false);
    let body_height = use_state_eq(|| None::<f64>);
    let close_ref = use_node_ref();
    let header_ref = use_node_ref();
    let footer_ref = use_node_ref();

    // Show once after the delay. A reload starts over.
    {
        let controller = controller.clone();
        let visible = visible.clone();
        let delay = props.plan.delay_ms;
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    TimeoutFuture::new(delay).await;
                    if controller.borrow_mut().timer_elapsed() {
                        visible.set(true);
                    }
                });
                || ()
            },
            (),
        );
    }

    let close = {
        let controller = controller.clone();
        let visible = visible.clone();
        Callback::from(move |_: ()| {
            if controller.borrow_mut().close() {
                visible.set(false);
            }
        })
    };

    // Escape closes
    {
        let close = close.clone();
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> =
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        let callback = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                            if e.key() == "Escape" {
                                close.emit(());
                            }
                        });
                        if let Err(e) = document
                            .add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())
                        {
                            warn!("Failed to listen for Escape: {:?}", e);
                        }
                        Box::new(move || {
                            let _ = document.remove_event_listener_with_callback(
                                "keydown",
                                callback.as_ref().unchecked_ref(),
                            );
                        })
                    } else {
                        Box::new(|| ())
                    };
                move || {
                    destructor();
                }
            },
            (),
        );
    }

    // While open: fit the body to the viewport, keep it fitted on resize, focus the close button
    {
        let body_height = body_height.clone();
        let close_ref = close_ref.clone();
        let header_ref = header_ref.clone();
        let footer_ref = footer_ref.clone();
        use_effect_with_deps(
            move |visible: &bool| {
                let destructor: Box<dyn FnOnce()> = match web_sys::window() {
                    Some(window) if *visible => {
                        let measure = move || {
                            let viewport = web_sys::window()
                                .and_then(|w| w.inner_height().ok())
                                .and_then(|h| h.as_f64())
                                .unwrap_or(0.0);
                            body_height.set(Some(body_max_height(
                                viewport,
                                element_height(&header_ref),
                                element_height(&footer_ref),
                            )));
                        };
                        measure();
                        if let Some(button) = close_ref.cast::<HtmlElement>() {
                            let _ = button.focus();
                        }
                        let callback = Closure::<dyn Fn()>::new(measure);
                        if let Err(e) = window
                            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
                        {
                            warn!("Failed to listen for resize: {:?}", e);
                        }
                        Box::new(move || {
                            let _ = window.remove_event_listener_with_callback(
                                "resize",
                                callback.as_ref().unchecked_ref(),
                            );
                        })
                    }
                    _ => Box::new(|| ()),
                };
                move || {
                    destructor();
                }
            },
            *visible,
        );
    }

    let onclose = Callback::from(move |_: MouseEvent| close.emit(()));
    let phone = &props.plan.content.phone;
    let body_style = (*body_height).map(|h| format!("max-height: {}px", h));

    html! {
        <div
            class={classes!("site-popup-overlay", (*visible).then_some("open"))}
            aria-hidden={(!*visible).to_string()}
        >
            <div class="site-popup-card" role="dialog" aria-modal="true" aria-label="Call to Pay Popup">
                <div class="site-popup-header" ref={header_ref}>
                    <div class="phone">{ phone.display.clone() }</div>
                    <button class="close-btn" aria-label="Close popup" ref={close_ref} onclick={onclose}>
                        {"\u{00d7}"}
                    </button>
                </div>
                <div class="site-popup-body" style={body_style}>
                    { render_brand(&props.plan.content.brand) }
                    <h4>{"Call to Pay Your Bill Now"}</h4>
                    <p>{"Fast and secure payments over the phone. Our team is available 24/7 to assist."}</p>
                    <a href={phone.href()} class="btn btn-danger call-btn">{"Call Now"}</a>
                </div>
                <div class="site-popup-footer" ref={footer_ref}>
                    <a href={phone.href()} class="sticky-call">{ format!("Call Now {}", phone.display) }</a>
                </div>
            </div>
        </div>
    }
}
