//! Browser binding.
//!
//! [`WebDocument`] and [`WebScheduler`] implement the deck traits over
//! `web-sys`; [`mount`] wires every listener and returns a [`DeckHandle`]
//! exposing `goToPage`, `nextPage`, `prevPage` and `currentPage` to
//! JavaScript. Listeners are bound and the deck started once the DOM has
//! been parsed. Panics and `tracing` events go to the browser console.

use crate::builder::DeckBuilder;
use crate::config::DeckConfig;
use crate::core::{NAV_CONTROL, PAGE_LINK_ATTR, PAGE_TEXT};
use crate::deck::Deck;
use crate::decor::PointerPhase;
use crate::effects::{Document, Scheduler, Timer, TimerHandle};
use crate::input::{page_from_number, Handled, InputEvent};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    DocumentReadyState, Event, EventTarget, HtmlElement, HtmlImageElement, KeyboardEvent,
    TouchEvent, TransitionEvent, Window,
};

type SharedDeck = Rc<RefCell<Deck<WebDocument, WebScheduler>>>;
type TimerSink = Rc<RefCell<Option<Box<dyn Fn(Timer)>>>>;

/// The live DOM.
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for WebDocument {
    type Element = HtmlElement;

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn elements_with_class(&self, class: &str) -> Vec<HtmlElement> {
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn data_attribute(&self, element: &HtmlElement, name: &str) -> Option<String> {
        element.get_attribute(&format!("data-{name}"))
    }

    fn has_class(&self, element: &HtmlElement, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&mut self, element: &HtmlElement, class: &str) {
        if let Err(error) = element.class_list().add_1(class) {
            warn!(?error, class, "failed to add class");
        }
    }

    fn remove_class(&mut self, element: &HtmlElement, class: &str) {
        if let Err(error) = element.class_list().remove_1(class) {
            warn!(?error, class, "failed to remove class");
        }
    }

    fn set_style(&mut self, element: &HtmlElement, property: &str, value: &str) {
        if let Err(error) = element.style().set_property(property, value) {
            warn!(?error, property, "failed to set style");
        }
    }

    fn preload_image(&mut self, url: &str) {
        match HtmlImageElement::new() {
            Ok(image) => image.set_src(url),
            Err(error) => warn!(?error, url, "failed to create image for preloading"),
        }
    }
}

/// `window.setTimeout` based timers.
///
/// Elapsed timers go to the sink installed by [`mount`], which hands them
/// to the deck.
pub struct WebScheduler {
    window: Window,
    sink: TimerSink,
}

impl Scheduler for WebScheduler {
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerHandle {
        let sink = Rc::clone(&self.sink);
        let callback = Closure::once_into_js(move || {
            if let Some(deliver) = sink.borrow().as_ref() {
                deliver(timer);
            }
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref::<js_sys::Function>(),
                millis,
            )
        {
            Ok(handle) => TimerHandle(handle as u64),
            Err(error) => {
                warn!(?error, ?timer, "failed to schedule timer");
                TimerHandle(0)
            }
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.0 as i32);
    }
}

/// JavaScript-facing handle of a mounted deck.
#[wasm_bindgen]
pub struct DeckHandle {
    deck: SharedDeck,
}

#[wasm_bindgen]
impl DeckHandle {
    /// Returns whether the transition started. Numbers that are not whole
    /// page numbers are refused.
    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&self, page: f64) -> bool {
        match page_from_number(page) {
            Some(page) => self.deck.borrow_mut().go_to_page(page).is_ok(),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&self) -> bool {
        self.deck.borrow_mut().next_page().is_ok()
    }

    #[wasm_bindgen(js_name = prevPage)]
    pub fn prev_page(&self) -> bool {
        self.deck.borrow_mut().prev_page().is_ok()
    }

    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> u32 {
        self.deck.borrow().current_page()
    }

    /// Current page, phase and history as JSON.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.deck.borrow().snapshot().to_json().map_err(to_js)
    }
}

/// Mount a deck with the default configuration on the current page.
#[wasm_bindgen]
pub fn mount() -> Result<DeckHandle, JsValue> {
    mount_with_config(DeckConfig::default())
}

/// Mount a deck configured by a TOML document.
#[wasm_bindgen(js_name = mountWithToml)]
pub fn mount_with_toml(config: &str) -> Result<DeckHandle, JsValue> {
    let config = DeckConfig::from_toml_str(config).map_err(to_js)?;
    mount_with_config(config)
}

pub fn mount_with_config(config: DeckConfig) -> Result<DeckHandle, JsValue> {
    install_diagnostics();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let sink: TimerSink = Rc::new(RefCell::new(None));
    let deck = DeckBuilder::new()
        .config(config)
        .document(WebDocument::new(document.clone()))
        .scheduler(WebScheduler {
            window: window.clone(),
            sink: Rc::clone(&sink),
        })
        .build()
        .map_err(to_js)?;
    let deck: SharedDeck = Rc::new(RefCell::new(deck));

    let weak = Rc::downgrade(&deck);
    *sink.borrow_mut() = Some(Box::new(move |timer: Timer| {
        if let Some(deck) = weak.upgrade() {
            deck.borrow_mut().fire(timer);
        }
    }));

    if must_wait_for_dom(document.ready_state()) {
        let (w, d, shared) = (window.clone(), document.clone(), Rc::clone(&deck));
        listen(&document, "DOMContentLoaded", move |_event: Event| {
            if let Err(error) = activate(&w, &d, &shared) {
                warn!(?error, "failed to activate deck");
            }
        })?;
    } else {
        activate(&window, &document, &deck)?;
    }

    Ok(DeckHandle { deck })
}

/// Send panics and `tracing` events at `info` and above to the browser
/// console. Returns whether this call installed the subscriber.
pub fn install_diagnostics() -> bool {
    console_error_panic_hook::set_once();

    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(console)
        .try_init()
        .is_ok()
}

fn must_wait_for_dom(state: DocumentReadyState) -> bool {
    matches!(state, DocumentReadyState::Loading)
}

fn activate(window: &Window, document: &web_sys::Document, deck: &SharedDeck) -> Result<(), JsValue> {
    bind_document(document, deck)?;
    bind_window(window, deck)?;
    bind_elements(document, deck)?;

    let fragment = window.location().hash().ok().filter(|h| !h.is_empty());
    deck.borrow_mut().start(fragment.as_deref());
    Ok(())
}

fn bind_document(document: &web_sys::Document, deck: &SharedDeck) -> Result<(), JsValue> {
    let d = Rc::clone(deck);
    listen(document, "keydown", move |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        if dispatch(&d, InputEvent::Key(key)).prevent_default {
            event.prevent_default();
        }
    })?;

    let d = Rc::clone(deck);
    listen(document, "click", move |_event: Event| {
        dispatch(&d, InputEvent::Click);
    })?;

    let d = Rc::clone(deck);
    listen(document, "touchstart", move |event: Event| {
        if let Some(x) = touch_x(&event) {
            dispatch(&d, InputEvent::TouchStart { x });
        }
    })?;

    let d = Rc::clone(deck);
    listen(document, "touchend", move |event: Event| {
        if let Some(x) = touch_x(&event) {
            dispatch(&d, InputEvent::TouchEnd { x });
        }
    })
}

fn bind_window(window: &Window, deck: &SharedDeck) -> Result<(), JsValue> {
    for name in ["hashchange", "popstate"] {
        let d = Rc::clone(deck);
        let w = window.clone();
        listen(window, name, move |_event: Event| {
            if let Ok(fragment) = w.location().hash() {
                dispatch(&d, InputEvent::FragmentChanged(fragment));
            }
        })?;
    }

    let d = Rc::clone(deck);
    listen(window, "resize", move |_event: Event| {
        dispatch(&d, InputEvent::Resize);
    })
}

fn bind_elements(document: &web_sys::Document, deck: &SharedDeck) -> Result<(), JsValue> {
    let (pages, controls, texts) = {
        let deck = deck.borrow();
        let doc = deck.document();
        let pages: Vec<HtmlElement> = (1..=deck.total_pages())
            .filter_map(|page| doc.element_by_id(&format!("{}{}", deck.config().page_id_prefix, page)))
            .collect();
        (
            pages,
            doc.elements_with_class(NAV_CONTROL),
            doc.elements_with_class(PAGE_TEXT),
        )
    };

    for page in pages {
        let d = Rc::clone(deck);
        listen(&page, "transitionend", move |event: Event| {
            let Some(transition) = event.dyn_ref::<TransitionEvent>() else {
                return;
            };
            let target = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlElement>().ok());
            if let Some(element) = target {
                dispatch(
                    &d,
                    InputEvent::TransitionEnd {
                        element,
                        property: transition.property_name(),
                    },
                );
            }
        })?;
    }

    for control in controls {
        let d = Rc::clone(deck);
        let element = control.clone();
        listen(&control, "click", move |_event: Event| {
            dispatch(&d, InputEvent::NavClick(element.clone()));
        })?;
    }

    let links = document.query_selector_all(&format!("[data-{PAGE_LINK_ATTR}]"))?;
    for link in (0..links.length())
        .filter_map(|i| links.item(i))
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
    {
        let d = Rc::clone(deck);
        let element = link.clone();
        listen(&link, "click", move |event: Event| {
            if dispatch(&d, InputEvent::LinkClick(element.clone())).prevent_default {
                event.prevent_default();
            }
        })?;
    }

    for text in texts {
        for name in ["mouseenter", "mouseleave", "mousedown", "mouseup"] {
            let d = Rc::clone(deck);
            let element = text.clone();
            listen(&text, name, move |event: Event| {
                if let Some(phase) = PointerPhase::from_event_type(&event.type_()) {
                    dispatch(
                        &d,
                        InputEvent::Pointer {
                            element: element.clone(),
                            phase,
                        },
                    );
                }
            })?;
        }
    }

    Ok(())
}

fn listen<F>(target: &EventTarget, name: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn dispatch(deck: &SharedDeck, event: InputEvent<HtmlElement>) -> Handled {
    match deck.try_borrow_mut() {
        Ok(mut deck) => deck.handle(event),
        Err(_) => {
            warn!("deck busy, dropping event");
            Handled::default()
        }
    }
}

fn touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_x()))
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}
