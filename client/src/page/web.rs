use super::{Page, Submission, Task, FORM_ID, MESSAGE_ID};
use crate::{
    error::PageError,
    form::Field,
    handler::LoginForm,
    log_to,
    logging::LogType,
    message::{Message, BASE_CLASS},
};
use std::{rc::Rc, time::Duration};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Document, Element, HtmlInputElement, Window};

/// The page the script was loaded into.
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or_else(|| PageError::Js("no window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| PageError::Js("no document".to_owned()))?;
        Ok(WebPage { window, document })
    }

    fn element(&self, id: &'static str) -> Result<Element, PageError> {
        self.document
            .get_element_by_id(id)
            .ok_or(PageError::MissingElement(id))
    }
}

impl Page for WebPage {
    fn field_value(&self, field: Field) -> Result<String, PageError> {
        let input = self
            .element(field.id())?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| PageError::WrongElementType(field.id()))?;
        Ok(input.value())
    }

    fn alert(&self, text: &str) -> Result<(), PageError> {
        self.window.alert_with_message(text)?;
        Ok(())
    }

    fn render_message(&self, message: Option<&Message>) -> Result<(), PageError> {
        let element = self.element(MESSAGE_ID)?;
        match message {
            Some(message) => {
                element.set_text_content(Some(&message.text));
                element.set_class_name(&message.class_name());
            }
            None => {
                element.set_text_content(Some(""));
                element.set_class_name(BASE_CLASS);
            }
        }
        Ok(())
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> Result<(), PageError> {
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref::<js_sys::Function>(),
                millis,
            )?;
        Ok(())
    }
}

impl Submission for web_sys::Event {
    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self);
    }
}

/// Attaches `form` to the submit event of `#loginForm` for the rest of the page's life.
pub fn bind(form: LoginForm<WebPage>) -> Result<(), PageError> {
    let target = form.page().element(FORM_ID)?;
    let form = Rc::new(form);

    let on_submit = Closure::wrap(Box::new(move |e: web_sys::Event| {
        match form.submit(&e) {
            Ok(outcome) => log_to!(LogType::Form, "Submission handled: {:?}", outcome),
            Err(e) => ::log::error!(target: LogType::Form.target(), "Submission failed: {}", e),
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    log_to!(LogType::General, "Login form bound to '#{}'", FORM_ID);
    Ok(())
}
