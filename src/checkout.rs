use crate::constants::CHECKOUT_CONTENT_TYPE_HEADER;
use crate::core::{redirect_target, CheckoutError, CHECKOUT_ENDPOINT};
use crate::dom;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn transport(e: JsValue) -> CheckoutError {
    CheckoutError::Transport(format!("{:?}", e))
}

/// POST to the purchase endpoint and return the redirect URL it hands back.
pub async fn request_checkout() -> Result<String, CheckoutError> {
    let window = web::window().ok_or_else(|| CheckoutError::Transport("no window".into()))?;

    let init = web::RequestInit::new();
    init.set_method("POST");
    let request = web::Request::new_with_str_and_init(CHECKOUT_ENDPOINT, &init).map_err(transport)?;

    let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;

    let content_type = response
        .headers()
        .get(CHECKOUT_CONTENT_TYPE_HEADER)
        .ok()
        .flatten()
        .unwrap_or_default();
    let body = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .unwrap_or_default();

    redirect_target(response.status(), &content_type, &body)
}

/// Fire-and-forget purchase: navigate on success, log on any failure.
pub fn purchase() {
    spawn_local(async {
        match request_checkout().await {
            Ok(url) => {
                log::info!("[checkout] redirecting");
                dom::navigate(&url);
            }
            Err(e) => log::error!("[checkout] purchase failed: {}", e),
        }
    });
}
