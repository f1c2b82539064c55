// Page-level ids and names the web build looks for.

// Optional call-to-action element; clicking it starts a checkout
pub const BUY_BUTTON_ID: &str = "buy-button";

pub const CHECKOUT_CONTENT_TYPE_HEADER: &str = "content-type";
