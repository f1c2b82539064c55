//! Platform-independent switch logic. Nothing in here touches `web-sys`,
//! so the whole module builds and is tested on the host.

pub mod checkout;
pub mod constants;
pub mod cue;
pub mod easing;
pub mod host;
pub mod input;
pub mod scene;
pub mod switch;
pub mod timeline;

pub use checkout::*;
pub use constants::*;
pub use cue::*;
pub use easing::*;
pub use host::*;
pub use input::*;
pub use scene::*;
pub use switch::*;
pub use timeline::*;
