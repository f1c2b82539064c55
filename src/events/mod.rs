pub mod pointer;

pub use pointer::wire_switch_element;
