//! Widget library.
//!
//! Base widgets ([`Label`], [`Button`], [`Image`]) are near-stateless leaves.
//! Advanced widgets carry a small private state machine each and are
//! interactive by default.

mod button;
mod checkbox;
mod container;
mod dropdown;
mod icon_picker;
mod image;
mod item_grid;
mod label;
mod scroll_list;
mod slider;
mod text_input;

pub use button::{Button, ButtonState};
pub use checkbox::Checkbox;
pub use container::Container;
pub use dropdown::Dropdown;
pub use icon_picker::IconPicker;
pub use image::Image;
pub use item_grid::{GridItem, ItemGrid};
pub use label::Label;
pub use scroll_list::ScrollList;
pub use slider::Slider;
pub use text_input::TextInput;
