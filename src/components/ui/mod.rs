pub mod badge;
pub mod button;
pub mod card;
pub mod checkbox;
pub mod input;
pub mod label;
pub mod spinner;
pub mod table;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use badge::*;
pub use button::*;
pub use card::*;
pub use checkbox::*;
pub use input::*;
pub use label::*;
pub use spinner::*;
pub use table::*;
