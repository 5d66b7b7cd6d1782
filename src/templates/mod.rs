pub mod layout;
pub mod components;
pub mod forms;
pub mod pages;

pub use layout::*;
pub use components::*;
pub use forms::*;
pub use pages::*;
