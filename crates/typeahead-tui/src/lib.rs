pub mod action;
pub mod app;
pub mod components;
pub mod controller;
pub mod dropdown;
pub mod event;
pub mod page;
pub mod renderer;
pub mod theme;

#[cfg(test)]
mod testing;

pub use action::{Action, NavKey};
pub use app::App;
pub use controller::{ControllerSettings, InputController};
pub use page::TerminalPage;
pub use renderer::{DropdownRenderer, SearchPage};
