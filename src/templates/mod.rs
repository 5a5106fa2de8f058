pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{car_card, card, pagination_nav};
pub use layouts::desktop::desktop_layout;
