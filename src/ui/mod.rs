pub mod info;
pub mod popup;

#[cfg(feature = "egui")]
pub mod view;
