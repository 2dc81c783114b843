//! Domain layer: component model, decoding and rendering
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod component;
pub mod decoder;
pub mod error;
pub mod render;
pub mod view;

pub use component::{
    ColumnData, Component, ComponentType, Definition, PageData, TextData, UnknownComponentType,
};
pub use decoder::{DecodeResult, Decoder, DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
pub use error::DecodeError;
pub use render::render;
pub use view::{Axis, View};
