//! sdui: server-driven UI component trees.
//!
//! A JSON document describing a UI tree (`page`, `column`, `text`) is decoded
//! into a typed [`domain::Component`] and rendered into a host-neutral
//! [`domain::View`]:
//!
//! ```
//! use sdui::domain::{render, Decoder};
//!
//! let json = r#"{"type": "text", "id": "t1", "data": {"text": "hello"}}"#;
//! let component = Decoder::default().decode_str(json).unwrap();
//! assert_eq!(render(&component).text(), Some("hello"));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
