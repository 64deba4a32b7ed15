//! Descriptor-driven renderers shared by every entity screen.

pub mod detail;
pub mod table;

pub use detail::{DetailModal, Field};
pub use table::{Column, Rendered, TableView};
