//! egui rendering. Everything here reads from or mutates [`crate::state::AppState`];
//! no aggregation happens in this layer.

pub mod panels;
pub mod plot;
pub mod table;
