//! UI Widgets - modular, reusable UI components
//!
//! Each widget reads its inputs by value and reports changes through
//! callbacks to the hosting app.

pub mod sunlight;
