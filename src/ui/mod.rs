//! UI module - painting helpers shared by the app views

pub mod components;
