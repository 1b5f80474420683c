pub mod core;
pub mod gui;
pub mod mastery;
pub mod persistence;
pub mod session;
pub mod speech;
