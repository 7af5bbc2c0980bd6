use smartstring::{LazyCompact, SmartString};

pub mod case_convention;
pub mod clipboard;
pub mod document;
pub mod export;
pub mod search;
pub mod selection;
pub mod stats;
pub mod theme;

pub type Tendril = SmartString<LazyCompact>;
