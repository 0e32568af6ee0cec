//! Data models for castmap-api

pub mod appearance;
pub mod ordered_map;

pub use appearance::{Appearance, PerformerFilter};
pub use ordered_map::OrderedMap;

/// Performer name → movie titles, in input order with duplicates kept
pub type PerformerTitles = OrderedMap<Vec<String>>;

/// Performer name → one representative appearance per identity group
pub type PerformerRoleGroups = OrderedMap<Vec<Appearance>>;

/// Representative role label → every appearance in that identity group
pub type RolePerformers = OrderedMap<Vec<Appearance>>;
