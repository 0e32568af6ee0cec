//! Services for castmap-api

pub mod aggregation;
pub mod cast_view_service;
pub mod credit_client;
pub mod fetch_coordinator;
pub mod identity_clusterer;
pub mod name_normalizer;
pub mod similarity;

pub use aggregation::{collect_appearances, AggregationViews};
pub use cast_view_service::CastViewService;
pub use credit_client::{CastEntry, CreditError, CreditSource, Credits, MovieCredits, TmdbCreditClient};
pub use fetch_coordinator::{CreditDataset, FetchCoordinator, FetchError, FetchPhase};
pub use identity_clusterer::{IdentityClusterer, IdentityGroup};
pub use name_normalizer::normalize_role_label;
pub use similarity::{edit_ratio, token_set_ratio, RoleScores, SimilarityMatcher};
