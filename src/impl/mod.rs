// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod entity_store_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod engine_config_model;
        pub(crate) mod store_key_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod entity_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod classification;
        pub(crate) mod engine_config;
        pub(crate) mod entity;
        pub(crate) mod entity_cache;
        pub(crate) mod leaderboard;
        pub(crate) mod rankings;
        pub(crate) mod transaction;
    }
    pub(crate) mod logic {
        pub(crate) mod aggregate_updater;
        pub(crate) mod classifier;
        pub(crate) mod leaderboard_impl;
        pub(crate) mod orchestrator;
        pub(crate) mod sorter;
    }
    pub(crate) mod repositories {
        pub(crate) mod entity_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod process_batch_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod report_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::classification::*;
        pub use crate::domain::entities::engine_config::*;
        pub use crate::domain::entities::entity::*;
        pub use crate::domain::entities::entity_cache::*;
        pub use crate::domain::entities::leaderboard::*;
        pub use crate::domain::entities::rankings::*;
        pub use crate::domain::entities::transaction::*;
    }

    pub mod engine {
        pub use crate::domain::logic::classifier::{resolved_counterparty_id, synthetic_id};
        pub use crate::domain::logic::orchestrator::UpdateEngine;
    }

    pub mod store {
        pub use crate::data::datasources::entity_store_datasource::{
            EntityStore, MemoryStoreDatasource,
        };
        pub use crate::data::models::store_key_model::StoreKey;
    }
}
