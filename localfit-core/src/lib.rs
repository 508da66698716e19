pub mod error;
pub mod fit;
pub mod hardware;
pub mod models;
pub mod rank;
pub mod recommend;
pub mod use_cases;

pub use error::{Error, Result};
pub use fit::{ScoreComponents, score};
pub use hardware::{CpuType, GpuVendor, HardwareClass, HardwareProfile};
pub use models::{Backend, MinHardware, ModelDatabase, ModelDescriptor};
pub use rank::{
    Exclusion, Explanation, MAX_RECOMMENDATIONS, Query, ScoredCandidate, eligibility, explain,
    rank_candidates,
};
pub use recommend::{Benchmark, ModelRecommendation, RecommendationResult, evaluate};
pub use use_cases::{UseCase, UseCaseCategory, map_use_cases};
