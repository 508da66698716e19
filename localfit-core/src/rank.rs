//! Candidate filtering and ranking.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::fit::ScoreComponents;
use crate::hardware::{HardwareClass, HardwareProfile};
use crate::models::{ModelDatabase, ModelDescriptor};
use crate::use_cases::{UseCase, map_use_cases};

/// Length of the shortlist returned to callers.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Everything derived from the caller's input that ranking needs, computed once.
#[derive(Debug, Clone)]
pub struct Query<'h> {
    pub hardware: &'h HardwareProfile,
    pub class: HardwareClass,
    pub requested_tags: BTreeSet<&'static str>,
    /// False when no use case was requested; every model is then relevant.
    pub task_filter: bool,
}

impl<'h> Query<'h> {
    pub fn new(hardware: &'h HardwareProfile, use_cases: &[UseCase]) -> Self {
        Query {
            hardware,
            class: hardware.class(),
            requested_tags: map_use_cases(use_cases),
            task_filter: !use_cases.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub model: &'a ModelDescriptor,
    pub score: i64,
}

/// Why a model was ruled out before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Exclusion {
    InsufficientRam { required_gb: f64, available_gb: f64 },
    InsufficientVram { required_gb: f64, available_gb: f64 },
    /// GGUF offload without enough RAM. Never fires in practice: the RAM
    /// floor is checked first and rejects the same models as `InsufficientRam`.
    NoOffloadHeadroom { required_gb: f64, available_gb: f64 },
    NoMatchingTask,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::InsufficientRam {
                required_gb,
                available_gb,
            } => write!(
                f,
                "needs {required_gb:.1} GB RAM, only {available_gb:.1} GB available"
            ),
            Exclusion::InsufficientVram {
                required_gb,
                available_gb,
            } => write!(
                f,
                "needs {required_gb:.1} GB VRAM ({available_gb:.1} GB available) and has no GGUF build for CPU offload"
            ),
            Exclusion::NoOffloadHeadroom {
                required_gb,
                available_gb,
            } => write!(
                f,
                "VRAM is short and {available_gb:.1} GB RAM cannot hold the {required_gb:.1} GB needed for CPU offload"
            ),
            Exclusion::NoMatchingTask => {
                f.write_str("none of its tasks match the requested use cases")
            }
        }
    }
}

/// Hard eligibility rules, checked in order before any scoring.
pub fn eligibility(model: &ModelDescriptor, query: &Query<'_>) -> Result<(), Exclusion> {
    let hw = query.hardware;
    let min = &model.min_hardware;

    if min.ram_gb > hw.ram_gb {
        return Err(Exclusion::InsufficientRam {
            required_gb: min.ram_gb,
            available_gb: hw.ram_gb,
        });
    }

    if !query.class.is_shared_memory() && hw.vram_gb < min.gpu_vram_gb {
        if !model.supports_gguf() {
            return Err(Exclusion::InsufficientVram {
                required_gb: min.gpu_vram_gb,
                available_gb: hw.vram_gb,
            });
        }
        // Offload needs the model to fit in RAM. Implied by the floor above.
        if hw.ram_gb < min.ram_gb {
            return Err(Exclusion::NoOffloadHeadroom {
                required_gb: min.ram_gb,
                available_gb: hw.ram_gb,
            });
        }
    }

    if query.task_filter
        && !model.matches_any_task(&query.requested_tags)
        && !model.is_prompt_helper_for(&query.requested_tags)
    {
        return Err(Exclusion::NoMatchingTask);
    }

    Ok(())
}

/// Every eligible model with a positive score, best first.
///
/// The sort is stable, so equal scores keep catalog order.
pub fn score_candidates<'a>(
    catalog: &'a ModelDatabase,
    query: &Query<'_>,
) -> Vec<ScoredCandidate<'a>> {
    let mut candidates: Vec<ScoredCandidate<'a>> = catalog
        .get_all_models()
        .iter()
        .filter_map(|model| {
            if let Err(reason) = eligibility(model, query) {
                debug!(model = %model.name, %reason, "excluded");
                return None;
            }
            let score = ScoreComponents::compute(
                model,
                query.hardware,
                query.class,
                &query.requested_tags,
            )
            .total();
            if score <= 0 {
                debug!(model = %model.name, score, "dropped non-positive score");
                return None;
            }
            Some(ScoredCandidate { model, score })
        })
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// The top [`MAX_RECOMMENDATIONS`] candidates.
pub fn rank_candidates<'a>(
    catalog: &'a ModelDatabase,
    query: &Query<'_>,
) -> Vec<ScoredCandidate<'a>> {
    let mut candidates = score_candidates(catalog, query);
    candidates.truncate(MAX_RECOMMENDATIONS);
    candidates
}

/// Score breakdown for a single model, whether or not it is eligible.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub model: String,
    pub hardware_class: HardwareClass,
    pub excluded: Option<Exclusion>,
    pub components: ScoreComponents,
    pub total: i64,
}

pub fn explain(model: &ModelDescriptor, query: &Query<'_>) -> Explanation {
    let components =
        ScoreComponents::compute(model, query.hardware, query.class, &query.requested_tags);
    Explanation {
        model: model.name.clone(),
        hardware_class: query.class,
        excluded: eligibility(model, query).err(),
        components,
        total: components.total(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{CpuType, GpuVendor};
    use crate::models::{Backend, test_model};

    fn nvidia(vram_gb: f64, ram_gb: f64) -> HardwareProfile {
        HardwareProfile {
            gpu_vendor: GpuVendor::Nvidia,
            vram_gb,
            ram_gb,
            cpu_type: CpuType::IntelAmd,
            os: "Windows".to_string(),
            disk_space_gb: 64.0,
        }
    }

    fn pytorch_model(name: &str, ram_gb: f64, vram_gb: f64) -> ModelDescriptor {
        let mut model = test_model(name);
        model.formats = vec!["safetensors".to_string()];
        model.backend = Backend::Pytorch;
        model.min_hardware.ram_gb = ram_gb;
        model.min_hardware.gpu_vram_gb = vram_gb;
        model
    }

    #[test]
    fn test_ram_floor_is_inclusive() {
        let hw = nvidia(8.0, 8.0);
        let query = Query::new(&hw, &[UseCase::TextGeneration]);

        let model = test_model("m"); // needs exactly 8 GB
        assert_eq!(eligibility(&model, &query), Ok(()));

        let mut model = test_model("m");
        model.min_hardware.ram_gb = 8.5;
        assert_eq!(
            eligibility(&model, &query),
            Err(Exclusion::InsufficientRam {
                required_gb: 8.5,
                available_gb: 8.0
            })
        );
    }

    #[test]
    fn test_ram_floor_applies_to_shared_memory() {
        let hw = HardwareProfile {
            gpu_vendor: GpuVendor::AppleSilicon,
            cpu_type: CpuType::AppleSilicon,
            ..nvidia(0.0, 8.0)
        };
        let query = Query::new(&hw, &[]);
        let model = pytorch_model("big", 16.0, 0.0);
        assert!(matches!(
            eligibility(&model, &query),
            Err(Exclusion::InsufficientRam { .. })
        ));
    }

    #[test]
    fn test_vram_rule_for_discrete() {
        let hw = nvidia(8.0, 32.0);
        let query = Query::new(&hw, &[]);

        let model = pytorch_model("needs-24", 16.0, 24.0);
        assert!(matches!(
            eligibility(&model, &query),
            Err(Exclusion::InsufficientVram { .. })
        ));

        // GGUF with RAM headroom can offload
        let mut model = test_model("gguf");
        model.min_hardware.gpu_vram_gb = 24.0;
        model.min_hardware.ram_gb = 16.0;
        assert_eq!(eligibility(&model, &query), Ok(()));
    }

    #[test]
    fn test_gguf_short_on_ram_hits_ram_floor_first() {
        let hw = nvidia(4.0, 6.0);
        let query = Query::new(&hw, &[]);
        // Short on both VRAM and RAM
        let model = test_model("gguf");
        assert_eq!(
            eligibility(&model, &query),
            Err(Exclusion::InsufficientRam {
                required_gb: 8.0,
                available_gb: 6.0
            })
        );
    }

    #[test]
    fn test_vram_rule_skipped_on_shared_memory() {
        let hw = HardwareProfile {
            gpu_vendor: GpuVendor::Intel,
            ..nvidia(0.0, 32.0)
        };
        let query = Query::new(&hw, &[]);
        let model = pytorch_model("needs-24", 16.0, 24.0);
        assert_eq!(eligibility(&model, &query), Ok(()));
    }

    #[test]
    fn test_task_filter() {
        let hw = nvidia(8.0, 16.0);
        let mut vision = test_model("vision");
        vision.tasks = vec!["vision".to_string()];

        let query = Query::new(&hw, &[UseCase::TextGeneration]);
        assert_eq!(eligibility(&vision, &query), Err(Exclusion::NoMatchingTask));

        let query = Query::new(&hw, &[UseCase::ObjectDetection]);
        assert_eq!(eligibility(&vision, &query), Ok(()));

        // Empty selection skips the filter
        let query = Query::new(&hw, &[]);
        assert_eq!(eligibility(&vision, &query), Ok(()));
    }

    #[test]
    fn test_task_filter_with_unmapped_use_case_excludes_everything() {
        let hw = nvidia(8.0, 16.0);
        let query = Query::new(&hw, &[UseCase::MaskGeneration]);
        assert!(query.task_filter);
        assert_eq!(
            eligibility(&test_model("m"), &query),
            Err(Exclusion::NoMatchingTask)
        );
    }

    #[test]
    fn test_prompt_helper_passes_task_filter() {
        let hw = nvidia(8.0, 16.0);
        let mut helper = test_model("helper");
        helper.text_to_video_prompt = true;

        let query = Query::new(&hw, &[UseCase::TextToVideo]);
        assert_eq!(eligibility(&helper, &query), Ok(()));

        let query = Query::new(&hw, &[UseCase::TextToImage]);
        assert_eq!(eligibility(&helper, &query), Err(Exclusion::NoMatchingTask));
    }

    #[test]
    fn test_rank_sorts_and_truncates() {
        let mut models = Vec::new();
        for i in 0..8 {
            let mut model = test_model(&format!("m{i}"));
            // Alternate pinokio to spread scores
            model.pinokio = i % 2 == 1;
            models.push(model);
        }
        let db = ModelDatabase::from_models(models);
        let hw = nvidia(8.0, 16.0);
        let query = Query::new(&hw, &[UseCase::TextGeneration]);

        let ranked = rank_candidates(&db, &query);
        assert_eq!(ranked.len(), MAX_RECOMMENDATIONS);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        // The four pinokio models lead, in catalog order
        let names: Vec<&str> = ranked.iter().map(|c| c.model.name.as_str()).collect();
        assert_eq!(names, vec!["m1", "m3", "m5", "m7", "m0"]);
    }

    #[test]
    fn test_eligible_models_score_positive() {
        let db = ModelDatabase::new();
        let profiles = [
            nvidia(0.0, 4.0),
            nvidia(24.0, 64.0),
            HardwareProfile {
                gpu_vendor: GpuVendor::Intel,
                disk_space_gb: 0.0,
                ..nvidia(0.0, 8.0)
            },
            HardwareProfile {
                gpu_vendor: GpuVendor::AppleSilicon,
                cpu_type: CpuType::AppleSilicon,
                ..nvidia(0.0, 16.0)
            },
        ];
        for hw in &profiles {
            let query = Query::new(hw, &[]);
            for model in db.get_all_models() {
                if eligibility(model, &query).is_ok() {
                    let total = explain(model, &query).total;
                    assert!(total > 0, "{} scored {total}", model.name);
                }
            }
            let scored = score_candidates(&db, &query);
            assert!(scored.iter().all(|c| c.score > 0));
        }
    }

    #[test]
    fn test_explain_reports_exclusion_and_components() {
        let hw = nvidia(8.0, 16.0);
        let query = Query::new(&hw, &[UseCase::TextGeneration]);
        let model = pytorch_model("needs-24", 16.0, 24.0);

        let explanation = explain(&model, &query);
        assert!(matches!(
            explanation.excluded,
            Some(Exclusion::InsufficientVram { .. })
        ));
        assert_eq!(explanation.total, explanation.components.total());
        assert_eq!(explanation.hardware_class, HardwareClass::Discrete);
    }

    #[test]
    fn test_exclusion_display() {
        let reason = Exclusion::InsufficientRam {
            required_gb: 16.0,
            available_gb: 8.0,
        };
        assert_eq!(
            reason.to_string(),
            "needs 16.0 GB RAM, only 8.0 GB available"
        );
    }
}
