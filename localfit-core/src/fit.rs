//! Fit-scoring engine.
//!
//! A model's fit score is the sum of four independent components. Scores are
//! unbounded above and can go negative; nothing here normalises them.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::hardware::{HardwareClass, HardwareProfile};
use crate::models::ModelDescriptor;
use crate::use_cases::{TAG_TEXT_TO_IMAGE, TAG_TEXT_TO_VIDEO};

/// Points per requested tag found in the model's task list.
pub const CAPABILITY_MATCH_POINTS: i64 = 20;
/// Points for writing prompts for a requested image/video generation task.
pub const PROMPT_HELPER_POINTS: i64 = 15;
/// Bonus for optimised builds on unified-memory hardware. Large enough to
/// lift such models above anything that lacks it.
pub const UNIFIED_MEMORY_OPTIMIZED_BONUS: i64 = 120;

/// Disk space needed for the disk bonus.
const MIN_DISK_GB: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreComponents {
    pub hardware: i64,
    pub capability: i64,
    pub locality: i64,
    pub license: i64,
}

impl ScoreComponents {
    pub fn compute(
        model: &ModelDescriptor,
        hardware: &HardwareProfile,
        class: HardwareClass,
        requested: &BTreeSet<&str>,
    ) -> Self {
        ScoreComponents {
            hardware: hardware_score(model, hardware, class),
            capability: capability_score(model, requested),
            locality: locality_score(model, class),
            license: license_score(&model.license),
        }
    }

    pub fn total(&self) -> i64 {
        self.hardware + self.capability + self.locality + self.license
    }
}

/// Total fit score of `model` on `hardware` for the requested tags.
pub fn score(
    model: &ModelDescriptor,
    hardware: &HardwareProfile,
    requested: &BTreeSet<&str>,
) -> i64 {
    ScoreComponents::compute(model, hardware, hardware.class(), requested).total()
}

fn hardware_score(
    model: &ModelDescriptor,
    hardware: &HardwareProfile,
    class: HardwareClass,
) -> i64 {
    let min = &model.min_hardware;
    let mut score = 0;

    match class {
        HardwareClass::UnifiedMemory => {
            if hardware.ram_gb >= min.ram_gb {
                score += 40;
            }
            // Headroom bonus: the more RAM left over, the better.
            if hardware.ram_gb > 0.0 {
                let headroom = ((hardware.ram_gb - min.ram_gb) / hardware.ram_gb).max(0.0);
                score += (headroom * 50.0).floor() as i64;
            }
        }
        HardwareClass::IntegratedShared => {
            let effective_vram = hardware.vram_gb.max(hardware.ram_gb * 0.5);
            if effective_vram >= min.gpu_vram_gb {
                score += 30;
            } else {
                score -= 10;
            }
            if hardware.ram_gb >= min.ram_gb {
                score += 10;
            }
        }
        HardwareClass::Discrete => {
            if hardware.vram_gb >= min.gpu_vram_gb {
                score += 40;
            } else if model.supports_gguf() && hardware.ram_gb >= min.ram_gb * 1.5 {
                // CPU offload
                score += 20;
            } else {
                score -= 30;
            }
        }
    }

    if model.cpu_runnable() {
        score += 30;
    }
    if hardware.disk_space_gb >= MIN_DISK_GB {
        score += 10;
    }

    score
}

fn capability_score(model: &ModelDescriptor, requested: &BTreeSet<&str>) -> i64 {
    requested
        .iter()
        .map(|&tag| {
            let mut points = 0;
            if model.has_task(tag) {
                points += CAPABILITY_MATCH_POINTS;
            }
            if tag == TAG_TEXT_TO_VIDEO && model.text_to_video_prompt {
                points += PROMPT_HELPER_POINTS;
            }
            if tag == TAG_TEXT_TO_IMAGE && model.text_to_image_prompt {
                points += PROMPT_HELPER_POINTS;
            }
            points
        })
        .sum()
}

fn locality_score(model: &ModelDescriptor, class: HardwareClass) -> i64 {
    let mut score = 0;
    if model.pinokio {
        score += 40;
    }
    // LLMs are the ones Ollama and friends run out of the box.
    if model.model_type == "LLM" {
        score += 30;
    }
    if model.supports_gguf() {
        score += 30;
    }
    if class == HardwareClass::UnifiedMemory && model.apple_silicon_optimized {
        score += UNIFIED_MEMORY_OPTIMIZED_BONUS;
    }
    score
}

fn license_score(license: &str) -> i64 {
    if ["Apache", "MIT", "Llama"].iter().any(|k| license.contains(k)) {
        40
    } else if ["Open", "Gemma"].iter().any(|k| license.contains(k)) {
        30
    } else {
        20
    }
}
