//! Turns ranked candidates into the recommendation records shown to users.

use serde::Serialize;
use tracing::info;

use crate::hardware::{HardwareClass, HardwareProfile};
use crate::models::{Backend, ModelDatabase, ModelDescriptor};
use crate::rank::{Query, ScoredCandidate, rank_candidates};
use crate::use_cases::UseCase;

const PINOKIO_OLLAMA_LINK: &str = "pinokio://install/github.com/pinokiofactory/ollama";
const HUGGING_FACE_URL: &str = "https://huggingface.co";

/// Raw scores above this are shown as a full 100.
const BENCHMARK_SCORE_CAP: i64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Benchmark {
    pub name: String,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRecommendation {
    pub id: String,
    pub name: String,
    pub publisher: String,
    pub provider: String,
    pub repo: String,
    pub size_params: String,
    pub vram_req: f64,
    pub recommended_quantization: String,
    /// Catalog quality grade, e.g. "Very Good".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    pub description: String,
    pub reason: String,
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinokio_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama_command: Option<String>,
    pub lm_studio_command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llama_cpp_command: Option<String>,
    pub hf_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hf_gguf: Option<String>,
    /// Package install command, MLX builds only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,
    #[serde(rename = "type")]
    pub model_type: String,
    pub license: String,
    pub tags: Vec<String>,
    pub inference_speed: String,
    pub backend: Backend,
    pub apple_silicon_optimized: bool,
    pub libraries: Vec<String>,
    pub providers: Vec<String>,
    pub benchmarks: Vec<Benchmark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub models: Vec<ModelRecommendation>,
    pub summary: String,
    pub hardware_notes: String,
}

/// Recommend up to five catalog models for `hardware` and the requested use cases.
///
/// Never fails. An empty `use_cases` slice matches every model; hardware that
/// fits nothing yields an empty `models` list.
pub fn evaluate(
    catalog: &ModelDatabase,
    hardware: &HardwareProfile,
    use_cases: &[UseCase],
) -> RecommendationResult {
    let query = Query::new(hardware, use_cases);
    let ranked = rank_candidates(catalog, &query);

    let models: Vec<ModelRecommendation> = ranked
        .iter()
        .map(|candidate| assemble(candidate, &query))
        .collect();

    let summary = match ranked.first() {
        Some(top) => format!(
            "Found {} optimized models. Top match: {}.",
            models.len(),
            top.model.name
        ),
        None => "Found 0 optimized models. No model matched the requested hardware and use cases."
            .to_string(),
    };

    info!(
        class = query.class.label(),
        use_cases = use_cases.len(),
        tags = query.requested_tags.len(),
        matches = models.len(),
        top = ranked.first().map(|c| c.model.name.as_str()).unwrap_or("-"),
        "evaluated catalog"
    );

    RecommendationResult {
        models,
        summary,
        hardware_notes: hardware_notes(query.class).to_string(),
    }
}

impl ModelDatabase {
    pub fn evaluate(
        &self,
        hardware: &HardwareProfile,
        use_cases: &[UseCase],
    ) -> RecommendationResult {
        evaluate(self, hardware, use_cases)
    }
}

pub fn hardware_notes(class: HardwareClass) -> &'static str {
    match class {
        HardwareClass::UnifiedMemory => {
            "Apple Silicon detected. Prioritizing MLX models & Efficiency."
        }
        HardwareClass::IntegratedShared => {
            "Shared Graphics Memory detected. Prioritizing RAM-efficient models."
        }
        HardwareClass::Discrete => "Discrete GPU detected. Prioritizing GGUF/Ollama.",
    }
}

/// Why the model suits this machine, first matching rule wins.
pub fn fit_reason(
    model: &ModelDescriptor,
    hardware: &HardwareProfile,
    class: HardwareClass,
) -> &'static str {
    if class == HardwareClass::UnifiedMemory && model.apple_silicon_optimized {
        "Optimized for Apple Silicon (MLX). Runs natively on Neural Engine."
    } else if class.is_shared_memory() {
        "Compatible with Shared Memory architecture."
    } else if hardware.vram_gb >= model.min_hardware.gpu_vram_gb {
        "VRAM sufficient for full offloading."
    } else if model.supports_gguf() {
        "Can run partially on CPU via GGUF offloading."
    } else {
        "Fits hardware constraints."
    }
}

/// Ollama tag to pull. Falls back to the lowercased first hyphen-separated
/// token of the name, which collides for families like `Qwen2-VL-*`/`Qwen2-*`.
pub fn ollama_tag(model: &ModelDescriptor) -> String {
    if let Some(tag) = &model.ollama_tag {
        return tag.clone();
    }
    model
        .name
        .split('-')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Lowercased name with everything outside `[a-z0-9-]` replaced by `-`.
pub fn safe_file_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn format_params(params_b: f64) -> String {
    format!("{params_b}B")
}

fn assemble(candidate: &ScoredCandidate<'_>, query: &Query<'_>) -> ModelRecommendation {
    let model = candidate.model;
    let is_gguf = model.backend == Backend::Gguf;
    let hf_url = format!("{HUGGING_FACE_URL}/{}", model.repo);

    ModelRecommendation {
        id: model.name.clone(),
        name: model.name.clone(),
        publisher: model.publisher.clone(),
        provider: model.provider.clone(),
        repo: model.repo.clone(),
        size_params: format_params(model.params_b),
        vram_req: model.min_hardware.gpu_vram_gb,
        recommended_quantization: model.quantization.clone(),
        quality: model.quality.clone(),
        description: model.description.clone(),
        reason: fit_reason(model, query.hardware, query.class).to_string(),
        score: candidate.score,
        pinokio_link: model.pinokio.then(|| PINOKIO_OLLAMA_LINK.to_string()),
        ollama_command: is_gguf.then(|| format!("ollama pull {}", ollama_tag(model))),
        lm_studio_command: format!("Search \"{}\"", model.name),
        llama_cpp_command: is_gguf
            .then(|| format!("./main -m {}.gguf -p \"User:\"", safe_file_name(&model.name))),
        hf_gguf: is_gguf.then(|| format!("{hf_url}/resolve/main/{}.gguf", model.name)),
        hf_url,
        install_command: (model.backend == Backend::Mlx).then(|| {
            format!(
                "pip install mlx-lm && python -m mlx_lm.generate --model {} --prompt \"Hello\"",
                model.repo
            )
        }),
        model_type: model.model_type.clone(),
        license: model.license.clone(),
        tags: model.tasks.clone(),
        inference_speed: "N/A".to_string(),
        backend: model.backend,
        apple_silicon_optimized: model.apple_silicon_optimized,
        libraries: model.libraries.clone(),
        providers: model.providers.clone(),
        benchmarks: vec![Benchmark {
            name: "Fit Score".to_string(),
            score: candidate.score.min(BENCHMARK_SCORE_CAP) as f64 / 3.0,
            max_score: 100.0,
        }],
    }
}
