use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::use_cases::{TAG_TEXT_TO_IMAGE, TAG_TEXT_TO_VIDEO};

/// Runtime a catalog entry is packaged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Mlx,
    Gguf,
    Onnx,
    Pytorch,
    #[serde(other)]
    Other,
}

impl Backend {
    pub fn label(&self) -> &'static str {
        match self {
            Backend::Mlx => "MLX",
            Backend::Gguf => "GGUF",
            Backend::Onnx => "ONNX",
            Backend::Pytorch => "PyTorch",
            Backend::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinHardware {
    pub cpu: String,
    pub ram_gb: f64,
    pub gpu_vram_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    /// Hugging Face repository ID.
    pub repo: String,
    pub publisher: String,
    pub provider: String,
    pub params_b: f64,
    #[serde(rename = "type")]
    pub model_type: String,
    pub license: String,
    pub formats: Vec<String>,
    pub backend: Backend,
    pub quantization: String,
    #[serde(default)]
    pub apple_silicon_optimized: bool,
    pub min_hardware: MinHardware,
    /// Capability tags, matched against the tags requested use cases map to.
    pub tasks: Vec<String>,
    /// One-click Pinokio installer available.
    #[serde(default)]
    pub pinokio: bool,
    #[serde(default)]
    pub text_to_video_prompt: bool,
    #[serde(default)]
    pub text_to_image_prompt: bool,
    pub description: String,
    /// Editorial grade shown alongside recommendations.
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub libraries: Vec<String>,
    /// Hosted inference providers.
    #[serde(default)]
    pub providers: Vec<String>,
    /// Canonical Ollama tag. When absent one is guessed from the name.
    #[serde(default)]
    pub ollama_tag: Option<String>,
}

impl ModelDescriptor {
    /// Exact, case-sensitive match against the catalog's format labels.
    pub fn has_format(&self, format: &str) -> bool {
        self.formats.iter().any(|f| f == format)
    }

    pub fn supports_gguf(&self) -> bool {
        self.has_format("GGUF")
    }

    /// GGUF and ONNX weights are taken as runnable on CPU alone.
    pub fn cpu_runnable(&self) -> bool {
        self.supports_gguf() || self.has_format("ONNX")
    }

    pub fn has_task(&self, tag: &str) -> bool {
        self.tasks.iter().any(|t| t == tag)
    }

    pub fn matches_any_task(&self, requested: &BTreeSet<&str>) -> bool {
        self.tasks.iter().any(|t| requested.contains(t.as_str()))
    }

    /// True when the model can write prompts for a requested generation task
    /// even though it does not generate the media itself.
    pub fn is_prompt_helper_for(&self, requested: &BTreeSet<&str>) -> bool {
        (self.text_to_video_prompt && requested.contains(TAG_TEXT_TO_VIDEO))
            || (self.text_to_image_prompt && requested.contains(TAG_TEXT_TO_IMAGE))
    }
}

const CATALOG_JSON: &str = include_str!("../data/models.json");

/// Read-only model catalog. Built once and shared by reference.
#[derive(Debug, Clone)]
pub struct ModelDatabase {
    models: Vec<ModelDescriptor>,
}

impl Default for ModelDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelDatabase {
    /// Load the catalog compiled into the crate.
    pub fn new() -> Self {
        Self::from_json(CATALOG_JSON).expect("Failed to parse embedded models.json")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let models: Vec<ModelDescriptor> = serde_json::from_str(json).map_err(Error::Catalog)?;
        Ok(Self::from_models(models))
    }

    pub fn from_models(models: Vec<ModelDescriptor>) -> Self {
        ModelDatabase { models }
    }

    pub fn get_all_models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Case-insensitive substring search over name and description.
    pub fn find_model(&self, query: &str) -> Vec<&ModelDescriptor> {
        let query_lower = query.to_lowercase();
        self.models
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&query_lower)
                    || m.description.to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    pub fn filter_by_provider<'a>(
        models: impl IntoIterator<Item = &'a ModelDescriptor>,
        provider: &str,
    ) -> Vec<&'a ModelDescriptor> {
        models
            .into_iter()
            .filter(|m| m.provider.eq_ignore_ascii_case(provider))
            .collect()
    }

    /// Distinct providers, sorted.
    pub fn providers(&self) -> Vec<&str> {
        self.models
            .iter()
            .map(|m| m.provider.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Resolve a user-typed selector: an exact (case-insensitive) name wins,
    /// otherwise a unique partial match.
    pub fn resolve_model_selector(&self, selector: &str) -> Result<&ModelDescriptor> {
        let needle = selector.trim().to_lowercase();
        if needle.is_empty() {
            return Err(Error::EmptySelector);
        }

        let exact: Vec<&ModelDescriptor> = self
            .models
            .iter()
            .filter(|m| m.name.to_lowercase() == needle)
            .collect();
        if exact.len() == 1 {
            return Ok(exact[0]);
        }

        let partial: Vec<&ModelDescriptor> = self
            .models
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect();

        match partial.len() {
            0 => Err(Error::ModelNotFound(selector.to_string())),
            1 => Ok(partial[0]),
            _ => {
                let matches = partial
                    .iter()
                    .take(10)
                    .map(|m| m.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(Error::AmbiguousModel {
                    selector: selector.to_string(),
                    matches,
                })
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn test_model(name: &str) -> ModelDescriptor {
    ModelDescriptor {
        name: name.to_string(),
        repo: format!("test/{name}"),
        publisher: "Test".to_string(),
        provider: "Hugging Face".to_string(),
        params_b: 7.0,
        model_type: "LLM".to_string(),
        license: "Apache 2.0".to_string(),
        formats: vec!["GGUF".to_string()],
        backend: Backend::Gguf,
        quantization: "Q4_K_M".to_string(),
        apple_silicon_optimized: false,
        min_hardware: MinHardware {
            cpu: "x86_64".to_string(),
            ram_gb: 8.0,
            gpu_vram_gb: 6.0,
        },
        tasks: vec!["chat".to_string()],
        pinokio: false,
        text_to_video_prompt: false,
        text_to_image_prompt: false,
        description: "Test model".to_string(),
        quality: None,
        libraries: vec![],
        providers: vec![],
        ollama_tag: None,
    }
}
