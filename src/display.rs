use localfit_core::{
    Explanation, HardwareProfile, ModelDescriptor, RecommendationResult, UseCase, UseCaseCategory,
};
use serde::Serialize;

pub fn display_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn display_profile(hardware: &HardwareProfile) {
    println!("\n=== Hardware Profile ===");
    println!("GPU vendor:  {}", hardware.gpu_vendor);
    println!("VRAM:        {:.1} GB", hardware.vram_gb);
    println!("RAM:         {:.1} GB", hardware.ram_gb);
    println!("CPU:         {}", hardware.cpu_type);
    println!("OS:          {}", hardware.os);
    println!("Disk space:  {:.1} GB", hardware.disk_space_gb);
    println!("Memory:      {}", hardware.class().label());
}

pub fn display_recommendations(hardware: &HardwareProfile, result: &RecommendationResult) {
    display_profile(hardware);
    println!("\n{}", result.hardware_notes);
    println!("{}\n", result.summary);

    if result.models.is_empty() {
        return;
    }

    println!(
        "{:<3} {:<40} {:>6} {:>8} {:>9}  {:<8} {}",
        "#", "Model", "Score", "Params", "VRAM", "Backend", "Reason"
    );
    println!("{}", "-".repeat(110));
    for (i, rec) in result.models.iter().enumerate() {
        println!(
            "{:<3} {:<40} {:>6} {:>8} {:>6.1} GB  {:<8} {}",
            i + 1,
            truncate(&rec.name, 40),
            rec.score,
            rec.size_params,
            rec.vram_req,
            rec.backend.label(),
            rec.reason
        );
    }

    for rec in &result.models {
        println!("\n{}  ({})", rec.name, rec.hf_url);
        if let Some(quality) = &rec.quality {
            println!("  Quality:    {quality}");
        }
        if let Some(cmd) = &rec.ollama_command {
            println!("  Ollama:     {cmd}");
        }
        println!("  LM Studio:  {}", rec.lm_studio_command);
        if let Some(cmd) = &rec.llama_cpp_command {
            println!("  llama.cpp:  {cmd}");
        }
        if let Some(cmd) = &rec.install_command {
            println!("  Install:    {cmd}");
        }
        if let Some(link) = &rec.pinokio_link {
            println!("  Pinokio:    {link}");
        }
    }
}

pub fn display_explanation(model: &ModelDescriptor, explanation: &Explanation) {
    println!("\n=== {} ===", model.name);
    println!("Hardware class: {}", explanation.hardware_class.label());
    match &explanation.excluded {
        Some(reason) => println!("Eligible:       no, {reason}"),
        None => println!("Eligible:       yes"),
    }
    println!();
    println!("  Hardware    {:>5}", explanation.components.hardware);
    println!("  Capability  {:>5}", explanation.components.capability);
    println!("  Locality    {:>5}", explanation.components.locality);
    println!("  License     {:>5}", explanation.components.license);
    println!("  Total       {:>5}", explanation.total);
}

pub fn display_all_models(models: &[ModelDescriptor]) {
    println!("\n=== Model Catalog ({} models) ===\n", models.len());
    print_model_table(models.iter());
}

pub fn display_search_results(models: &[&ModelDescriptor], query: &str) {
    if models.is_empty() {
        println!("\nNo models found matching '{query}'");
        return;
    }
    println!("\nFound {} model(s) matching '{query}':\n", models.len());
    print_model_table(models.iter().copied());
}

pub fn display_providers(providers: &[&str]) {
    println!("\n=== Providers ===");
    for provider in providers {
        println!("  {provider}");
    }
}

pub fn display_use_cases() {
    let mut current: Option<UseCaseCategory> = None;
    for use_case in UseCase::ALL {
        if current != Some(use_case.category()) {
            current = Some(use_case.category());
            println!("\n{}", use_case.category().label());
        }
        let tags = use_case.tags();
        let tags = if tags.is_empty() {
            "(no tags)".to_string()
        } else {
            tags.join(", ")
        };
        println!("  {:<36} {:<36} {}", use_case.label(), use_case.slug(), tags);
    }
}

fn print_model_table<'a>(models: impl Iterator<Item = &'a ModelDescriptor>) {
    println!(
        "{:<40} {:<16} {:>7} {:>7} {:>7}  {:<8} {:<11} {}",
        "Name", "Provider", "Params", "RAM", "VRAM", "Backend", "Quality", "Tasks"
    );
    println!("{}", "-".repeat(110));
    for m in models {
        println!(
            "{:<40} {:<16} {:>6}B {:>5.1}GB {:>5.1}GB  {:<8} {:<11} {}",
            truncate(&m.name, 40),
            truncate(&m.provider, 16),
            m.params_b,
            m.min_hardware.ram_gb,
            m.min_hardware.gpu_vram_gb,
            m.backend.label(),
            m.quality.as_deref().unwrap_or("-"),
            m.tasks.join(", ")
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
