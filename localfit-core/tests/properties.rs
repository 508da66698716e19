use localfit_core::{
    CpuType, GpuVendor, HardwareProfile, MAX_RECOMMENDATIONS, ModelDatabase, UseCase, evaluate,
    map_use_cases,
};
use proptest::prelude::*;

fn arb_vendor() -> impl Strategy<Value = GpuVendor> {
    prop_oneof![
        Just(GpuVendor::Nvidia),
        Just(GpuVendor::Amd),
        Just(GpuVendor::Intel),
        Just(GpuVendor::AppleSilicon),
        "[A-Za-z ]{1,12}".prop_map(GpuVendor::from),
    ]
}

fn arb_cpu() -> impl Strategy<Value = CpuType> {
    prop_oneof![Just(CpuType::IntelAmd), Just(CpuType::AppleSilicon)]
}

fn arb_hardware() -> impl Strategy<Value = HardwareProfile> {
    (
        arb_vendor(),
        -4.0f64..48.0,
        -4.0f64..128.0,
        arb_cpu(),
        -10.0f64..2048.0,
    )
        .prop_map(|(gpu_vendor, vram_gb, ram_gb, cpu_type, disk_space_gb)| {
            HardwareProfile {
                gpu_vendor,
                vram_gb,
                ram_gb,
                cpu_type,
                os: "Linux".to_string(),
                disk_space_gb,
            }
        })
}

fn arb_use_cases() -> impl Strategy<Value = Vec<UseCase>> {
    prop::collection::vec(prop::sample::select(UseCase::ALL), 0..4)
}

proptest! {
    #[test]
    fn results_are_bounded_and_sorted(hw in arb_hardware(), use_cases in arb_use_cases()) {
        let db = ModelDatabase::new();
        let result = evaluate(&db, &hw, &use_cases);

        prop_assert!(result.models.len() <= MAX_RECOMMENDATIONS);
        for pair in result.models.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        prop_assert!(result.models.iter().all(|m| m.score > 0));
    }

    #[test]
    fn evaluation_is_deterministic(hw in arb_hardware(), use_cases in arb_use_cases()) {
        let db = ModelDatabase::new();
        prop_assert_eq!(evaluate(&db, &hw, &use_cases), evaluate(&db, &hw, &use_cases));
    }

    #[test]
    fn recommended_models_fit_in_ram(hw in arb_hardware(), use_cases in arb_use_cases()) {
        let db = ModelDatabase::new();
        let result = evaluate(&db, &hw, &use_cases);

        for rec in &result.models {
            let model = db.find_by_name(&rec.name).expect("recommended model is in the catalog");
            prop_assert!(model.min_hardware.ram_gb <= hw.ram_gb);
        }
    }

    #[test]
    fn recommended_models_are_relevant(
        hw in arb_hardware(),
        use_cases in prop::collection::vec(prop::sample::select(UseCase::ALL), 1..4),
    ) {
        let db = ModelDatabase::new();
        let tags = map_use_cases(&use_cases);
        let result = evaluate(&db, &hw, &use_cases);

        for rec in &result.models {
            let model = db.find_by_name(&rec.name).expect("recommended model is in the catalog");
            prop_assert!(model.matches_any_task(&tags) || model.is_prompt_helper_for(&tags));
        }
    }

    #[test]
    fn summary_names_top_match(hw in arb_hardware(), use_cases in arb_use_cases()) {
        let db = ModelDatabase::new();
        let result = evaluate(&db, &hw, &use_cases);

        match result.models.first() {
            Some(top) => {
                let expected = format!(
                    "Found {} optimized models. Top match: {}.",
                    result.models.len(),
                    top.name
                );
                prop_assert_eq!(result.summary, expected);
            }
            None => prop_assert!(result.summary.starts_with("Found 0 optimized models.")),
        }
    }
}
