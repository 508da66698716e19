//! Use cases offered to the user and the capability tags they expand to.
//!
//! The tag table is the only bridge between what a user asks for and the
//! `tasks` recorded on catalog entries. Tags are compared by exact string
//! equality, so a tag that never appears in the catalog simply never matches.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::Error;

pub const TAG_TEXT_TO_IMAGE: &str = "text-to-image";
pub const TAG_TEXT_TO_VIDEO: &str = "text-to-video";

/// Grouping used when listing use cases. Has no effect on scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UseCaseCategory {
    Multimodal,
    ComputerVision,
    NaturalLanguage,
    Audio,
    Tabular,
    ReinforcementLearning,
    Other,
    Science,
}

impl UseCaseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            UseCaseCategory::Multimodal => "Multimodal",
            UseCaseCategory::ComputerVision => "Computer Vision",
            UseCaseCategory::NaturalLanguage => "Natural Language Processing",
            UseCaseCategory::Audio => "Audio",
            UseCaseCategory::Tabular => "Tabular",
            UseCaseCategory::ReinforcementLearning => "Reinforcement Learning",
            UseCaseCategory::Other => "Other",
            UseCaseCategory::Science => "Science & Research",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UseCase {
    // Multimodal
    AudioTextToText,
    ImageTextToText,
    VisualQuestionAnswering,
    DocumentQuestionAnswering,
    VideoTextToText,
    VisualDocumentRetrieval,
    AnyToAny,

    // Computer vision
    DepthEstimation,
    ImageClassification,
    ObjectDetection,
    ImageSegmentation,
    TextToImage,
    ImageToText,
    ImageToImage,
    ImageToVideo,
    UnconditionalImageGeneration,
    VideoClassification,
    TextToVideo,
    ZeroShotImageClassification,
    MaskGeneration,
    ZeroShotObjectDetection,
    TextTo3d,
    ImageTo3d,
    ThreeDModeling,
    ImageFeatureExtraction,
    KeypointDetection,
    VideoToVideo,

    // Natural language
    TextClassification,
    TokenClassification,
    TableQuestionAnswering,
    QuestionAnswering,
    ZeroShotClassification,
    Translation,
    Summarization,
    FeatureExtraction,
    TextGeneration,
    FillMask,
    SentenceSimilarity,
    TextRanking,

    // Audio
    TextToSpeech,
    TextToAudio,
    AutomaticSpeechRecognition,
    AudioToAudio,
    AudioClassification,
    VoiceActivityDetection,

    // Tabular
    TabularClassification,
    TabularRegression,
    TimeSeriesForecasting,

    // Reinforcement learning
    ReinforcementLearning,
    Robotics,

    // Other
    GraphMachineLearning,

    // Science
    Science,
    Physics,
    Chemistry,
    Biology,
    Medicine,
    ProteinBiology,
    Genomics,
    EnvironmentalScience,
    Mathematics,
    Astronomy,
}

impl UseCase {
    pub const ALL: &[UseCase] = &[
        UseCase::AudioTextToText,
        UseCase::ImageTextToText,
        UseCase::VisualQuestionAnswering,
        UseCase::DocumentQuestionAnswering,
        UseCase::VideoTextToText,
        UseCase::VisualDocumentRetrieval,
        UseCase::AnyToAny,
        UseCase::DepthEstimation,
        UseCase::ImageClassification,
        UseCase::ObjectDetection,
        UseCase::ImageSegmentation,
        UseCase::TextToImage,
        UseCase::ImageToText,
        UseCase::ImageToImage,
        UseCase::ImageToVideo,
        UseCase::UnconditionalImageGeneration,
        UseCase::VideoClassification,
        UseCase::TextToVideo,
        UseCase::ZeroShotImageClassification,
        UseCase::MaskGeneration,
        UseCase::ZeroShotObjectDetection,
        UseCase::TextTo3d,
        UseCase::ImageTo3d,
        UseCase::ThreeDModeling,
        UseCase::ImageFeatureExtraction,
        UseCase::KeypointDetection,
        UseCase::VideoToVideo,
        UseCase::TextClassification,
        UseCase::TokenClassification,
        UseCase::TableQuestionAnswering,
        UseCase::QuestionAnswering,
        UseCase::ZeroShotClassification,
        UseCase::Translation,
        UseCase::Summarization,
        UseCase::FeatureExtraction,
        UseCase::TextGeneration,
        UseCase::FillMask,
        UseCase::SentenceSimilarity,
        UseCase::TextRanking,
        UseCase::TextToSpeech,
        UseCase::TextToAudio,
        UseCase::AutomaticSpeechRecognition,
        UseCase::AudioToAudio,
        UseCase::AudioClassification,
        UseCase::VoiceActivityDetection,
        UseCase::TabularClassification,
        UseCase::TabularRegression,
        UseCase::TimeSeriesForecasting,
        UseCase::ReinforcementLearning,
        UseCase::Robotics,
        UseCase::GraphMachineLearning,
        UseCase::Science,
        UseCase::Physics,
        UseCase::Chemistry,
        UseCase::Biology,
        UseCase::Medicine,
        UseCase::ProteinBiology,
        UseCase::Genomics,
        UseCase::EnvironmentalScience,
        UseCase::Mathematics,
        UseCase::Astronomy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UseCase::AudioTextToText => "Audio-Text-to-Text",
            UseCase::ImageTextToText => "Image-Text-to-Text",
            UseCase::VisualQuestionAnswering => "Visual Question Answering",
            UseCase::DocumentQuestionAnswering => "Document Question Answering",
            UseCase::VideoTextToText => "Video-Text-to-Text",
            UseCase::VisualDocumentRetrieval => "Visual Document Retrieval",
            UseCase::AnyToAny => "Any-to-Any",
            UseCase::DepthEstimation => "Depth Estimation",
            UseCase::ImageClassification => "Image Classification",
            UseCase::ObjectDetection => "Object Detection",
            UseCase::ImageSegmentation => "Image Segmentation",
            UseCase::TextToImage => "Text-to-Image",
            UseCase::ImageToText => "Image-to-Text",
            UseCase::ImageToImage => "Image-to-Image",
            UseCase::ImageToVideo => "Image-to-Video",
            UseCase::UnconditionalImageGeneration => "Unconditional Image Generation",
            UseCase::VideoClassification => "Video Classification",
            UseCase::TextToVideo => "Text-to-Video",
            UseCase::ZeroShotImageClassification => "Zero-Shot Image Classification",
            UseCase::MaskGeneration => "Mask Generation",
            UseCase::ZeroShotObjectDetection => "Zero-Shot Object Detection",
            UseCase::TextTo3d => "Text-to-3D",
            UseCase::ImageTo3d => "Image-to-3D",
            UseCase::ThreeDModeling => "3D Modeling",
            UseCase::ImageFeatureExtraction => "Image Feature Extraction",
            UseCase::KeypointDetection => "Keypoint Detection",
            UseCase::VideoToVideo => "Video-to-Video",
            UseCase::TextClassification => "Text Classification",
            UseCase::TokenClassification => "Token Classification",
            UseCase::TableQuestionAnswering => "Table Question Answering",
            UseCase::QuestionAnswering => "Question Answering",
            UseCase::ZeroShotClassification => "Zero-Shot Classification",
            UseCase::Translation => "Translation",
            UseCase::Summarization => "Summarization",
            UseCase::FeatureExtraction => "Feature Extraction",
            UseCase::TextGeneration => "Text Generation",
            UseCase::FillMask => "Fill-Mask",
            UseCase::SentenceSimilarity => "Sentence Similarity",
            UseCase::TextRanking => "Text Ranking",
            UseCase::TextToSpeech => "Text-to-Speech",
            UseCase::TextToAudio => "Text-to-Audio",
            UseCase::AutomaticSpeechRecognition => "Automatic Speech Recognition",
            UseCase::AudioToAudio => "Audio-to-Audio",
            UseCase::AudioClassification => "Audio Classification",
            UseCase::VoiceActivityDetection => "Voice Activity Detection",
            UseCase::TabularClassification => "Tabular Classification",
            UseCase::TabularRegression => "Tabular Regression",
            UseCase::TimeSeriesForecasting => "Time Series Forecasting",
            UseCase::ReinforcementLearning => "Reinforcement Learning",
            UseCase::Robotics => "Robotics",
            UseCase::GraphMachineLearning => "Graph Machine Learning",
            UseCase::Science => "Science",
            UseCase::Physics => "Physics",
            UseCase::Chemistry => "Chemistry",
            UseCase::Biology => "Biology",
            UseCase::Medicine => "Medicine",
            UseCase::ProteinBiology => "Protein Biology",
            UseCase::Genomics => "Genomics",
            UseCase::EnvironmentalScience => "Environmental Science",
            UseCase::Mathematics => "Mathematics",
            UseCase::Astronomy => "Astronomy",
        }
    }

    pub fn category(&self) -> UseCaseCategory {
        match self {
            UseCase::AudioTextToText
            | UseCase::ImageTextToText
            | UseCase::VisualQuestionAnswering
            | UseCase::DocumentQuestionAnswering
            | UseCase::VideoTextToText
            | UseCase::VisualDocumentRetrieval
            | UseCase::AnyToAny => UseCaseCategory::Multimodal,
            UseCase::DepthEstimation
            | UseCase::ImageClassification
            | UseCase::ObjectDetection
            | UseCase::ImageSegmentation
            | UseCase::TextToImage
            | UseCase::ImageToText
            | UseCase::ImageToImage
            | UseCase::ImageToVideo
            | UseCase::UnconditionalImageGeneration
            | UseCase::VideoClassification
            | UseCase::TextToVideo
            | UseCase::ZeroShotImageClassification
            | UseCase::MaskGeneration
            | UseCase::ZeroShotObjectDetection
            | UseCase::TextTo3d
            | UseCase::ImageTo3d
            | UseCase::ThreeDModeling
            | UseCase::ImageFeatureExtraction
            | UseCase::KeypointDetection
            | UseCase::VideoToVideo => UseCaseCategory::ComputerVision,
            UseCase::TextClassification
            | UseCase::TokenClassification
            | UseCase::TableQuestionAnswering
            | UseCase::QuestionAnswering
            | UseCase::ZeroShotClassification
            | UseCase::Translation
            | UseCase::Summarization
            | UseCase::FeatureExtraction
            | UseCase::TextGeneration
            | UseCase::FillMask
            | UseCase::SentenceSimilarity
            | UseCase::TextRanking => UseCaseCategory::NaturalLanguage,
            UseCase::TextToSpeech
            | UseCase::TextToAudio
            | UseCase::AutomaticSpeechRecognition
            | UseCase::AudioToAudio
            | UseCase::AudioClassification
            | UseCase::VoiceActivityDetection => UseCaseCategory::Audio,
            UseCase::TabularClassification
            | UseCase::TabularRegression
            | UseCase::TimeSeriesForecasting => UseCaseCategory::Tabular,
            UseCase::ReinforcementLearning
            | UseCase::Robotics => UseCaseCategory::ReinforcementLearning,
            UseCase::GraphMachineLearning => UseCaseCategory::Other,
            UseCase::Science
            | UseCase::Physics
            | UseCase::Chemistry
            | UseCase::Biology
            | UseCase::Medicine
            | UseCase::ProteinBiology
            | UseCase::Genomics
            | UseCase::EnvironmentalScience
            | UseCase::Mathematics
            | UseCase::Astronomy => UseCaseCategory::Science,
        }
    }

    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            UseCase::AudioTextToText => &["audio", "chat", "asr"],
            UseCase::ImageTextToText => &["vision", "ocr"],
            UseCase::VisualQuestionAnswering => &["vision", "qa", "chat"],
            UseCase::DocumentQuestionAnswering => &["ocr", "qa", "vision"],
            UseCase::VideoTextToText => &["vision", "video-analysis"],
            UseCase::VisualDocumentRetrieval => &["ocr", "vision"],
            UseCase::AnyToAny => &["multimodal", "vision", "audio"],
            UseCase::DepthEstimation => &["vision"],
            UseCase::ImageClassification => &["vision"],
            UseCase::ObjectDetection => &["vision", "object-detection"],
            UseCase::ImageSegmentation => &["vision"],
            UseCase::TextToImage => &["text-to-image"],
            UseCase::ImageToText => &["vision", "ocr"],
            UseCase::ImageToImage => &["text-to-image", "vision"],
            UseCase::ImageToVideo => &["text-to-video"],
            UseCase::UnconditionalImageGeneration => &["text-to-image"],
            UseCase::VideoClassification => &["vision", "video-analysis"],
            UseCase::TextToVideo => &["text-to-video"],
            UseCase::ZeroShotImageClassification => &["vision"],
            UseCase::TextTo3d => &["vision", "text-to-3d", "3d"],
            UseCase::ImageTo3d => &["vision", "image-to-3d", "3d"],
            UseCase::ThreeDModeling => &["3d", "vision", "text-to-3d", "image-to-3d"],
            UseCase::TextClassification => &["chat", "reasoning"],
            UseCase::TokenClassification => &["chat"],
            UseCase::TableQuestionAnswering => &["qa", "reasoning"],
            UseCase::QuestionAnswering => &["qa", "chat"],
            UseCase::ZeroShotClassification => &["chat", "reasoning"],
            UseCase::Translation => &["translation", "multilingual", "chat"],
            UseCase::Summarization => &["chat", "reasoning"],
            UseCase::FeatureExtraction => &["chat"],
            UseCase::TextGeneration => &["chat", "creative"],
            UseCase::FillMask => &["chat"],
            UseCase::SentenceSimilarity => &["chat"],
            UseCase::TextRanking => &["chat"],
            UseCase::TextToSpeech => &["audio", "text-to-speech", "tts"],
            UseCase::TextToAudio => &["audio", "text-to-audio", "tts"],
            UseCase::AutomaticSpeechRecognition => &["audio", "asr", "transcription"],
            UseCase::AudioToAudio => &["audio", "audio-to-audio"],
            UseCase::AudioClassification => &["audio", "audio-classification", "classification"],
            UseCase::TabularClassification => &["coding", "reasoning"],
            UseCase::TabularRegression => &["coding", "reasoning"],
            UseCase::ReinforcementLearning => &["coding", "reasoning", "domain-adaptation"],
            UseCase::Robotics => &["coding", "vision"],
            UseCase::GraphMachineLearning => &["coding", "reasoning"],
            UseCase::Science => &["science", "research", "reasoning"],
            UseCase::Physics => &["physics", "science", "research"],
            UseCase::Chemistry => &["chemistry", "science", "research"],
            UseCase::Biology => &["biology", "medicine", "science"],
            UseCase::Medicine => &["medicine", "biology", "science"],
            UseCase::ProteinBiology => &["protein", "biology", "science"],
            UseCase::Genomics => &["genomics", "biology", "science"],
            UseCase::EnvironmentalScience => &["environmental-science", "research"],
            UseCase::Mathematics => &["math", "reasoning", "formula"],
            UseCase::Astronomy => &["science", "physics", "research"],
            UseCase::MaskGeneration
            | UseCase::ZeroShotObjectDetection
            | UseCase::ImageFeatureExtraction
            | UseCase::KeypointDetection
            | UseCase::VideoToVideo
            | UseCase::VoiceActivityDetection
            | UseCase::TimeSeriesForecasting => &[],
        }
    }

    /// Kebab-case identifier, e.g. `visual-question-answering`.
    pub fn slug(&self) -> String {
        slugify(self.label())
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

impl FromStr for UseCase {
    type Err = Error;

    /// Accepts the display label or the slug, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slugify(s);
        UseCase::ALL
            .iter()
            .copied()
            .find(|uc| uc.label().eq_ignore_ascii_case(s.trim()) || uc.slug() == wanted)
            .ok_or_else(|| Error::UnknownUseCase(s.to_string()))
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for UseCase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Expand use cases into the union of their capability tags.
///
/// Use cases without a table entry contribute nothing.
pub fn map_use_cases(use_cases: &[UseCase]) -> BTreeSet<&'static str> {
    use_cases
        .iter()
        .flat_map(|uc| uc.tags().iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_use_cases_listed_once() {
        assert_eq!(UseCase::ALL.len(), 61);
        let unique: BTreeSet<_> = UseCase::ALL.iter().collect();
        assert_eq!(unique.len(), UseCase::ALL.len());
    }

    #[test]
    fn test_parse_label_and_slug() {
        assert_eq!(
            "Text-to-Image".parse::<UseCase>().unwrap(),
            UseCase::TextToImage
        );
        assert_eq!(
            "text-to-image".parse::<UseCase>().unwrap(),
            UseCase::TextToImage
        );
        assert_eq!(
            "visual question answering".parse::<UseCase>().unwrap(),
            UseCase::VisualQuestionAnswering
        );
        assert_eq!(
            "3d-modeling".parse::<UseCase>().unwrap(),
            UseCase::ThreeDModeling
        );
        assert_eq!("fill-mask".parse::<UseCase>().unwrap(), UseCase::FillMask);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Telepathy".parse::<UseCase>().unwrap_err();
        assert!(matches!(err, Error::UnknownUseCase(ref s) if s == "Telepathy"));
    }

    #[test]
    fn test_slug_round_trips_for_every_use_case() {
        for uc in UseCase::ALL {
            assert_eq!(uc.slug().parse::<UseCase>().unwrap(), *uc, "{}", uc);
        }
    }

    #[test]
    fn test_map_unions_tags() {
        let tags = map_use_cases(&[UseCase::TextGeneration, UseCase::QuestionAnswering]);
        let expected: BTreeSet<&str> = ["chat", "creative", "qa"].into_iter().collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_map_unmapped_use_case_is_empty() {
        assert!(map_use_cases(&[UseCase::MaskGeneration]).is_empty());
        assert!(map_use_cases(&[UseCase::TimeSeriesForecasting]).is_empty());
        assert!(map_use_cases(&[]).is_empty());

        let tags = map_use_cases(&[UseCase::VoiceActivityDetection, UseCase::TextToVideo]);
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec![TAG_TEXT_TO_VIDEO]);
    }

    #[test]
    fn test_generation_use_cases_map_to_prompt_tags() {
        assert!(UseCase::TextToImage.tags().contains(&TAG_TEXT_TO_IMAGE));
        assert!(UseCase::ImageToVideo.tags().contains(&TAG_TEXT_TO_VIDEO));
    }

    #[test]
    fn test_category() {
        assert_eq!(UseCase::Genomics.category(), UseCaseCategory::Science);
        assert_eq!(UseCase::Robotics.category(), UseCaseCategory::ReinforcementLearning);
        assert_eq!(UseCase::AnyToAny.category(), UseCaseCategory::Multimodal);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&UseCase::AutomaticSpeechRecognition).unwrap();
        assert_eq!(json, "\"Automatic Speech Recognition\"");
    }
}
