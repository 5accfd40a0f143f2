//! Capability tags attached to model metadata.

// Modalities
pub const TEXT_MODEL_TAG: &str = "TEXT_MODEL_TAG";
pub const IMAGE_MODEL_TAG: &str = "IMAGE_MODEL_TAG";
pub const CODE_MODEL_TAG: &str = "CODE_MODEL_TAG";
pub const EMBEDDING_MODEL_TAG: &str = "EMBEDDING_MODEL_TAG";

// Some model APIs expose only part of the text interface
pub const FULL_FUNCTIONALITY_TEXT_MODEL_TAG: &str = "FULL_FUNCTIONALITY_TEXT_MODEL_TAG";
pub const LIMITED_FUNCTIONALITY_TEXT_MODEL_TAG: &str = "LIMITED_FUNCTIONALITY_TEXT_MODEL_TAG";

// Prompt formats
pub const CHATML_MODEL_TAG: &str = "CHATML_MODEL_TAG";
pub const OPENAI_CHATGPT_MODEL_TAG: &str = "openai_chatgpt";
pub const ANTHROPIC_CLAUDE_1_MODEL_TAG: &str = "ANTHROPIC_CLAUDE_1_MODEL_TAG";
pub const ANTHROPIC_CLAUDE_2_MODEL_TAG: &str = "ANTHROPIC_CLAUDE_2_MODEL_TAG";

/// Emits garbage tokens at temperature 0.
pub const BUGGY_TEMP_0_TAG: &str = "BUGGY_TEMP_0_TAG";

/// Cheap models used for ablations and fine-grained analyses.
pub const ABLATION_MODEL_TAG: &str = "ABLATION_MODEL_TAG";

/// Newlines are stripped, so `\n` cannot be a stop sequence.
pub const NO_NEWLINES_TAG: &str = "NO_NEWLINES_TAG";

/// Prompts need a mode prefix such as `[NLG]`.
pub const NLG_PREFIX_TAG: &str = "NLG_PREFIX_TAG";

pub const INSTRUCTION_FOLLOWING_MODEL_TAG: &str = "INSTRUCTION_FOLLOWING_MODEL_TAG";
pub const VISION_LANGUAGE_MODEL_TAG: &str = "VISION_LANGUAGE_MODEL_TAG";

/// Supports a context window wider than the standard 2048 tokens.
pub const WIDER_CONTEXT_WINDOW_TAG: &str = "wider_context_window";
