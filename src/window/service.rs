use std::fmt;
use std::sync::Arc;

use super::status::TokenWindow;

/// Tokenizer context handed to every window service.
///
/// Opaque to the resolver: it is passed through unchanged and never called here.
pub trait TokenizerService: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
}

/// Which window-service strategy a resolved model uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowServiceKind {
    WiderOpenAi,
    OpenAi,
    MtNlg,
    Anthropic,
    Gpt2,
    GptJ,
    GptNeoX,
    Ai21,
}

impl WindowServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WiderOpenAi => "wider_openai",
            Self::OpenAi => "openai",
            Self::MtNlg => "mt_nlg",
            Self::Anthropic => "anthropic",
            Self::Gpt2 => "gpt2",
            Self::GptJ => "gptj",
            Self::GptNeoX => "gptneox",
            Self::Ai21 => "ai21",
        }
    }
}

impl fmt::Display for WindowServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token-window accounting for one model family.
pub trait WindowService: Send + Sync + fmt::Debug {
    fn kind(&self) -> WindowServiceKind;

    fn tokenizer_name(&self) -> &str;

    /// Longest sequence the model accepts.
    fn max_sequence_length(&self) -> u64;

    /// Longest request; some APIs accept one token beyond the sequence length.
    fn max_request_length(&self) -> u64 {
        self.max_sequence_length()
    }

    fn end_of_text_token(&self) -> &str;

    fn prefix_token(&self) -> &str {
        self.end_of_text_token()
    }

    fn tokenizer(&self) -> &Arc<dyn TokenizerService>;

    /// Nested strategy used when this one cannot measure text itself.
    fn fallback(&self) -> Option<&dyn WindowService> {
        None
    }

    fn fits_within_context_window(&self, prompt_tokens: u64, expected_completion_tokens: u64) -> bool {
        prompt_tokens.saturating_add(expected_completion_tokens) <= self.max_request_length()
    }

    /// Account `prompt_tokens + expected_completion_tokens` against the request window.
    fn allocate(&self, prompt_tokens: u64, expected_completion_tokens: u64) -> TokenWindow {
        TokenWindow::new(
            self.max_request_length(),
            prompt_tokens.saturating_add(expected_completion_tokens),
        )
    }
}
