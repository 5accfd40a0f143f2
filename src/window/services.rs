use std::sync::Arc;

use super::service::{TokenizerService, WindowService, WindowServiceKind};

const GPT2_TOKENIZER: &str = "huggingface/gpt2";
const END_OF_TEXT: &str = "<|endoftext|>";

/// Static window parameters of one model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowProfile {
    pub kind: WindowServiceKind,
    pub tokenizer_name: &'static str,
    pub max_sequence_length: u64,
    pub max_request_length: u64,
    pub end_of_text_token: &'static str,
    pub prefix_token: &'static str,
}

impl WindowProfile {
    pub const WIDER_OPENAI: Self = Self {
        kind: WindowServiceKind::WiderOpenAi,
        tokenizer_name: GPT2_TOKENIZER,
        max_sequence_length: 4000,
        max_request_length: 4001,
        end_of_text_token: END_OF_TEXT,
        prefix_token: END_OF_TEXT,
    };

    pub const OPENAI: Self = Self {
        kind: WindowServiceKind::OpenAi,
        tokenizer_name: GPT2_TOKENIZER,
        max_sequence_length: 2048,
        max_request_length: 2049,
        end_of_text_token: END_OF_TEXT,
        prefix_token: END_OF_TEXT,
    };

    pub const MT_NLG: Self = Self {
        kind: WindowServiceKind::MtNlg,
        tokenizer_name: GPT2_TOKENIZER,
        max_sequence_length: 2048,
        max_request_length: 2049,
        end_of_text_token: END_OF_TEXT,
        prefix_token: "<<",
    };

    pub const ANTHROPIC: Self = Self {
        kind: WindowServiceKind::Anthropic,
        tokenizer_name: "anthropic/claude",
        max_sequence_length: 8000,
        max_request_length: 8000,
        end_of_text_token: "<EOT>",
        prefix_token: "<EOT>",
    };

    pub const GPT2: Self = Self {
        kind: WindowServiceKind::Gpt2,
        tokenizer_name: GPT2_TOKENIZER,
        max_sequence_length: 1024,
        max_request_length: 1025,
        end_of_text_token: END_OF_TEXT,
        prefix_token: END_OF_TEXT,
    };

    pub const GPTJ: Self = Self {
        kind: WindowServiceKind::GptJ,
        tokenizer_name: "EleutherAI/gpt-j-6B",
        max_sequence_length: 2048,
        max_request_length: 2049,
        end_of_text_token: END_OF_TEXT,
        prefix_token: END_OF_TEXT,
    };

    pub const GPTNEOX: Self = Self {
        kind: WindowServiceKind::GptNeoX,
        tokenizer_name: "EleutherAI/gpt-neox-20b",
        max_sequence_length: 2048,
        max_request_length: 2049,
        end_of_text_token: END_OF_TEXT,
        prefix_token: END_OF_TEXT,
    };

    pub const AI21: Self = Self {
        kind: WindowServiceKind::Ai21,
        tokenizer_name: "ai21/j1",
        max_sequence_length: 2048,
        max_request_length: 2048,
        end_of_text_token: "",
        prefix_token: "",
    };

    pub fn for_kind(kind: WindowServiceKind) -> &'static Self {
        match kind {
            WindowServiceKind::WiderOpenAi => &Self::WIDER_OPENAI,
            WindowServiceKind::OpenAi => &Self::OPENAI,
            WindowServiceKind::MtNlg => &Self::MT_NLG,
            WindowServiceKind::Anthropic => &Self::ANTHROPIC,
            WindowServiceKind::Gpt2 => &Self::GPT2,
            WindowServiceKind::GptJ => &Self::GPTJ,
            WindowServiceKind::GptNeoX => &Self::GPTNEOX,
            WindowServiceKind::Ai21 => &Self::AI21,
        }
    }
}

/// A window service fully described by its [`WindowProfile`].
#[derive(Debug, Clone)]
pub struct StandardWindowService {
    profile: &'static WindowProfile,
    tokenizer: Arc<dyn TokenizerService>,
}

impl StandardWindowService {
    pub fn new(kind: WindowServiceKind, tokenizer: Arc<dyn TokenizerService>) -> Self {
        Self {
            profile: WindowProfile::for_kind(kind),
            tokenizer,
        }
    }

    pub fn profile(&self) -> &'static WindowProfile {
        self.profile
    }
}

impl WindowService for StandardWindowService {
    fn kind(&self) -> WindowServiceKind {
        self.profile.kind
    }

    fn tokenizer_name(&self) -> &str {
        self.profile.tokenizer_name
    }

    fn max_sequence_length(&self) -> u64 {
        self.profile.max_sequence_length
    }

    fn max_request_length(&self) -> u64 {
        self.profile.max_request_length
    }

    fn end_of_text_token(&self) -> &str {
        self.profile.end_of_text_token
    }

    fn prefix_token(&self) -> &str {
        self.profile.prefix_token
    }

    fn tokenizer(&self) -> &Arc<dyn TokenizerService> {
        &self.tokenizer
    }
}

/// AI21 window service.
///
/// Owns a GPT-2 window service for text the AI21 tokenizer cannot measure
/// without a network round trip.
#[derive(Debug, Clone)]
pub struct Ai21WindowService {
    inner: StandardWindowService,
    gpt2: StandardWindowService,
}

impl Ai21WindowService {
    pub fn new(tokenizer: Arc<dyn TokenizerService>, gpt2: StandardWindowService) -> Self {
        Self {
            inner: StandardWindowService::new(WindowServiceKind::Ai21, tokenizer),
            gpt2,
        }
    }

    pub fn gpt2(&self) -> &StandardWindowService {
        &self.gpt2
    }
}

impl WindowService for Ai21WindowService {
    fn kind(&self) -> WindowServiceKind {
        WindowServiceKind::Ai21
    }

    fn tokenizer_name(&self) -> &str {
        self.inner.tokenizer_name()
    }

    fn max_sequence_length(&self) -> u64 {
        self.inner.max_sequence_length()
    }

    fn max_request_length(&self) -> u64 {
        self.inner.max_request_length()
    }

    fn end_of_text_token(&self) -> &str {
        self.inner.end_of_text_token()
    }

    fn prefix_token(&self) -> &str {
        self.inner.prefix_token()
    }

    fn tokenizer(&self) -> &Arc<dyn TokenizerService> {
        self.inner.tokenizer()
    }

    fn fallback(&self) -> Option<&dyn WindowService> {
        Some(&self.gpt2)
    }
}

pub(crate) fn wider_openai(tokenizer: Arc<dyn TokenizerService>) -> Box<dyn WindowService> {
    Box::new(StandardWindowService::new(WindowServiceKind::WiderOpenAi, tokenizer))
}

pub(crate) fn openai(tokenizer: Arc<dyn TokenizerService>) -> Box<dyn WindowService> {
    Box::new(StandardWindowService::new(WindowServiceKind::OpenAi, tokenizer))
}

pub(crate) fn mt_nlg(tokenizer: Arc<dyn TokenizerService>) -> Box<dyn WindowService> {
    Box::new(StandardWindowService::new(WindowServiceKind::MtNlg, tokenizer))
}

pub(crate) fn anthropic(tokenizer: Arc<dyn TokenizerService>) -> Box<dyn WindowService> {
    Box::new(StandardWindowService::new(WindowServiceKind::Anthropic, tokenizer))
}

pub(crate) fn gpt2(tokenizer: Arc<dyn TokenizerService>) -> Box<dyn WindowService> {
    Box::new(StandardWindowService::new(WindowServiceKind::Gpt2, tokenizer))
}

pub(crate) fn gptj(tokenizer: Arc<dyn TokenizerService>) -> Box<dyn WindowService> {
    Box::new(StandardWindowService::new(WindowServiceKind::GptJ, tokenizer))
}

pub(crate) fn gptneox(tokenizer: Arc<dyn TokenizerService>) -> Box<dyn WindowService> {
    Box::new(StandardWindowService::new(WindowServiceKind::GptNeoX, tokenizer))
}

pub(crate) fn ai21(tokenizer: Arc<dyn TokenizerService>) -> Box<dyn WindowService> {
    let gpt2 = StandardWindowService::new(WindowServiceKind::Gpt2, Arc::clone(&tokenizer));
    Box::new(Ai21WindowService::new(tokenizer, gpt2))
}
