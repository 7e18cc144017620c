//! User-facing strings in English and Traditional Chinese.
//!
//! The active locale is chosen once at startup and carried around in an
//! [`I18n`] value that rendering code receives explicitly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Locale {
    /// Map a BCP 47 tag (`zh-TW`) or POSIX locale (`zh_TW.UTF-8`) to a supported locale.
    ///
    /// Traditional Chinese is used for Taiwan and Hong Kong; everything else is English.
    pub fn detect(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-");

        if normalized.starts_with("zh-TW") || normalized.starts_with("zh-HK") {
            Locale::ZhTw
        } else {
            Locale::En
        }
    }

    /// Tag used for the `lang` attribute of rendered pages.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhTw => "zh-TW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    AppTitle,
    AppSubtitle,
    ErrorTitle,
    PreviewHeader,
    PreviewSubtitle,
    PromptLabel,
    PromptPlaceholder,
    LanguageLabel,
    LanguagePlaceholder,
    FilesLabel,
    DropFiles,
    Browse,
    GenerateButton,
    GeneratingButton,
    FormAlert,
    ProjectFiles,
    SelectFile,
    CodeTab,
    LivePreviewTab,
    NoPreviewAvailable,
    NoIndexHtml,
    Copy,
    Copied,
    CopyFail,
    LoaderMessage1,
    LoaderMessage2,
    LoaderMessage3,
    LoaderMessage4,
    LoaderMessage5,
    LoaderMessage6,
    LoaderWait,
}

/// Loader messages in display order.
pub const LOADER_MESSAGES: [MessageKey; 6] = [
    MessageKey::LoaderMessage1,
    MessageKey::LoaderMessage2,
    MessageKey::LoaderMessage3,
    MessageKey::LoaderMessage4,
    MessageKey::LoaderMessage5,
    MessageKey::LoaderMessage6,
];

/// Localization context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct I18n {
    locale: Locale,
}

impl I18n {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translate `key` into the context's locale.
    pub fn t(&self, key: MessageKey) -> &'static str {
        match self.locale {
            Locale::En => english(key),
            Locale::ZhTw => traditional_chinese(key),
        }
    }

    /// Loader message for the given tick, cycling through all of them.
    pub fn loader_message(&self, tick: usize) -> &'static str {
        self.t(LOADER_MESSAGES[tick % LOADER_MESSAGES.len()])
    }
}

fn english(key: MessageKey) -> &'static str {
    use MessageKey::*;

    match key {
        AppTitle => "AI Code Architect",
        AppSubtitle => "Generate entire codebases from a single prompt.",
        ErrorTitle => "Error",
        PreviewHeader => "Project preview will appear here",
        PreviewSubtitle => "Enter a prompt above and click \"Generate Project\" to get started.",
        PromptLabel => "Project Description",
        PromptPlaceholder => {
            "e.g., A real-time chat application with user authentication and message history"
        }
        LanguageLabel => "Language / Framework",
        LanguagePlaceholder => "e.g., React with TypeScript and Tailwind CSS",
        FilesLabel => "Upload Context Files (Optional)",
        DropFiles => "Drop files to attach, or",
        Browse => "browse",
        GenerateButton => "Generate Project",
        GeneratingButton => "Generating...",
        FormAlert => "Please fill in both the project description and the language/framework.",
        ProjectFiles => "Project Files",
        SelectFile => "Select a file to view its content",
        CodeTab => "Code",
        LivePreviewTab => "Live Preview",
        NoPreviewAvailable => "Live Preview Not Available",
        NoIndexHtml => {
            "No index.html file found in the project. Live preview requires an index.html entry point."
        }
        Copy => "Copy",
        Copied => "Copied!",
        CopyFail => "Failed to copy text.",
        LoaderMessage1 => "Compiling quantum algorithms...",
        LoaderMessage2 => "Brewing fresh code...",
        LoaderMessage3 => "Consulting the AI architect...",
        LoaderMessage4 => "Assembling project blueprints...",
        LoaderMessage5 => "Polishing the digital artifacts...",
        LoaderMessage6 => "Reticulating splines...",
        LoaderWait => "Please wait, this may take a moment.",
    }
}

fn traditional_chinese(key: MessageKey) -> &'static str {
    use MessageKey::*;

    match key {
        AppTitle => "AI 程式碼架構師",
        AppSubtitle => "只需一個提示，即可生成完整的程式碼庫。",
        ErrorTitle => "錯誤",
        PreviewHeader => "專案預覽將會顯示在此處",
        PreviewSubtitle => "請在上方輸入提示，然後點擊「生成專案」開始。",
        PromptLabel => "專案描述",
        PromptPlaceholder => "例如：一個具有使用者驗證和訊息歷史記錄的即時聊天應用程式",
        LanguageLabel => "語言 / 框架",
        LanguagePlaceholder => "例如：React 搭配 TypeScript 和 Tailwind CSS",
        FilesLabel => "上傳參考檔案（可選）",
        DropFiles => "拖放檔案至此，或",
        Browse => "瀏覽",
        GenerateButton => "生成專案",
        GeneratingButton => "生成中...",
        FormAlert => "請填寫專案描述和語言/框架。",
        ProjectFiles => "專案檔案",
        SelectFile => "選擇一個檔案以查看其內容",
        CodeTab => "程式碼",
        LivePreviewTab => "即時預覽",
        NoPreviewAvailable => "無法使用即時預覽",
        NoIndexHtml => "專案中找不到 index.html 檔案。即時預覽需要一個 index.html 進入點。",
        Copy => "複製",
        Copied => "已複製！",
        CopyFail => "複製文字失敗。",
        LoaderMessage1 => "正在編譯量子演算法...",
        LoaderMessage2 => "正在沖泡新鮮的程式碼...",
        LoaderMessage3 => "正在諮詢 AI 架構師...",
        LoaderMessage4 => "正在組裝專案藍圖...",
        LoaderMessage5 => "正在拋光數位產物...",
        LoaderMessage6 => "正在網格化樣條...",
        LoaderWait => "請稍候，這可能需要一點時間。",
    }
}
