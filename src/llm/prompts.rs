//! Summary instructions per language and prompt assembly.

/// Language used when detection fails or yields an unsupported code.
pub const DEFAULT_LANGUAGE: &str = "en";

const INSTRUCTIONS: [(&str, &str); 4] = [
    ("en", "Please summarize the following text in English."),
    ("fr", "Veuillez résumer le texte suivant en français."),
    ("de", "Bitte fassen Sie den folgenden Text auf Deutsch zusammen."),
    ("it", "Per favore, riassumi il seguente testo in italiano."),
];

/// Codes with a dedicated instruction.
pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    INSTRUCTIONS.iter().map(|(code, _)| *code)
}

/// Look up the summary instruction for a language code.
pub fn resolve_instruction(language: &str) -> Option<&'static str> {
    let language = language.trim();
    INSTRUCTIONS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(language))
        .map(|(_, instruction)| *instruction)
}

/// Wrap the transcript in instruction delimiters below the instruction.
pub fn build_prompt(instruction: &str, transcript: &str) -> String {
    format!("{instruction}\n\n[INST]\n{transcript}\n[/INST]")
}
