//! Instruction template wrapped around the source text.

use crate::input::SourceDocument;
use crate::registry::ModelDescriptor;

/// Fixed instruction placed ahead of the source.
pub const PSEUDOCODE_INSTRUCTION: &str = "Convert the following code into pseudocode. \
Use clear, concise language and maintain the logical structure:";

/// Everything the completion client needs to issue one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
}

/// Build the request for `doc`.
///
/// The source is appended verbatim after a blank line. No escaping and no
/// truncation, so the same document and model always produce the same payload.
pub fn build(doc: &SourceDocument, model: &ModelDescriptor) -> CompletionRequest {
    let mut prompt =
        String::with_capacity(PSEUDOCODE_INSTRUCTION.len() + 2 + doc.content.len());
    prompt.push_str(PSEUDOCODE_INSTRUCTION);
    prompt.push_str("\n\n");
    prompt.push_str(&doc.content);

    CompletionRequest {
        model: model.identifier.to_string(),
        prompt,
    }
}
