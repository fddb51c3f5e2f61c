use crate::input::SourceDocument;
use crate::prompt::{PSEUDOCODE_INSTRUCTION, build};
use crate::registry::ModelRegistry;

fn document(content: &str) -> SourceDocument {
    SourceDocument {
        origin: String::from("example.py"),
        content: content.to_string(),
    }
}

/// **VALUE**: The prompt is the instruction, a blank line, then the source verbatim.
///
/// **BUG THIS CATCHES**: Would catch trimming, escaping or truncation creeping into
/// the builder; the model must see exactly what is on disk.
#[test]
fn given_source_when_built_then_prompt_is_instruction_then_verbatim_source() {
    // GIVEN: Source with leading whitespace, braces and a trailing newline
    let source = "  def f(x):\n    return {\"a\": x}\n";
    let model = ModelRegistry::builtin().resolve("gpt-4o").unwrap();

    // WHEN: Building the request
    let request = build(&document(source), model);

    // THEN: Instruction, blank line, untouched source
    assert_eq!(request.model, "gpt-4o");
    assert_eq!(request.prompt, format!("{PSEUDOCODE_INSTRUCTION}\n\n{source}"));
    assert!(request.prompt.ends_with("}\n"));
}

#[test]
fn given_same_document_and_model_when_built_twice_then_identical() {
    let model = ModelRegistry::builtin().default_model();
    let doc = document("print('hi')");

    assert_eq!(build(&doc, model), build(&doc, model));
}

#[test]
fn given_empty_source_when_built_then_prompt_is_instruction_only() {
    let model = ModelRegistry::builtin().default_model();

    let request = build(&document(""), model);

    assert_eq!(request.prompt, format!("{PSEUDOCODE_INSTRUCTION}\n\n"));
}
