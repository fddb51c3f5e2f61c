use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every error in the workspace prints its location. If capture
/// breaks, a failed run only says "Provider Error" with no hint where it was raised.
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN: Current caller location
    // WHEN: Creating ErrorLocation from caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should capture file, line, and column
    assert!(
        location.file.contains("error_location.rs"),
        "Should capture file path"
    );
    assert_eq!(location.line, 12, "Should capture correct line number");
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies the `[file:line:column]` Display format.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: An ErrorLocation
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting as string
    let formatted = format!("{}", location);

    // THEN: Should produce "[file:line:column]" format
    assert!(formatted.starts_with('['), "Should start with '['");
    assert!(formatted.ends_with(']'), "Should end with ']'");
    assert!(formatted.contains(&location.line.to_string()));
    assert_eq!(
        formatted.matches(':').count(),
        2,
        "Should have exactly 2 colons"
    );
}

/// **VALUE**: Verifies that `ErrorLocation::caller()` reports the call site of a
/// `#[track_caller]` constructor, not the constructor body.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` is dropped from
/// `ErrorLocation::caller()`, which would make every error point at error_location.rs.
#[test]
fn given_track_caller_helper_when_capturing_twice_then_lines_are_sequential() {
    // GIVEN: A helper that captures its caller, like the error constructors do
    #[track_caller]
    fn capture_location() -> ErrorLocation {
        ErrorLocation::caller()
    }

    // WHEN: Capturing location from different call sites
    let loc1 = capture_location();
    let loc2 = capture_location();

    // THEN: Both point into this test file on consecutive lines
    assert_eq!(loc1.file, loc2.file, "Should have same file");
    assert!(loc1.file.contains("tests"), "Should point at the test, not the helper");
    assert_eq!(loc1.line + 1, loc2.line, "Lines should be sequential");
}
