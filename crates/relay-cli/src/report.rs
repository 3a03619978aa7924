use relay_agent::InvocationResult;
use std::fmt::Write;

pub const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Heading block printed before each scripted example.
pub fn example_header(name: &str, query: &str) -> String {
    format!("\n{rule}\nExample: {name}\n{rule}\nQuery: {query}\n", rule = rule())
}

/// The block printed after a single standalone query.
pub fn performance_report(result: &InvocationResult) -> String {
    let usage = &result.usage;
    format!(
        "=== Performance Metrics ===\n\
         Input tokens: {}\n\
         Output tokens: {}\n\
         Total tokens: {}\n\
         Execution time: {:.2} seconds",
        usage.input_tokens,
        usage.output_tokens,
        usage.total(),
        result.elapsed_seconds
    )
}

/// Bulleted metrics shown under each scripted example.
pub fn metrics_summary(result: &InvocationResult) -> String {
    let usage = &result.usage;
    let mut out = String::from("Metrics:\n");
    let _ = writeln!(out, "  • Input tokens: {}", usage.input_tokens);
    let _ = writeln!(out, "  • Output tokens: {}", usage.output_tokens);
    let _ = writeln!(out, "  • Total tokens: {}", usage.total());
    let _ = write!(out, "  • Execution time: {:.2}s", result.elapsed_seconds);
    if result.tools_used() > 0 {
        let _ = write!(out, "\n  • Tools used: {}", result.tools_used());
    }
    out
}
