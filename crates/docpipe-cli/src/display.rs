//! Human-readable rendering of a pipeline result.

use docpipe_core::PipelineResult;

/// Print the merged result as a readable card.
pub fn render(result: &PipelineResult) {
    println!("\n=== AI Summary ===");

    if !result.summary.one_liner.is_empty() {
        println!("One-liner: {}", result.summary.one_liner);
    }

    if !result.summary.bullets.is_empty() {
        println!("\nKey points:");
        for bullet in &result.summary.bullets {
            println!("  - {bullet}");
        }
    }

    if !result.summary.entities.is_empty() {
        println!("\nKey entities: {}", result.summary.entities.join(", "));
    }

    if let Some(risks) = &result.summary.risks {
        println!("\nRisks / flags:");
        if risks.is_empty() {
            println!("  None detected.");
        } else {
            for risk in risks {
                println!("  - {risk}");
            }
        }
    }

    println!("\nTags: {}", result.tags.join(", "));

    println!("\nQuality check: confidence {}/100", result.evaluation.confidence);
    if result.evaluation.issues.is_empty() {
        println!("  No issues detected.");
    } else {
        for issue in &result.evaluation.issues {
            println!("  - {issue}");
        }
    }

    if let Some(raw) = &result.summary.raw {
        println!("\nWarning: model response was not valid JSON. Raw output:");
        println!("{raw}");
    }
}
