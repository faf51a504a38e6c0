use sifter_core::{SessionPhase, SessionViewModel};

/// Prints the session view to stdout. Called whenever the session reports a
/// dirty view, or on an explicit `show`.
pub fn render(view: &SessionViewModel) {
    println!("----------------------------------------");
    println!(
        "File:    {}",
        view.source_file_name.as_deref().unwrap_or("-")
    );
    println!("Status:  {}", status_text(view.phase));
    println!("Format:  {}", view.selected_format.label());
    match view.record_count {
        Some(count) => println!("Records: {count}"),
        None => println!("Records: -"),
    }

    if let Some(log) = &view.diagnostic_log {
        println!("--- engine log ---");
        println!("{}", log.trim_end());
    }
    if let Some(preview) = &view.preview {
        println!("--- preview ---");
        println!("{preview}");
        if let Some(count) = view.record_count {
            println!("{count} records ready to export");
        }
    }
    if let Some(note) = &view.export_note {
        println!("{note}");
    }
    if let Some(error) = &view.error {
        println!("Error: {error}");
    }
}

fn status_text(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Idle => "Waiting for file",
        SessionPhase::Invoking => "Parsing...",
        SessionPhase::Succeeded => "Parsing completed",
        SessionPhase::Failed => "Parsing failed",
    }
}
