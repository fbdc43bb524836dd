//! Inkdown - markdown preview generation with gap-buffer editing.
//!
//! # Usage
//!
//! ```bash
//! inkdown README.md
//! inkdown --renderer reduced README.md
//! inkdown --edit-demo --stats README.md -o preview.html
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use inkdown::buffer::GapBuffer;
use inkdown::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use inkdown::render::{MarkdownRenderer, RendererChoice, create_renderer, default_renderer};

/// Renders a markdown file to a styled HTML preview page
#[derive(Parser, Debug)]
#[command(name = "inkdown", version, about, long_about = None)]
struct Cli {
    /// Markdown file to render
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output path for the preview page
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Renderer implementation to use
    #[arg(long, value_enum)]
    renderer: Option<RendererChoice>,

    /// Print buffer and patch statistics
    #[arg(long)]
    stats: bool,

    /// Run a demonstration edit sequence on the buffer before rendering
    #[arg(long)]
    edit_demo: bool,

    /// Save current command-line flags as defaults in .inkdownrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .inkdownrc
    #[arg(long)]
    clear: bool,
}

/// Head of the preview page; the rendered fragment is spliced between the
/// two halves so no HTML templating is needed.
const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Markdown Preview</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto,
                         Oxygen, Ubuntu, Cantarell, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }
        h1 { border-bottom: 2px solid #eee; padding-bottom: 0.3em; }
        h2 { border-bottom: 1px solid #eee; padding-bottom: 0.3em; }
        code {
            background-color: #f4f4f4;
            padding: 0.2em 0.4em;
            border-radius: 3px;
            font-family: 'SFMono-Regular', Consolas, 'Liberation Mono', Menlo, monospace;
            font-size: 0.9em;
        }
        pre {
            background-color: #f6f8fa;
            padding: 16px;
            border-radius: 6px;
            overflow-x: auto;
        }
        pre code { background-color: transparent; padding: 0; }
        blockquote {
            border-left: 4px solid #dfe2e5;
            margin: 0;
            padding-left: 16px;
            color: #6a737d;
        }
    </style>
</head>
<body>
"#;

const PAGE_FOOT: &str = "</body>\n</html>\n";

/// The original demo edit sequence: banner at the top, a note after line 3,
/// a footer at the end, and one ranged deletion.
fn run_edit_demo(buffer: &mut GapBuffer) {
    println!("Performing demo edits...");

    println!("  1. Inserting banner comment at beginning");
    buffer.insert(0, "<!-- Edited by inkdown -->\n\n");

    println!("  2. Inserting note after line 3");
    let line3_start = buffer.offset_from_line(3, 0);
    buffer.insert(line3_start, "> **Note:** This line was inserted by the demo.\n\n");

    println!("  3. Appending footer at end");
    buffer.insert(buffer.len(), "\n---\n*Modified by inkdown*\n");

    if buffer.len() > 60 {
        println!("  4. Deleting 10 bytes at offset 50 ({:?})", buffer.text_range(50, 10));
        buffer.erase(50, 10);
    }

    let patches = buffer.flush_patches();
    println!("  Recorded {} coalesced patch(es)", patches.len());
    for patch in &patches {
        println!(
            "    offset {:>5}  -{} bytes  +{} bytes",
            patch.start,
            patch.removed_len,
            patch.inserted_text.len()
        );
    }
}

fn print_stats(buffer: &GapBuffer, label: &str) {
    println!(
        "[{label}] {} bytes, {} lines",
        buffer.len(),
        buffer.line_count()
    );
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }
    let content = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let mut buffer = GapBuffer::from_text(&content);
    if effective.stats {
        print_stats(&buffer, "loaded");
    }

    if effective.edit_demo {
        run_edit_demo(&mut buffer);
        if effective.stats {
            print_stats(&buffer, "edited");
        }
    }

    let renderer = effective
        .renderer
        .map_or_else(default_renderer, create_renderer);
    let html = renderer.render_to_html(&buffer.text());

    let output = effective
        .output
        .unwrap_or_else(|| PathBuf::from("preview.html"));
    let page = format!("{PAGE_HEAD}{html}{PAGE_FOOT}");
    std::fs::write(&output, page)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Rendered {} with {} renderer (full CommonMark: {}) -> {}",
        cli.file.display(),
        renderer.parser_name(),
        renderer.is_full_commonmark(),
        output.display()
    );
    Ok(())
}
