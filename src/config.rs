use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::render::RendererChoice;

/// CLI defaults persisted as flag tokens in a config file.
///
/// Precedence is file defaults first, then CLI flags: merge with
/// [`union`](Self::union), later values winning for options.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub stats: bool,
    pub edit_demo: bool,
    pub renderer: Option<RendererChoice>,
    pub output: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            stats: self.stats || other.stats,
            edit_demo: self.edit_demo || other.edit_demo,
            renderer: other.renderer.or(self.renderer),
            output: other.output.clone().or_else(|| self.output.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("inkdown").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("inkdown")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("inkdown").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("inkdown").join("config");
        }
    }

    PathBuf::from(".inkdownrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".inkdownrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# inkdown defaults (saved with --save)".to_string());
    if flags.stats {
        lines.push("--stats".to_string());
    }
    if flags.edit_demo {
        lines.push("--edit-demo".to_string());
    }
    if let Some(renderer) = flags.renderer {
        lines.push(format!("--renderer {}", renderer_name(renderer)));
    }
    if let Some(output) = &flags.output {
        lines.push(format!("--output {}", output.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--stats" {
            flags.stats = true;
        } else if token == "--edit-demo" {
            flags.edit_demo = true;
        } else if token == "--renderer" {
            if let Some(next) = tokens.get(i + 1) {
                flags.renderer = parse_renderer(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--renderer=") {
            flags.renderer = parse_renderer(value);
        } else if token == "--output" || token == "-o" {
            if let Some(next) = tokens.get(i + 1) {
                flags.output = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--output=") {
            flags.output = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

fn parse_renderer(s: &str) -> Option<RendererChoice> {
    match s {
        "reduced" => Some(RendererChoice::Reduced),
        "commonmark" => Some(RendererChoice::CommonMark),
        _ => None,
    }
}

fn renderer_name(choice: RendererChoice) -> &'static str {
    match choice {
        RendererChoice::Reduced => "reduced",
        RendererChoice::CommonMark => "commonmark",
    }
}
