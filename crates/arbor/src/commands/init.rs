//! Scaffold a starter site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
///
/// Files are created next to the manifest. Existing files are left alone
/// unless `yes` is set.
pub fn run(site: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing arbor site...");

    if site.exists() && !yes {
        tracing::warn!("{} already exists. Use --yes to overwrite.", site.display());
        return Ok(());
    }

    let root = site.parent().unwrap_or(Path::new(""));
    let content_dir = root.join("content");
    fs::create_dir_all(&content_dir).context("Failed to create content directory")?;

    write_file(site, DEFAULT_SITE, yes)?;
    write_file(&root.join("style.css"), DEFAULT_STYLE, yes)?;
    write_file(&root.join("app.js"), DEFAULT_SCRIPT, yes)?;
    write_file(&content_dir.join("home.md"), DEFAULT_HOME, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'arbor build' to generate the site.");

    Ok(())
}

fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::debug!("Keeping existing {}", path.display());
        return Ok(());
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_SITE: &str = r##"[build]
output = "build"
format = true

[[page]]
name = "index.html"
attrs = { lang = "en" }

[[page.children]]
type = "head"
children = [
    { type = "title", text = "My Site" },
    { type = "css-file", path = "style.css" },
    { type = "css", name = "theme.css", rules = { body = { margin = "0" }, ".menu" = { display = "flex" } } },
    { type = "js-file", path = "app.js" },
]

[[page.children]]
type = "body"

[[page.children.children]]
type = "nav"
attrs = { cls = "menu" }
children = [
    { type = "li", children = [{ type = "a", attrs = { href = "index.html", cls = "active" }, children = [{ type = "text", text = "Home" }] }] },
]

[[page.children.children]]
type = "div"
attrs = { cls = "content" }
children = [
    { type = "section", children = [{ type = "markdown", path = "content/home.md", attrs = { cls = "page" } }] },
]
"##;

const DEFAULT_STYLE: &str = r#".menu {
  list-style: none;
  gap: 1rem;
}

.content {
  max-width: 48rem;
  margin: 0 auto;
}
"#;

const DEFAULT_SCRIPT: &str = r#"document.querySelectorAll('.menu a').forEach(link => {
  if (link.getAttribute('href') === window.location.pathname.split('/').pop()) {
    link.classList.add('active');
  }
});
"#;

const DEFAULT_HOME: &str = r#"# Welcome

This page was built by arbor from `content/home.md`.

Edit `site.toml` to change the page structure.
"#;
