//! Generate static files

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::generator::Generator;
use crate::Folio;

/// Quiet period before a burst of file events triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Index the content directory and generate the static site
pub async fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let articles = folio.index().list_articles().await?;
    tracing::info!(
        "Loaded {} articles from {:?}",
        articles.len(),
        folio.content_dir
    );

    Generator::new(folio).generate(&articles)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(folio: &Folio) -> Result<()> {
    let (mut changes, _debouncer) = watch_site(folio)?;
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut folio = folio.clone();
    while let Some(paths) = changes.recv().await {
        for path in &paths {
            tracing::info!("File changed: {}", path.display());
        }

        folio = reload(folio);
        if let Err(e) = run(&folio).await {
            tracing::error!("Generation failed: {:#}", e);
        }
    }

    Ok(())
}

/// Re-read the site configuration, keeping the current one if it no longer parses
pub(crate) fn reload(folio: Folio) -> Folio {
    match Folio::new(&folio.base_dir) {
        Ok(fresh) => fresh,
        Err(e) => {
            tracing::warn!("Keeping previous configuration: {:#}", e);
            folio
        }
    }
}

/// Watch the content directory, the static directory and the config file.
///
/// Each debounced burst of relevant changes arrives as one batch of paths.
/// The returned debouncer must be kept alive for as long as events are wanted.
pub(crate) fn watch_site(
    folio: &Folio,
) -> Result<(
    mpsc::UnboundedReceiver<Vec<PathBuf>>,
    Debouncer<notify::RecommendedWatcher>,
)> {
    let (tx, rx) = mpsc::unbounded_channel();
    let base_dir = folio.base_dir.clone();

    let mut debouncer = new_debouncer(DEBOUNCE, move |res: DebounceEventResult| match res {
        Ok(events) => {
            let paths: Vec<PathBuf> = events
                .into_iter()
                .map(|event| event.path)
                .filter(|path| is_relevant(&base_dir, path))
                .collect();
            if !paths.is_empty() {
                let _ = tx.send(paths);
            }
        }
        Err(e) => tracing::error!("Watch error: {:?}", e),
    })?;

    let targets = [
        (folio.content_dir.clone(), RecursiveMode::Recursive),
        (folio.static_dir.clone(), RecursiveMode::Recursive),
        (
            folio.base_dir.join(crate::CONFIG_FILE),
            RecursiveMode::NonRecursive,
        ),
    ];
    for (path, mode) in targets {
        if path.exists() {
            debouncer.watcher().watch(&path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    Ok((rx, debouncer))
}

/// Editor droppings and VCS internals never trigger a rebuild.
///
/// Only the part of `path` below `base_dir` is inspected, so a site living
/// in a checkout like `me.github.io` still rebuilds.
fn is_relevant(base_dir: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    if relative
        .components()
        .any(|c| c.as_os_str() == ".git" || c.as_os_str() == ".DS_Store")
    {
        return false;
    }

    let name = relative
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    !name.ends_with('~') && !name.ends_with(".swp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;

    #[test]
    fn test_is_relevant() {
        let base = Path::new("/site");
        assert!(is_relevant(base, Path::new("/site/content/hello.mdx")));
        assert!(is_relevant(base, Path::new("/site/_config.yml")));
        assert!(is_relevant(base, Path::new("/site/content/.gitignore")));
        assert!(!is_relevant(base, Path::new("/site/.git/index")));
        assert!(!is_relevant(base, Path::new("/site/static/.DS_Store")));
        assert!(!is_relevant(base, Path::new("/site/content/hello.mdx~")));
        assert!(!is_relevant(base, Path::new("/site/content/.hello.mdx.swp")));
    }

    #[test]
    fn test_github_pages_checkout_is_relevant() {
        let base = Path::new("/home/me/me.github.io");
        assert!(is_relevant(
            base,
            Path::new("/home/me/me.github.io/content/hello.mdx")
        ));
        // Only components below the site count
        let inside_git = Path::new("/home/me/.git/work/site");
        assert!(is_relevant(
            inside_git,
            Path::new("/home/me/.git/work/site/content/hello.mdx")
        ));
    }

    #[tokio::test]
    async fn test_run_generates_site() {
        let dir = tempfile::TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&folio.content_dir).unwrap();
        fs::write(
            folio.content_dir.join("hello-world.mdx"),
            "---\ntitle: Hello World\n---\nHi.",
        )
        .unwrap();

        run(&folio).await.unwrap();
        assert!(folio
            .public_dir
            .join("blogs/hello-world/index.html")
            .is_file());
    }

    #[tokio::test]
    async fn test_run_fails_without_content_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());

        let err = run(&folio).await.unwrap_err();
        assert!(err.downcast_ref::<crate::IndexError>().is_some());
        assert!(!folio.public_dir.exists());
    }

    #[test]
    fn test_reload_keeps_previous_config_on_error() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(crate::CONFIG_FILE), "title: First\n").unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        fs::write(dir.path().join(crate::CONFIG_FILE), "title: Second\n").unwrap();
        let folio = reload(folio);
        assert_eq!(folio.config.title, "Second");

        fs::write(dir.path().join(crate::CONFIG_FILE), "order: sideways\n").unwrap();
        let folio = reload(folio);
        assert_eq!(folio.config.title, "Second");
    }
}
