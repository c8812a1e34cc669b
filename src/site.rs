use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::SiteError;
use crate::parser::extract_title;
use crate::render::{RenderOptions, markdown_to_html_node};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Page template with `{{ Title }}` and `{{ Content }}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let source = fs::read_to_string(path).map_err(SiteError::io(path))?;
        Ok(Self::new(source))
    }

    /// Fill in the placeholders. Unless `base_path` is `/`, root-relative
    /// `href="/` and `src="/` in both template and content are prefixed
    /// with it.
    pub fn render(&self, title: &str, content: &str, base_path: &str) -> String {
        let base_path = normalize_base_path(base_path);
        let template = rebase(&self.source, &base_path);
        let content = rebase(content, &base_path);
        template
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, &content)
    }
}

/// Ensure a base path starts and ends with `/`.
fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

fn rebase(html: &str, base_path: &str) -> String {
    if base_path == "/" {
        return html.to_string();
    }
    html.replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}"))
}

/// Totals reported by [`build_site`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub files_copied: usize,
    pub pages_generated: usize,
}

/// Replace `dst` with a recursive copy of `src`. Returns the number of
/// files copied.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    if dst.exists() {
        log::info!("Deleting destination directory: {}", dst.display());
        fs::remove_dir_all(dst).map_err(SiteError::io(dst))?;
    }
    log::info!("Creating destination directory: {}", dst.display());
    fs::create_dir_all(dst).map_err(SiteError::io(dst))?;

    copy_recursive(src, dst)
}

fn copy_recursive(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;
    for entry in sorted_entries(src)? {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            log::info!("Creating directory: {}", dst_path.display());
            fs::create_dir_all(&dst_path).map_err(SiteError::io(&dst_path))?;
            copied += copy_recursive(&src_path, &dst_path)?;
        } else {
            log::info!("Copying file: {} -> {}", src_path.display(), dst_path.display());
            fs::copy(&src_path, &dst_path).map_err(SiteError::io(&dst_path))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>, SiteError> {
    let mut entries = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
        .map_err(SiteError::io(dir))?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

/// Convert one markdown file into an HTML page at `to`.
pub fn generate_page(
    from: &Path,
    template: &Template,
    to: &Path,
    base_path: &str,
    options: &RenderOptions,
) -> Result<(), SiteError> {
    log::info!("Generating page from {} to {}", from.display(), to.display());

    let markdown = fs::read_to_string(from).map_err(SiteError::io(from))?;
    let page_error = |source| SiteError::Page {
        path: from.to_path_buf(),
        source,
    };
    let title = extract_title(&markdown).map_err(page_error)?;
    let body = markdown_to_html_node(&markdown, options)
        .and_then(|node| node.to_html())
        .map_err(page_error)?;

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
    }
    fs::write(to, template.render(&title, &body, base_path)).map_err(SiteError::io(to))
}

/// Mirror `content_dir` into `output_dir`, turning every `.md` file into an
/// `.html` page. Returns the number of pages written.
pub fn generate_pages(
    content_dir: &Path,
    template: &Template,
    output_dir: &Path,
    base_path: &str,
    options: &RenderOptions,
) -> Result<usize, SiteError> {
    let mut generated = 0;
    for entry in sorted_entries(content_dir)? {
        let src_path = entry.path();
        let dst_path = output_dir.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path).map_err(SiteError::io(&dst_path))?;
            generated += generate_pages(&src_path, template, &dst_path, base_path, options)?;
        } else if src_path.extension().is_some_and(|ext| ext == "md") {
            generate_page(
                &src_path,
                template,
                &dst_path.with_extension("html"),
                base_path,
                options,
            )?;
            generated += 1;
        } else {
            log::debug!("Skipping non-markdown file: {}", src_path.display());
        }
    }
    Ok(generated)
}

/// Copy static assets and generate every page of the project at `root`.
pub fn build_site(root: &Path, config: &Config) -> Result<BuildSummary, SiteError> {
    let paths = config.paths.resolve(root);
    let options = config.render_options();

    let files_copied = copy_static(&paths.static_dir, &paths.output_dir)?;
    let template = Template::load(&paths.template)?;
    let pages_generated = generate_pages(
        &paths.content_dir,
        &template,
        &paths.output_dir,
        &config.site.base_path,
        &options,
    )?;

    Ok(BuildSummary {
        files_copied,
        pages_generated,
    })
}
